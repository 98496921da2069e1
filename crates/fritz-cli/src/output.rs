//! Console rendering helpers: relative ages, the run header and colour.
//!
//! Colour is applied only when stdout supports it (`owo-colors` with
//! `supports-colors`), so piped output stays plain.

use std::io::{self, Write};
use std::time::Duration;

use chrono::{DateTime, Local};
use owo_colors::{OwoColorize, Stream};

// ── Relative time ────────────────────────────────────────────────────

/// Render an age with its largest whole unit: `3d ago`, `5h ago`,
/// `12s ago`, or `just now` below one second.
pub fn format_ago(age: Duration) -> String {
    let secs = age.as_secs();
    match secs {
        0 => "just now".into(),
        s if s >= 86_400 => format!("{}d ago", s / 86_400),
        s if s >= 3_600 => format!("{}h ago", s / 3_600),
        s if s >= 60 => format!("{}m ago", s / 60),
        s => format!("{s}s ago"),
    }
}

/// Age of a Unix timestamp (seconds) relative to `now`. Timestamps in the
/// future count as zero.
pub fn age_since(unix_secs: i64, now: DateTime<Local>) -> Duration {
    let delta = now.timestamp().saturating_sub(unix_secs);
    Duration::from_secs(u64::try_from(delta).unwrap_or(0))
}

// ── Headers ──────────────────────────────────────────────────────────

/// Start-of-run timestamp, e.g. `18.10.2026, 09:41:07`.
pub fn run_header(now: DateTime<Local>) -> String {
    now.format("%d.%m.%Y, %H:%M:%S").to_string()
}

/// Frame line printed before each report.
pub fn section_header(name: &str) -> String {
    format!("> {name} <")
}

// ── Colour helpers ───────────────────────────────────────────────────

pub fn dimmed(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.dimmed())
        .to_string()
}

pub fn blue(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.blue())
        .to_string()
}

pub fn yellow(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.yellow())
        .to_string()
}

pub fn green(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.green())
        .to_string()
}

/// Print report lines to stdout. A closed stdout ends the output quietly.
pub fn print_lines(lines: &[String]) {
    let mut stdout = io::stdout().lock();
    if let Err(e) = write_lines(&mut stdout, lines) {
        tracing::debug!(error = %e, "stdout is closed, dropping report output");
    }
}

/// Write lines until the first failure.
fn write_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
