// On-disk page snapshots
//
// Every fetched page is written to `<root>/<YYYY-MM-DD>/<page>.<ext>`
// (UTC date), overwriting the previous copy of that page from the same
// day. Writing is best-effort: failures are logged, never returned to the
// caller of the data request.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use crate::page::{ContentKind, PageBody};

/// Writes page snapshots below a root directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a page snapshot lands at for the given day.
    pub fn path_for(&self, date: NaiveDate, page: &str, kind: ContentKind) -> PathBuf {
        self.root
            .join(date.format("%Y-%m-%d").to_string())
            .join(format!("{}.{}", file_stem(page), kind.extension()))
    }

    /// Store a page body under today's (UTC) directory, logging on failure.
    pub fn record(&self, page: &str, body: &PageBody) {
        let (kind, contents) = match body {
            PageBody::Json(value) => match serde_json::to_string_pretty(value) {
                Ok(text) => (ContentKind::Json, text),
                Err(e) => {
                    warn!(page, error = %e, "could not serialize page snapshot");
                    return;
                }
            },
            PageBody::Text(text) => (ContentKind::Html, text.clone()),
        };
        let path = self.path_for(Utc::now().date_naive(), page, kind);
        match write_file(&path, &contents) {
            Ok(()) => debug!(path = %path.display(), "page snapshot written"),
            Err(e) => warn!(path = %path.display(), error = %e, "could not write page snapshot"),
        }
    }
}

fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, contents)
}

/// Page names become file names; keep them to a single path component.
fn file_stem(page: &str) -> String {
    page.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
