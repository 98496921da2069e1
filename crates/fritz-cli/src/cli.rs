//! Clap derive structures for the `fritz` CLI.
//!
//! The tool is flag-driven: any mix of the report flags runs once (or in a
//! loop), `--add_mac` runs alone and exits.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use clap_complete::Shell;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fritz -- device lists, online counter and WLAN access for a FRITZ!Box
#[derive(Debug, Parser)]
#[command(
    name = "fritz",
    version,
    about = "Query a FRITZ!Box from the command line",
    long_about = "Query a FRITZ!Box from the command line.\n\n\
        Login data can be given as arguments (not recommended), read from the\n\
        environment variables FBHOST, FBUSER and FBPASS, or, if nothing is set,\n\
        it will be prompted for."
)]
pub struct Cli {
    #[command(flatten)]
    pub login: LoginOpts,

    #[command(flatten)]
    pub commands: CommandFlags,

    #[command(flatten)]
    pub global: GlobalOpts,
}

// ── Login ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginOpts {
    /// FRITZ!Box hostname including port, e.g. foobarbaz.myfritz.net:46390
    #[arg(long, value_name = "FBHOST")]
    pub host: Option<String>,

    /// FRITZ!Box username
    #[arg(long, value_name = "FBUSER")]
    pub user: Option<String>,

    /// FRITZ!Box password
    #[arg(long = "pass", value_name = "FBPASS")]
    pub pass: Option<String>,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
#[command(next_help_heading = "Commands")]
pub struct CommandFlags {
    /// Add a device to the WLAN access list by its MAC address and quit
    #[arg(long = "add_mac", visible_alias = "add-mac", value_name = "MAC")]
    pub add_mac: Option<String>,

    /// Overview: product, firmware, internet connection and devices
    #[arg(long)]
    pub overview: bool,

    /// Detailed list of active and passive devices
    #[arg(long)]
    pub devices: bool,

    /// Online counter (traffic statistics)
    #[arg(long)]
    pub counter: bool,

    /// Counter periods to report (repeatable)
    #[arg(long, value_enum, default_value = "today")]
    pub period: Vec<PeriodArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    Today,
    Yesterday,
    ThisWeek,
    ThisMonth,
    LastMonth,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Run in a loop with SEC seconds of sleep after each iteration.
    /// Ignored by --add_mac.
    #[arg(long = "loop", value_name = "SEC")]
    pub loop_secs: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k')]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SEC")]
    pub timeout: Option<u64>,

    /// Directory that receives the daily page snapshots
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Do not write page snapshots
    #[arg(long)]
    pub no_snapshots: bool,

    /// Language the router renders labels in
    #[arg(long, value_name = "LANG")]
    pub lang: Option<String>,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}
