mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::time::Duration;

use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fritz_api::{FritzClient, MacAddress, SnapshotStore};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // A `.env` in the working directory may carry FBHOST/FBUSER/FBPASS and
    // FRITZ_* settings; variables already set take precedence.
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }

    // Shell completions need neither config nor credentials
    if let Some(shell) = cli.global.completions {
        use clap::CommandFactory;
        use clap_complete::generate;

        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "fritz", &mut std::io::stdout());
        return Ok(());
    }

    // Reject a malformed MAC before any prompt or request
    let mac = cli
        .commands
        .add_mac
        .as_deref()
        .map(str::parse::<MacAddress>)
        .transpose()?;

    let settings = config::resolve_settings(config::load_config()?, &cli.global);
    let login = config::resolve_login(&cli.login)?;

    output::print_lines(&[output::run_header(Local::now())]);

    let mut client = FritzClient::new(&login.host, login.credentials, &settings.transport)?
        .with_lang(settings.lang);
    if let Some(dir) = settings.snapshot_dir {
        let store = SnapshotStore::new(dir);
        tracing::debug!(dir = %store.root().display(), "writing page snapshots");
        client = client.with_snapshots(store);
    }
    tracing::debug!(url = %client.base_url(), "client ready");

    if let Some(mac) = mac {
        return commands::add_mac::handle(&mut client, &mac).await;
    }

    let reports = commands::selected_reports(&cli.commands);
    let sleep = cli
        .global
        .loop_secs
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);
    commands::run(&mut client, &reports, sleep).await
}
