//! lazytodo - a keyboard-driven terminal task manager.
//!
//! This is the main binary: it parses flags, loads configuration, sets up
//! logging and either runs a one-shot command or launches the TUI.

mod cli;
mod logging;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use lazytodo_config::Config;
use lazytodo_store::open_store;
use lazytodo_tui::{App, EventSource, terminal};
use tracing::{error, info, warn};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout and succeed; usage errors fail.
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "exiting with an error");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    let data_dir = config.storage.resolve_data_dir()?;
    let log_file = logging::init(&config.logging, &data_dir)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %config.storage.backend,
        ?log_file,
        "starting"
    );
    if let Err(err) = Config::init_default() {
        warn!(error = %err, "could not write the default configuration");
    }

    match cli.command() {
        Command::Info => cli::show_info(&config),
        Command::Migrate => cli::run_migration(&config),
        Command::Interactive => run_interactive(&config).await,
    }
}

async fn run_interactive(config: &Config) -> Result<()> {
    let store = open_store(&config.storage).context("failed to open storage")?;
    let mut app = App::load(store).context("failed to load data")?;

    // Restore the terminal on panic
    terminal::install_panic_hook();
    let mut terminal = terminal::setup_terminal()?;

    let mut events = EventSource::spawn();
    let result = app.run(&mut terminal, &mut events).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;
    app.close().context("failed to close storage")?;
    info!("bye");

    result
}
