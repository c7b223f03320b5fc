//! Command-line flags and the non-interactive commands.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use lazytodo_config::Config;
use lazytodo_model::Application;
use lazytodo_store::{
    DATABASE_FILE, ImportReport, JSON_FILE, SqliteStore, StoreDescriptor, import_legacy,
    open_store,
};
use tracing::info;

/// Keyboard-driven terminal task manager.
///
/// Without flags, starts the interactive interface.
#[derive(Debug, Parser)]
#[command(name = "lazytodo", version, disable_version_flag = true)]
pub struct Cli {
    /// Show storage information and statistics
    #[arg(short, long, conflicts_with = "migrate")]
    pub info: bool,

    /// Import the legacy JSON data file into the database
    #[arg(short, long)]
    pub migrate: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,
}

/// Which mode the process runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Interactive,
    Info,
    Migrate,
}

impl Cli {
    /// The mode selected by the flags.
    #[must_use]
    pub fn command(&self) -> Command {
        if self.info {
            Command::Info
        } else if self.migrate {
            Command::Migrate
        } else {
            Command::Interactive
        }
    }
}

/// Prints storage details and statistics.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or loaded.
pub fn show_info(config: &Config) -> Result<()> {
    let mut store = open_store(&config.storage).context("failed to open storage")?;
    let app = store.load().context("failed to load data")?;
    print!("{}", format_info(&store.describe(), &app));
    store.close().context("failed to close storage")?;
    Ok(())
}

/// Runs the legacy JSON import into the database.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the import fails.
pub fn run_migration(config: &Config) -> Result<()> {
    println!("🎯 LazyTodo - Manual Migration");
    println!("=============================");

    let data_dir = config.storage.resolve_data_dir()?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;
    let mut store = SqliteStore::open(&data_dir.join(DATABASE_FILE))
        .context("failed to open the database")?;
    let report = import_legacy(&mut store, &data_dir.join(JSON_FILE)).context("migration failed")?;
    info!(?report, "manual migration finished");
    println!("{}", format_migration(report.as_ref()));
    Ok(())
}

fn format_info(descriptor: &StoreDescriptor, app: &Application) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "🎯 LazyTodo - Storage Information");
    let _ = writeln!(out, "===============================");
    let _ = writeln!(out, "Storage Backend: {descriptor}");
    let _ = writeln!(out, "Todo Lists: {}", app.todo_lists.len());
    let _ = writeln!(out, "Total Tasks: {}", app.total_tasks());
    let _ = writeln!(out, "Completed Tasks: {}", app.completed_tasks());
    if let Some(rate) = app.completion_rate() {
        let _ = writeln!(out, "Completion Rate: {rate:.1}%");
    }
    let settings = &app.settings;
    let _ = writeln!(out, "\nSettings:");
    let _ = writeln!(out, "  Reminder Minutes: {}", settings.reminder_minutes);
    let _ = writeln!(out, "  Show Completed: {}", settings.show_completed);
    let _ = writeln!(out, "  Auto Save: {}", settings.auto_save);
    out
}

fn format_migration(report: Option<&ImportReport>) -> String {
    let Some(report) = report else {
        return format!("No legacy {JSON_FILE} found; nothing to migrate.");
    };
    let mut out = format!(
        "Successfully migrated {} todo lists ({} tasks) to the database.",
        report.lists, report.tasks
    );
    if let Some(backup) = &report.backup_path {
        let _ = write!(out, "\nThe JSON file was moved to {}", backup.display());
    }
    out.push_str("\nMigration completed successfully!");
    out
}
