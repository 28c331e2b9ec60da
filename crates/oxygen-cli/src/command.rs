mod migrate;
mod reset;
mod rollback;
mod status;

pub use migrate::MigrateCommand;
pub use reset::ResetCommand;
pub use rollback::RollbackCommand;
pub use status::StatusCommand;

use crate::utility::redact_url_password;

use clap::Parser;
use console::style;
use oxygen::{migration::FailedMigration, Db};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "oxygen")]
#[command(about = "Oxygen CLI - Database migration tool")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "oxygen.toml")]
    pub config: PathBuf,

    /// Database URL, overriding the configuration and `DATABASE_URL`
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Log more (`-v` for debug, `-vv` for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser, Debug)]
pub enum Command {
    /// Run all pending migrations
    #[command(name = "migrate")]
    Migrate(MigrateCommand),

    /// Roll back the most recent batch of migrations
    #[command(name = "migrate:rollback")]
    Rollback(RollbackCommand),

    /// Show which migrations have run
    #[command(name = "migrate:status")]
    Status(StatusCommand),

    /// Roll back every migration
    #[command(name = "migrate:reset")]
    Reset(ResetCommand),
}

fn header(title: &str, db: &Db) {
    println!();
    println!("  {}", style(title).cyan().bold().underlined());
    println!();
    println!(
        "  {}",
        style(format!("Connected to {}", redact_url_password(db.url()))).dim()
    );
    println!();
}

fn print_failure(failure: &FailedMigration) {
    println!(
        "  {} {}",
        style("✗").red().bold(),
        style(format!("Failed: {}", failure.name)).red()
    );
    println!("      {}", style(&failure.error).dim());
}

fn print_skipped(skipped: &[String]) {
    for name in skipped {
        println!(
            "  {} {}",
            style("-").yellow(),
            style(format!("Skipped: {name}")).dim()
        );
    }
}
