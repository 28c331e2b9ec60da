mod command;
mod theme;
mod utility;

pub use command::{Cli, Command};

use anyhow::Result;
use clap::Parser;
use oxygen::{migration::MigrationSource, Config, Db, Migrator};
use std::{process::ExitCode, sync::Arc};

/// Oxygen CLI library for building custom command-line tools
pub struct OxygenCli {
    db: Db,
    source: Arc<dyn MigrationSource>,
    config: Config,
}

/// How a command that ran to completion went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,

    /// At least one migration failed.
    Failed,
}

impl OxygenCli {
    /// Create a new OxygenCli for the given database and migrations
    pub fn new(db: Db, source: impl MigrationSource + 'static) -> Self {
        Self {
            db,
            source: Arc::new(source),
            config: Config::default(),
        }
    }

    /// Replace the default configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse and execute CLI commands from command-line arguments
    pub async fn parse_and_run(&self) -> Result<Outcome> {
        self.run(Cli::parse()).await
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub async fn parse_from<I, T>(&self, args: I) -> Result<Outcome>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        self.run(cli).await
    }

    pub async fn run(&self, cli: Cli) -> Result<Outcome> {
        let migrator = Migrator::with_source(self.db.clone(), self.source.clone())
            .configure(&self.config.migration);

        match cli.command {
            Command::Migrate(cmd) => cmd.run(&self.db, migrator).await,
            Command::Rollback(cmd) => cmd.run(&self.db, migrator).await,
            Command::Status(cmd) => cmd.run(&self.db, migrator).await,
            Command::Reset(cmd) => cmd.run(&self.db, migrator).await,
        }
    }
}

impl Outcome {
    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }

    pub fn from_success(success: bool) -> Self {
        if success {
            Outcome::Success
        } else {
            Outcome::Failed
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> ExitCode {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::from(1),
        }
    }
}
