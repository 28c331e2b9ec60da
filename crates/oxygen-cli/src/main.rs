use anyhow::Result;
use clap::Parser;
use console::style;
use oxygen::{migration::Directory, Config, Db};
use oxygen_cli::{Cli, Outcome, OxygenCli};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli).await {
        Ok(outcome) => outcome.into(),
        Err(err) => {
            eprintln!("{} {err:#}", style("error:").red().bold());
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<Outcome> {
    let mut config = Config::load(&cli.config)?;

    if let Some(url) = &cli.database_url {
        config.database.url = url.clone();
    }

    let db = Db::connect(&config.database.url).await?;
    let source = Directory::new(&config.migration.migrations_path);

    OxygenCli::new(db, source)
        .with_config(config)
        .run(cli)
        .await
}

/// `RUST_LOG` applies unless `-v` is given, defaulting to `warn`.
fn setup_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
