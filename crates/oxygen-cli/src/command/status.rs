use super::header;
use crate::Outcome;

use anyhow::Result;
use clap::Parser;
use console::style;
use oxygen::{Db, Migrator};

#[derive(Parser, Debug)]
pub struct StatusCommand {}

impl StatusCommand {
    pub(crate) async fn run(self, db: &Db, migrator: Migrator) -> Result<Outcome> {
        header("Migration Status", db);

        let status = migrator.status().await?;

        if status.is_empty() {
            println!("  {}", style("No migrations found.").magenta().dim());
            println!();
            return Ok(Outcome::Success);
        }

        for migration in &status {
            match migration.batch {
                Some(batch) => println!(
                    "  {} {} {}",
                    style("✓").green().bold(),
                    style(format!("[{batch}]")).dim(),
                    migration.name
                ),
                None => println!(
                    "  {} {} {}",
                    style("•").yellow(),
                    style("[pending]").yellow().dim(),
                    migration.name
                ),
            }
        }

        let pending = status.iter().filter(|migration| !migration.is_ran()).count();

        println!();
        println!(
            "  {}",
            style(format!(
                "{} ran, {} pending",
                status.len() - pending,
                pending
            ))
            .bold()
        );
        println!();

        Ok(Outcome::Success)
    }
}
