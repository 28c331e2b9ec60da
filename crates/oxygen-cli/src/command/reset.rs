use super::{header, rollback::print_report};
use crate::{theme::destructive_theme, Outcome};

use anyhow::Result;
use clap::Parser;
use console::style;
use dialoguer::Confirm;
use oxygen::{Db, Migrator};

#[derive(Parser, Debug)]
pub struct ResetCommand {
    /// Skip the confirmation prompt
    #[arg(long)]
    force: bool,
}

impl ResetCommand {
    pub(crate) async fn run(self, db: &Db, migrator: Migrator) -> Result<Outcome> {
        header("Reset Migrations", db);

        if !self.force {
            let confirmed = Confirm::with_theme(&destructive_theme())
                .with_prompt("This will roll back every migration. Are you sure?")
                .default(false)
                .interact()?;

            if !confirmed {
                println!();
                println!("  {}", style("Aborted.").dim());
                println!();
                return Ok(Outcome::Success);
            }

            println!();
        }

        let reports = migrator.reset().await?;

        if reports.is_empty() {
            println!("  {}", style("Nothing to roll back.").magenta().dim());
            println!();
            return Ok(Outcome::Success);
        }

        for report in &reports {
            print_report(report);
        }

        let success = reports.iter().all(|report| report.is_success());

        println!();
        if success {
            println!(
                "  {}",
                style(format!("Rolled back {} batch(es)", reports.len()))
                    .green()
                    .bold()
            );
        } else {
            println!("  {}", style("Reset stopped after a failure").red().bold());
        }
        println!();

        Ok(Outcome::from_success(success))
    }
}
