use super::{header, print_failure, print_skipped};
use crate::Outcome;

use anyhow::Result;
use clap::Parser;
use console::style;
use oxygen::{Db, FailurePolicy, Migrator};

#[derive(Parser, Debug)]
pub struct MigrateCommand {
    /// Stop at the first failing migration instead of continuing
    #[arg(long)]
    abort_on_failure: bool,
}

impl MigrateCommand {
    pub(crate) async fn run(self, db: &Db, mut migrator: Migrator) -> Result<Outcome> {
        header("Run Migrations", db);

        if self.abort_on_failure {
            migrator = migrator.on_failure(FailurePolicy::Abort);
        }

        let pending = migrator.pending().await?;

        if pending.is_empty() {
            println!(
                "  {}",
                style("Nothing to migrate. Database is up to date.")
                    .green()
                    .dim()
            );
            println!();
            return Ok(Outcome::Success);
        }

        println!(
            "  {} Found {} pending migration(s)",
            style("→").cyan(),
            pending.len()
        );
        println!();

        let report = migrator.migrate().await?;

        for name in &report.applied {
            println!(
                "  {} {}",
                style("✓").green().bold(),
                style(format!("Migrated: {name}")).dim()
            );
        }

        for failure in &report.failed {
            print_failure(failure);
        }

        print_skipped(&report.skipped);

        println!();
        if report.is_success() {
            println!(
                "  {}",
                style(format!(
                    "Applied {} migration(s) in batch {}",
                    report.applied.len(),
                    report.batch.unwrap_or_default()
                ))
                .green()
                .bold()
            );
        } else {
            println!(
                "  {}",
                style(format!(
                    "{} migration(s) failed, {} applied",
                    report.failed.len(),
                    report.applied.len()
                ))
                .red()
                .bold()
            );
        }
        println!();

        Ok(Outcome::from_success(report.is_success()))
    }
}
