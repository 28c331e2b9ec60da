use super::{header, print_failure, print_skipped};
use crate::Outcome;

use anyhow::Result;
use clap::Parser;
use console::style;
use oxygen::{migration::RollbackReport, Db, Migrator};

#[derive(Parser, Debug)]
pub struct RollbackCommand {}

impl RollbackCommand {
    pub(crate) async fn run(self, db: &Db, migrator: Migrator) -> Result<Outcome> {
        header("Roll Back Migrations", db);

        let report = migrator.rollback().await?;

        if report.batch.is_none() {
            println!("  {}", style("Nothing to roll back.").magenta().dim());
            println!();
            return Ok(Outcome::Success);
        }

        print_report(&report);
        println!();

        Ok(Outcome::from_success(report.is_success()))
    }
}

pub(super) fn print_report(report: &RollbackReport) {
    println!(
        "  {} Rolling back batch {}",
        style("→").cyan(),
        report.batch.unwrap_or_default()
    );

    for name in &report.rolled_back {
        println!(
            "  {} {}",
            style("✓").green().bold(),
            style(format!("Rolled back: {name}")).dim()
        );
    }

    for failure in &report.failed {
        print_failure(failure);
    }

    print_skipped(&report.skipped);
}
