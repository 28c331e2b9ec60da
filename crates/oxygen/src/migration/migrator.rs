use super::{
    FailedMigration, FailurePolicy, MigrateReport, MigrationSource, MigrationStatus, Repository,
    RollbackReport,
};
use crate::{config::MigrationConfig, Db};

use oxygen_core::{Error, Phase, Result};
use oxygen_sql::Schema;
use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

/// Applies and reverts migrations from a [`MigrationSource`].
///
/// Statements run one at a time without a surrounding transaction. A
/// migration that fails midway leaves the statements that already succeeded
/// in place, and is not recorded.
#[derive(Clone)]
pub struct Migrator {
    db: Db,
    source: Arc<dyn MigrationSource>,
    repository: Repository,
    on_failure: FailurePolicy,
}

impl Migrator {
    pub fn new(db: Db, source: impl MigrationSource + 'static) -> Self {
        Self::with_source(db, Arc::new(source))
    }

    pub fn with_source(db: Db, source: Arc<dyn MigrationSource>) -> Self {
        Self {
            repository: Repository::new(db.clone()),
            db,
            source,
            on_failure: FailurePolicy::default(),
        }
    }

    /// Apply the tracking table name and failure policy from `config`.
    pub fn configure(self, config: &MigrationConfig) -> Self {
        self.table(config.table.clone()).on_failure(config.on_failure)
    }

    pub fn on_failure(mut self, policy: FailurePolicy) -> Self {
        self.on_failure = policy;
        self
    }

    /// Use `table` instead of `migrations` to track what has run.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.repository = Repository::with_table(self.db.clone(), table);
        self
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.on_failure
    }

    /// Names of migrations not yet recorded, sorted by name.
    pub async fn pending(&self) -> Result<Vec<String>> {
        self.repository.ensure_table().await?;

        let ran: HashSet<String> = self
            .repository
            .ran()
            .await?
            .into_iter()
            .map(|record| record.name)
            .collect();

        Ok(self
            .listed()?
            .into_iter()
            .filter(|name| !ran.contains(name))
            .collect())
    }

    /// Run every pending migration as one new batch.
    pub async fn migrate(&self) -> Result<MigrateReport> {
        let pending = self.pending().await?;

        if pending.is_empty() {
            tracing::info!("nothing to migrate");
            return Ok(MigrateReport::default());
        }

        let batch = self.repository.last_batch().await?.map_or(1, |last| last + 1);
        let mut report = MigrateReport {
            batch: Some(batch),
            ..MigrateReport::default()
        };

        let mut pending = pending.into_iter();

        while let Some(name) = pending.next() {
            match self.run_up(&name, batch).await {
                Ok(()) => {
                    tracing::info!(migration = %name, batch, "migrated");
                    report.applied.push(name);
                }
                Err(error) => {
                    tracing::warn!(migration = %name, %error, "migration failed");
                    report.failed.push(FailedMigration { name, error });

                    if self.on_failure == FailurePolicy::Abort {
                        report.skipped.extend(pending.by_ref());
                        break;
                    }
                }
            }
        }

        tracing::info!(
            batch,
            applied = report.applied.len(),
            failed = report.failed.len(),
            skipped = report.skipped.len(),
            "migration batch finished"
        );

        Ok(report)
    }

    /// Revert the most recent batch, newest migration first.
    ///
    /// A migration whose `down()` fails keeps its tracking row, so a later
    /// rollback will try it again.
    pub async fn rollback(&self) -> Result<RollbackReport> {
        self.repository.ensure_table().await?;

        let Some(batch) = self.repository.last_batch().await? else {
            tracing::info!("nothing to roll back");
            return Ok(RollbackReport::default());
        };

        let mut report = RollbackReport {
            batch: Some(batch),
            ..RollbackReport::default()
        };

        let mut names = self.repository.batch(batch).await?.into_iter();

        while let Some(name) = names.next() {
            match self.run_down(&name).await {
                Ok(()) => {
                    tracing::info!(migration = %name, batch, "rolled back");
                    report.rolled_back.push(name);
                }
                Err(error) => {
                    tracing::warn!(migration = %name, %error, "rollback failed");
                    report.failed.push(FailedMigration { name, error });

                    if self.on_failure == FailurePolicy::Abort {
                        report.skipped.extend(names.by_ref());
                        break;
                    }
                }
            }
        }

        Ok(report)
    }

    /// Roll back every batch, newest first.
    ///
    /// Stops after the first batch that fails to roll back completely.
    pub async fn reset(&self) -> Result<Vec<RollbackReport>> {
        let mut reports = vec![];

        loop {
            let report = self.rollback().await?;

            if report.batch.is_none() {
                break;
            }

            let done = !report.is_success() || report.rolled_back.is_empty();
            reports.push(report);

            if done {
                break;
            }
        }

        Ok(reports)
    }

    /// Every migration known to the source or the tracking table, sorted by
    /// name, with the batch it ran in.
    pub async fn status(&self) -> Result<Vec<MigrationStatus>> {
        self.repository.ensure_table().await?;

        let mut status: BTreeMap<String, Option<i64>> = self
            .listed()?
            .into_iter()
            .map(|name| (name, None))
            .collect();

        for record in self.repository.ran().await? {
            status.insert(record.name, Some(record.batch));
        }

        Ok(status
            .into_iter()
            .map(|(name, batch)| MigrationStatus { name, batch })
            .collect())
    }

    fn listed(&self) -> Result<Vec<String>> {
        let mut names = self.source.names()?;
        names.sort();
        names.dedup();
        Ok(names)
    }

    async fn run_up(&self, name: &str, batch: i64) -> Result<()> {
        self.apply(name, Phase::Up)
            .await
            .map_err(|err| err.context(Error::migration(name, Phase::Up)))?;

        self.repository.log(name, batch).await
    }

    async fn run_down(&self, name: &str) -> Result<()> {
        self.apply(name, Phase::Down)
            .await
            .map_err(|err| err.context(Error::migration(name, Phase::Down)))?;

        self.repository.delete(name).await
    }

    async fn apply(&self, name: &str, phase: Phase) -> Result<()> {
        let migration = self.source.load(name)?;
        let mut schema = Schema::new(self.db.dialect());

        match phase {
            Phase::Up => migration.up(&mut schema)?,
            Phase::Down => migration.down(&mut schema)?,
        }

        for stmt in schema.statements() {
            self.db.exec(stmt.clone()).await?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for Migrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Migrator")
            .field("db", &self.db)
            .field("table", &self.repository.table())
            .field("on_failure", &self.on_failure)
            .finish()
    }
}
