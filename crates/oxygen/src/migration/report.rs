use oxygen_core::Error;

/// A migration that failed, with the error that stopped it.
#[derive(Debug, Clone)]
pub struct FailedMigration {
    pub name: String,
    pub error: Error,
}

/// Outcome of [`Migrator::migrate`](super::Migrator::migrate).
#[derive(Debug, Clone, Default)]
pub struct MigrateReport {
    /// Batch number assigned to this run, `None` when nothing was pending.
    pub batch: Option<i64>,

    /// Migrations applied and recorded, in order.
    pub applied: Vec<String>,

    pub failed: Vec<FailedMigration>,

    /// Pending migrations not attempted because an earlier one failed under
    /// [`FailurePolicy::Abort`](super::FailurePolicy::Abort).
    pub skipped: Vec<String>,
}

impl MigrateReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// `true` when there was nothing to migrate.
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty() && self.failed.is_empty() && self.skipped.is_empty()
    }
}

/// Outcome of [`Migrator::rollback`](super::Migrator::rollback).
#[derive(Debug, Clone, Default)]
pub struct RollbackReport {
    /// The batch that was rolled back, `None` when nothing had run.
    pub batch: Option<i64>,

    /// Migrations reverted and removed from the tracking table, newest first.
    pub rolled_back: Vec<String>,

    pub failed: Vec<FailedMigration>,

    pub skipped: Vec<String>,
}

impl RollbackReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.rolled_back.is_empty() && self.failed.is_empty() && self.skipped.is_empty()
    }
}

/// A known migration and the batch it ran in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub name: String,

    /// `None` while pending.
    pub batch: Option<i64>,
}

impl MigrationStatus {
    pub fn is_ran(&self) -> bool {
        self.batch.is_some()
    }
}
