use super::Migration;

use oxygen_core::Result;
use std::sync::Arc;

/// Where migrations come from.
pub trait MigrationSource: Send + Sync {
    /// Names of every known migration, in any order.
    fn names(&self) -> Result<Vec<String>>;

    /// Load the migration registered under `name`.
    fn load(&self, name: &str) -> Result<Arc<dyn Migration>>;
}
