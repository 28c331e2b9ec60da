//! Schema migrations.
//!
//! A [`Migration`] describes a schema change and how to revert it. A
//! [`MigrationSource`] lists migrations by file-style name
//! (`20240101000000_create_widgets_table.sql`), and the [`Migrator`] applies
//! pending ones in name order, recording each in the `migrations` table
//! under a batch number shared by one run.

mod directory;
pub use directory::Directory;

mod migrator;
pub use migrator::Migrator;

mod registry;
pub use registry::Registry;

mod report;
pub use report::{FailedMigration, MigrateReport, MigrationStatus, RollbackReport};

mod repository;
pub use repository::{MigrationRecord, Repository, DEFAULT_TABLE};

mod source;
pub use source::MigrationSource;

mod sql_migration;
pub use sql_migration::SqlMigration;

use crate::inflect;

use oxygen_core::Result;
use oxygen_sql::Schema;
use serde::{Deserialize, Serialize};

/// A reversible schema change.
pub trait Migration: Send + Sync {
    fn up(&self, schema: &mut Schema) -> Result<()>;

    fn down(&self, schema: &mut Schema) -> Result<()>;
}

/// What the migrator does when one migration fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Record the failure and go on with the next migration. Earlier
    /// migrations of the batch stay applied.
    #[default]
    Continue,

    /// Stop at the first failure. Remaining migrations stay pending.
    Abort,
}

/// Whether `file_name` follows the `{timestamp}_{description}.{ext}` layout
/// of a migration file.
pub fn is_migration_file(file_name: &str) -> bool {
    let Some((stem, ext)) = file_name.rsplit_once('.') else {
        return false;
    };

    let Some((timestamp, description)) = stem.split_once('_') else {
        return false;
    };

    !ext.is_empty()
        && !timestamp.is_empty()
        && timestamp.chars().all(|c| c.is_ascii_digit())
        && !class_name(description).is_empty()
}

/// Type name a migration file resolves to: the leading numeric segments and
/// the extension are dropped and the rest is StudlyCased.
///
/// `20240101000000_create_widgets_table.php` -> `CreateWidgetsTable`,
/// `2024_01_01_000000_create_users_table.php` -> `CreateUsersTable`.
pub fn class_name(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    };

    let description: Vec<&str> = stem
        .split('_')
        .skip_while(|segment| !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()))
        .collect();

    inflect::studly(&description.join("_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names() {
        assert_eq!(
            class_name("20240101000000_create_widgets_table.php"),
            "CreateWidgetsTable"
        );
        assert_eq!(
            class_name("2024_01_01_000000_create_users_table.php"),
            "CreateUsersTable"
        );
        assert_eq!(class_name("0001_add_index.sql"), "AddIndex");
        assert_eq!(class_name("create_posts"), "CreatePosts");
    }

    #[test]
    fn migration_file_names() {
        assert!(is_migration_file("20240101000000_create_widgets_table.php"));
        assert!(is_migration_file("2024_01_01_000000_create_users_table.php"));
        assert!(is_migration_file("0001_add_index.sql"));

        assert!(!is_migration_file("README.md"));
        assert!(!is_migration_file("notes_2024.txt"));
        assert!(!is_migration_file("0001_create_a"));
        assert!(!is_migration_file("0001_.sql"));
        assert!(!is_migration_file("20240101000000.sql"));
    }

    #[test]
    fn parse_failure_policy() {
        #[derive(Deserialize)]
        struct Wrapper {
            on_failure: FailurePolicy,
        }

        let wrapper: Wrapper = toml::from_str("on_failure = \"abort\"").unwrap();
        assert_eq!(wrapper.on_failure, FailurePolicy::Abort);
        assert_eq!(FailurePolicy::default(), FailurePolicy::Continue);
    }
}
