use super::{Error, ErrorKind};

/// Which half of a migration was running when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Up,
    Down,
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(match self {
            Phase::Up => "up",
            Phase::Down => "down",
        })
    }
}

/// A migration's `up()` or `down()` failed. The underlying failure is the
/// error's cause.
#[derive(Debug)]
pub(super) struct MigrationError {
    migration: Box<str>,
    phase: Phase,
}

impl std::error::Error for MigrationError {}

impl core::fmt::Display for MigrationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "migration `{}` failed during {}",
            self.migration, self.phase
        )
    }
}

impl Error {
    /// Creates a migration error. Attach it to the underlying failure with
    /// [`Error::context`].
    pub fn migration(migration: impl Into<String>, phase: Phase) -> Error {
        Error::from(ErrorKind::Migration(MigrationError {
            migration: migration.into().into_boxed_str(),
            phase,
        }))
    }

    /// Returns `true` if this error is a migration error.
    pub fn is_migration(&self) -> bool {
        matches!(self.kind(), ErrorKind::Migration(_))
    }
}
