use super::{Error, ErrorKind};

/// The schema builder was used incorrectly, e.g. a modifier was applied before
/// any column was added.
#[derive(Debug)]
pub(super) struct SchemaBuilderError {
    table: Box<str>,
    message: Box<str>,
}

impl std::error::Error for SchemaBuilderError {}

impl core::fmt::Display for SchemaBuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "schema builder error on `{}`: {}", self.table, self.message)
    }
}

impl Error {
    /// Creates a schema builder error for the given table.
    pub fn schema_builder(table: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(ErrorKind::SchemaBuilder(SchemaBuilderError {
            table: table.into().into_boxed_str(),
            message: message.into().into_boxed_str(),
        }))
    }

    /// Returns `true` if this error is a schema builder error.
    pub fn is_schema_builder(&self) -> bool {
        matches!(self.kind(), ErrorKind::SchemaBuilder(_))
    }
}
