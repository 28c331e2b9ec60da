use super::{Error, ErrorKind};

/// The database rejected a statement, or the statement could not be built.
#[derive(Debug)]
pub(super) struct QueryError {
    inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for QueryError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("query failed: ")?;
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates a query error from a driver error.
    ///
    /// This is the preferred way to convert driver-specific errors (rusqlite,
    /// mysql_async) into oxygen errors.
    pub fn query(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(ErrorKind::Query(QueryError {
            inner: Box::new(err),
        }))
    }

    /// Creates a query error from a message, for statements rejected before
    /// they reach the database.
    pub fn query_message(message: impl Into<String>) -> Error {
        let message: String = message.into();
        Error::from(ErrorKind::Query(QueryError {
            inner: message.into(),
        }))
    }

    /// Returns `true` if this error is a query error.
    pub fn is_query(&self) -> bool {
        matches!(self.kind(), ErrorKind::Query(_))
    }
}
