mod dialect;
pub use dialect::Dialect;

use crate::{async_trait, Result, Row, Value};

use std::{borrow::Cow, fmt::Debug};

/// Opens connections to one database.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Connection URL this driver was configured with.
    fn url(&self) -> Cow<'_, str>;

    /// SQL dialect spoken by the database.
    fn dialect(&self) -> Dialect;

    /// Open a new connection.
    async fn connect(&self) -> Result<Box<dyn Connection>>;
}

/// A single, exclusively-held database connection. Every statement is
/// auto-committed unless the caller issues explicit transaction statements.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    fn dialect(&self) -> Dialect;

    /// Run a statement that returns rows.
    async fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>>;

    /// Run a statement that does not return rows.
    async fn execute(&mut self, sql: &str, params: &[Value]) -> Result<ExecResult>;
}

/// Outcome of [`Connection::execute`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// Number of rows impacted by the statement
    pub rows_affected: u64,

    /// Key assigned by the database to the last inserted row, when the
    /// statement was an `INSERT` into a table with an auto-increment key.
    pub last_insert_id: Option<i64>,
}

impl ExecResult {
    pub fn count(rows_affected: u64) -> Self {
        Self {
            rows_affected,
            last_insert_id: None,
        }
    }
}
