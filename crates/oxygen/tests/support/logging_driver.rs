use oxygen_core::{
    async_trait,
    driver::{Connection, Dialect, Driver, ExecResult},
    Result, Row, Value,
};
use std::{
    borrow::Cow,
    sync::{Arc, Mutex},
};

/// Wraps a driver and records the SQL text of every statement its
/// connections run.
#[derive(Debug)]
pub struct LoggingDriver {
    inner: Box<dyn Driver>,
    log: QueryLog,
}

impl LoggingDriver {
    pub fn new(driver: Box<dyn Driver>) -> Self {
        Self {
            inner: driver,
            log: QueryLog::default(),
        }
    }

    /// Get a handle to access the statement log
    pub fn log_handle(&self) -> QueryLog {
        self.log.clone()
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    fn url(&self) -> Cow<'_, str> {
        self.inner.url()
    }

    fn dialect(&self) -> Dialect {
        self.inner.dialect()
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        Ok(Box::new(LoggingConnection {
            inner: self.inner.connect().await?,
            log: self.log.clone(),
        }))
    }
}

#[derive(Debug)]
pub struct LoggingConnection {
    inner: Box<dyn Connection>,
    log: QueryLog,
}

#[async_trait]
impl Connection for LoggingConnection {
    fn dialect(&self) -> Dialect {
        self.inner.dialect()
    }

    async fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        self.log.push(sql);
        self.inner.query(sql, params).await
    }

    async fn execute(&mut self, sql: &str, params: &[Value]) -> Result<ExecResult> {
        self.log.push(sql);
        self.inner.execute(sql, params).await
    }
}

/// Shared, clonable list of executed SQL.
#[derive(Debug, Clone, Default)]
pub struct QueryLog {
    statements: Arc<Mutex<Vec<String>>>,
}

impl QueryLog {
    fn push(&self, sql: &str) {
        self.statements
            .lock()
            .expect("Failed to acquire query log lock")
            .push(sql.to_string());
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements
            .lock()
            .expect("Failed to acquire query log lock")
            .clone()
    }

    pub fn len(&self) -> usize {
        self.statements
            .lock()
            .expect("Failed to acquire query log lock")
            .len()
    }

    pub fn clear(&self) {
        self.statements
            .lock()
            .expect("Failed to acquire query log lock")
            .clear();
    }

    /// Number of logged statements starting with `SELECT`.
    pub fn selects(&self) -> usize {
        self.statements()
            .iter()
            .filter(|sql| sql.starts_with("SELECT"))
            .count()
    }

    pub fn last(&self) -> Option<String> {
        self.statements().last().cloned()
    }
}
