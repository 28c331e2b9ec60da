mod value;
use value::Value;

use oxygen_core::{
    async_trait,
    driver::{Dialect, Driver, ExecResult},
    Error, Result, Row,
};
use rusqlite::Connection as RusqliteConnection;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str)
            .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url_str}")))?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={}",
                url_str
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    /// Each in-memory connection is a fresh, empty database.
    async fn connect(&self) -> Result<Box<dyn oxygen_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::query)?;
        Self::init(connection)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::query)?;
        Self::init(connection)
    }

    fn init(connection: RusqliteConnection) -> Result<Self> {
        connection
            .execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(Error::query)?;
        Ok(Self { connection })
    }
}

#[async_trait]
impl oxygen_core::Connection for Connection {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn query(&mut self, sql: &str, params: &[oxygen_core::Value]) -> Result<Vec<Row>> {
        let mut stmt = self.connection.prepare(sql).map_err(Error::query)?;

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter().map(Value)))
            .map_err(Error::query)?;

        let mut ret = vec![];

        while let Some(row) = rows.next().map_err(Error::query)? {
            let mut record = Row::new();

            for (index, column) in columns.iter().enumerate() {
                let value = row.get_ref(index).map_err(Error::query)?;
                record.insert(column.clone(), Value::from_sql(value));
            }

            ret.push(record);
        }

        Ok(ret)
    }

    async fn execute(&mut self, sql: &str, params: &[oxygen_core::Value]) -> Result<ExecResult> {
        // Parameterless SQL may hold several statements, e.g. a `.sql`
        // migration file.
        if params.is_empty() {
            self.connection.execute_batch(sql).map_err(Error::query)?;
        } else {
            self.connection
                .execute(sql, rusqlite::params_from_iter(params.iter().map(Value)))
                .map_err(Error::query)?;
        }

        let last_insert_id = is_insert(sql).then(|| self.connection.last_insert_rowid());

        Ok(ExecResult {
            rows_affected: self.connection.changes() as u64,
            last_insert_id,
        })
    }
}

fn is_insert(sql: &str) -> bool {
    sql.trim_start()
        .get(..6)
        .is_some_and(|keyword| keyword.eq_ignore_ascii_case("insert"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxygen_core::{Connection as _, Value as CoreValue};

    #[test]
    fn parse_url() {
        assert!(matches!(
            Sqlite::new("sqlite::memory:").unwrap(),
            Sqlite::InMemory
        ));
        assert!(matches!(
            Sqlite::new("sqlite:///tmp/app.db").unwrap(),
            Sqlite::File(path) if path == Path::new("/tmp/app.db")
        ));
        assert!(Sqlite::new("mysql://localhost/app")
            .unwrap_err()
            .is_invalid_connection_url());
    }

    #[tokio::test]
    async fn insert_and_query() {
        let mut conn = Connection::in_memory().unwrap();

        conn.execute(
            "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT, active INTEGER)",
            &[],
        )
        .await
        .unwrap();

        let res = conn
            .execute(
                "INSERT INTO users (name, active) VALUES (?1, ?2)",
                &[CoreValue::from("Ada"), CoreValue::Bool(true)],
            )
            .await
            .unwrap();
        assert_eq!(res.rows_affected, 1);
        assert_eq!(res.last_insert_id, Some(1));

        let rows = conn
            .query("SELECT * FROM users WHERE id = ?1", &[CoreValue::I64(1)])
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some(&CoreValue::from("Ada")));
        assert_eq!(rows[0].get("active"), Some(&CoreValue::I64(1)));
    }

    #[tokio::test]
    async fn errors_are_query_errors() {
        let mut conn = Connection::in_memory().unwrap();

        let err = conn.query("SELECT * FROM missing", &[]).await.unwrap_err();
        assert!(err.is_query());
        assert!(err.to_string().contains("no such table"));
    }

    #[tokio::test]
    async fn file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let driver = Sqlite::open(dir.path().join("app.db"));

        let mut conn = driver.connect().await.unwrap();
        conn.execute("CREATE TABLE t (x INTEGER)", &[]).await.unwrap();
        drop(conn);

        let mut conn = driver.connect().await.unwrap();
        let rows = conn.query("SELECT * FROM t", &[]).await.unwrap();
        assert!(rows.is_empty());
    }
}
