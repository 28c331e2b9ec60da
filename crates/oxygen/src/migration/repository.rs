use crate::Db;

use indexmap::IndexMap;
use oxygen_core::{Result, Row, Value};
use oxygen_sql::{
    stmt::{Condition, Delete, Direction, Insert, Select},
    Schema,
};

/// Name of the tracking table unless configured otherwise.
pub const DEFAULT_TABLE: &str = "migrations";

/// One row of the tracking table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRecord {
    pub name: String,
    pub batch: i64,
}

/// Reads and writes the table recording which migrations have run.
#[derive(Debug, Clone)]
pub struct Repository {
    db: Db,
    table: String,
}

impl Repository {
    pub fn new(db: Db) -> Self {
        Self::with_table(db, DEFAULT_TABLE)
    }

    pub fn with_table(db: Db, table: impl Into<String>) -> Self {
        Self {
            db,
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Create the tracking table unless it already exists.
    pub async fn ensure_table(&self) -> Result<()> {
        let mut schema = Schema::new(self.db.dialect());

        schema.create_if_not_exists(&self.table, |table| {
            table.id();
            table.string("migration").unique()?;
            table.integer("batch");
            table.timestamp("executed_at").use_current()?;
            Ok(())
        })?;

        for stmt in schema.statements() {
            self.db.exec(stmt.clone()).await?;
        }

        Ok(())
    }

    /// Every tracked migration, in the order it was recorded.
    pub async fn ran(&self) -> Result<Vec<MigrationRecord>> {
        let select = Select::new(&self.table)
            .columns(["migration", "batch"])
            .order_by("id", Direction::Asc);

        self.db
            .fetch(select)
            .await?
            .iter()
            .map(record_from_row)
            .collect()
    }

    /// Highest recorded batch number.
    pub async fn last_batch(&self) -> Result<Option<i64>> {
        let select = Select::new(&self.table)
            .columns(["batch"])
            .order_by("batch", Direction::Desc)
            .limit(1);

        let rows = self.db.fetch(select).await?;

        match rows.first().and_then(|row| row.get("batch")) {
            Some(batch) => Ok(Some(batch.to_i64()?)),
            None => Ok(None),
        }
    }

    /// Names recorded under `batch`, most recently recorded first.
    pub async fn batch(&self, batch: i64) -> Result<Vec<String>> {
        let select = Select::new(&self.table)
            .columns(["migration", "batch"])
            .filter(Condition::eq("batch", batch))
            .order_by("id", Direction::Desc);

        self.db
            .fetch(select)
            .await?
            .iter()
            .map(|row| record_from_row(row).map(|record| record.name))
            .collect()
    }

    pub async fn log(&self, name: &str, batch: i64) -> Result<()> {
        let mut values = IndexMap::new();
        values.insert("migration".to_string(), Value::from(name));
        values.insert("batch".to_string(), Value::from(batch));
        values.insert("executed_at".to_string(), Value::from(crate::model::now()));

        self.db.exec(Insert::new(&self.table, values)).await?;
        Ok(())
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        let delete = Delete::new(&self.table).filter(Condition::eq("migration", name));
        self.db.exec(delete).await?;
        Ok(())
    }
}

fn record_from_row(row: &Row) -> Result<MigrationRecord> {
    let name = match row.get("migration") {
        Some(Value::String(name)) => name.clone(),
        Some(other) => return Err(oxygen_core::Error::type_conversion(other.clone(), "String")),
        None => oxygen_core::bail!("tracking row is missing the `migration` column"),
    };

    let batch = match row.get("batch") {
        Some(batch) => batch.to_i64()?,
        None => oxygen_core::bail!("tracking row is missing the `batch` column"),
    };

    Ok(MigrationRecord { name, batch })
}
