use super::Model;
use crate::Db;

use oxygen_core::{Dialect, Error, Result, Value};
use oxygen_sql::{
    stmt::{Condition, Delete, Direction, OrderBy, Projection, Select},
    Serializer,
};
use std::{fmt, marker::PhantomData};

/// Query builder for one model's table.
///
/// Conditions added with the `where_*` methods are joined with `AND`. An
/// unsupported operator does not fail immediately: the error is returned
/// when the query runs.
pub struct Query<M> {
    select: Select,
    error: Option<Error>,
    _model: PhantomData<fn() -> M>,
}

impl<M: Model> Query<M> {
    pub fn new() -> Self {
        Self {
            select: Select::new(M::table()),
            error: None,
            _model: PhantomData,
        }
    }

    pub fn where_(mut self, column: &str, op: &str, value: impl Into<Value>) -> Self {
        match op.parse() {
            Ok(op) => self
                .select
                .filter
                .push(Condition::compare(column, op, value)),
            Err(err) => {
                self.error.get_or_insert(err);
            }
        }
        self
    }

    pub fn where_eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.select.filter.push(Condition::eq(column, value));
        self
    }

    pub fn where_in<V: Into<Value>>(
        mut self,
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.select.filter.push(Condition::in_list(column, values));
        self
    }

    pub fn where_not_in<V: Into<Value>>(
        mut self,
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.select.filter.push(Condition::NotIn {
            column: column.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn where_null(self, column: &str) -> Self {
        self.where_eq(column, Value::Null)
    }

    pub fn order_by(mut self, column: &str, direction: Direction) -> Self {
        self.select.order_by.push(OrderBy {
            column: column.to_string(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.select.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.select.offset = Some(offset);
        self
    }

    pub async fn get(self, db: &Db) -> Result<Vec<M>> {
        let select = self.into_select()?;
        let rows = db.fetch(select).await?;
        Ok(rows.into_iter().map(M::hydrate).collect())
    }

    pub async fn first(self, db: &Db) -> Result<Option<M>> {
        let models = self.limit(1).get(db).await?;
        Ok(models.into_iter().next())
    }

    pub async fn count(self, db: &Db) -> Result<u64> {
        let mut select = self.into_select()?;
        select.projection = Projection::Count;
        select.order_by.clear();

        let rows = db.fetch(select).await?;
        let count = match rows.first().and_then(|row| row.get_index(0)) {
            Some(value) => value.to_i64()?,
            None => 0,
        };
        Ok(count as u64)
    }

    /// Delete every matching row.
    pub async fn delete(self, db: &Db) -> Result<u64> {
        let select = self.into_select()?;
        let stmt = Delete {
            table: select.table,
            filter: select.filter,
        };
        Ok(db.exec(stmt).await?.rows_affected)
    }

    /// The SQL and bound values this query would run.
    pub fn to_sql(&self, dialect: Dialect) -> Result<(String, Vec<Value>)> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        let mut params: Vec<Value> = vec![];
        let sql = Serializer::new(dialect).serialize(&self.select.clone().into(), &mut params);
        Ok((sql, params))
    }

    pub(crate) fn into_select(self) -> Result<Select> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.select),
        }
    }
}

impl<M: Model> Default for Query<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for Query<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("select", &self.select)
            .field("error", &self.error)
            .finish()
    }
}
