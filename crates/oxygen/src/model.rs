mod cast;
pub use cast::Cast;

mod macros;

mod query;
pub use query::Query;

mod record;
pub use record::Record;

use crate::{
    inflect,
    relation::{Relation, RelationKind},
    Db,
};

use chrono::Timelike;
use indexmap::IndexMap;
use oxygen_core::{Error, Result, Row, Value};
use oxygen_sql::stmt::{Condition, Delete, Insert, Select, Update};
use std::{any::type_name, borrow::Cow};

/// Column name to value, in insertion order.
pub type Attributes = IndexMap<String, Value>;

/// An active-record model.
///
/// Implementors are thin wrappers around a [`Record`]; everything else is
/// derived from the associated constants, which describe the table. The
/// [`model!`](crate::model!) macro writes the wrapper and the impl.
///
/// Every mutation is sent to the database immediately.
#[allow(async_fn_in_trait)]
pub trait Model: Sized + Send + Sync + 'static {
    /// Primary key column. The key is assigned by the database on insert.
    const PRIMARY_KEY: &'static str = "id";

    /// Attributes accepted by mass assignment (`create`, `fill`, `update`).
    const FILLABLE: &'static [&'static str] = &[];

    /// Attributes never accepted by mass assignment. When `FILLABLE` is
    /// empty, everything not guarded is fillable.
    const GUARDED: &'static [&'static str] = &[];

    /// Attributes left out of [`to_array`](Self::to_array) and
    /// [`to_json`](Self::to_json).
    const HIDDEN: &'static [&'static str] = &[];

    const CASTS: &'static [(&'static str, Cast)] = &[];

    /// Maintain `created_at` and `updated_at` on save.
    const TIMESTAMPS: bool = false;

    fn from_record(record: Record) -> Self;

    fn record(&self) -> &Record;

    fn record_mut(&mut self) -> &mut Record;

    /// Type name without its module path, e.g. `BlogPost`.
    fn name() -> &'static str {
        inflect::short_type_name(type_name::<Self>())
    }

    /// Table name. Defaults to the plural snake case of the type name:
    /// `BlogPost` -> `blog_posts`.
    fn table() -> Cow<'static, str> {
        Cow::Owned(inflect::plural(&inflect::snake(Self::name())))
    }

    /// Column other tables use to reference this model: `BlogPost` ->
    /// `blog_post_id`.
    fn foreign_key() -> String {
        format!("{}_{}", inflect::snake(Self::name()), Self::PRIMARY_KEY)
    }

    /// A fresh instance with no row behind it.
    fn new() -> Self {
        Self::from_record(Record::new())
    }

    fn hydrate(row: Row) -> Self {
        Self::from_record(Record::from_row(row))
    }

    fn query() -> Query<Self> {
        Query::new()
    }

    /// Returns `None` when no row has the key.
    async fn find(db: &Db, id: impl Into<Value>) -> Result<Option<Self>> {
        Self::query().where_eq(Self::PRIMARY_KEY, id).first(db).await
    }

    async fn find_or_fail(db: &Db, id: impl Into<Value>) -> Result<Self> {
        let id = id.into();

        match Self::find(db, id.clone()).await? {
            Some(model) => Ok(model),
            None => Err(Error::record_not_found(format!(
                "table={}; {}={:?}",
                Self::table(),
                Self::PRIMARY_KEY,
                id
            ))),
        }
    }

    /// Every row matching one comparison. `op` must be one of `=`, `!=`,
    /// `<>`, `<`, `<=`, `>`, `>=`, `LIKE`, `NOT LIKE`.
    async fn where_(
        db: &Db,
        column: &str,
        op: &str,
        value: impl Into<Value>,
    ) -> Result<Vec<Self>> {
        Self::query().where_(column, op, value).get(db).await
    }

    async fn all(db: &Db) -> Result<Vec<Self>> {
        Self::query().get(db).await
    }

    /// Insert a row built from the fillable subset of `attributes`.
    async fn create(db: &Db, attributes: Attributes) -> Result<Self> {
        let mut model = Self::new();
        model.fill(attributes);
        model.save(db).await?;
        Ok(model)
    }

    /// Mass-assign `attributes` to the row with key `id` and save it.
    /// Returns `None` when the row does not exist.
    async fn update(
        db: &Db,
        id: impl Into<Value>,
        attributes: Attributes,
    ) -> Result<Option<Self>> {
        let Some(mut model) = Self::find(db, id).await? else {
            return Ok(None);
        };

        model.fill(attributes);
        model.save(db).await?;
        Ok(Some(model))
    }

    /// Delete the row with key `id`, returning the number of deleted rows.
    async fn destroy(db: &Db, id: impl Into<Value>) -> Result<u64> {
        let stmt = Delete::new(Self::table()).filter(Condition::eq(Self::PRIMARY_KEY, id));
        Ok(db.exec(stmt).await?.rows_affected)
    }

    fn is_fillable(key: &str) -> bool {
        if Self::GUARDED.contains(&key) {
            return false;
        }

        if Self::FILLABLE.is_empty() {
            !Self::GUARDED.is_empty()
        } else {
            Self::FILLABLE.contains(&key)
        }
    }

    /// Mass assignment. Keys that are not fillable are dropped.
    fn fill(&mut self, attributes: Attributes) -> &mut Self {
        for (key, value) in attributes {
            if Self::is_fillable(&key) {
                self.record_mut().set(key, value);
            } else {
                tracing::trace!(
                    model = Self::name(),
                    key = %key,
                    "discarding non-fillable attribute"
                );
            }
        }
        self
    }

    fn key(&self) -> Option<&Value> {
        self.record().get(Self::PRIMARY_KEY).filter(|value| !value.is_null())
    }

    fn exists(&self) -> bool {
        self.record().exists()
    }

    fn cast_for(key: &str) -> Option<Cast> {
        Self::CASTS
            .iter()
            .find(|(column, _)| *column == key)
            .map(|(_, cast)| *cast)
    }

    /// Read an attribute, applying its cast. Missing attributes read as
    /// `NULL`.
    fn get(&self, key: &str) -> Result<Value> {
        let raw = self.record().get(key).cloned().unwrap_or_default();

        match Self::cast_for(key) {
            Some(cast) => cast.apply(&raw),
            None => Ok(raw),
        }
    }

    /// Set one attribute, bypassing mass-assignment rules.
    fn set(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.record_mut().set(key, value);
        self
    }

    fn is_dirty(&self) -> bool {
        self.record().is_dirty()
    }

    /// `INSERT` when the instance has no row yet, otherwise `UPDATE` of the
    /// dirty attributes only. Saving a clean, existing instance is a no-op.
    async fn save(&mut self, db: &Db) -> Result<()> {
        let exists = self.exists();

        if exists && !self.is_dirty() {
            return Ok(());
        }

        if Self::TIMESTAMPS {
            let now = Value::DateTime(now());
            if !exists && self.record().get("created_at").is_none() {
                self.record_mut().set("created_at", now.clone());
            }
            self.record_mut().set("updated_at", now);
        }

        if exists {
            let key = self.key().cloned().ok_or_else(|| {
                Error::query_message(format!(
                    "cannot update a `{}` without a `{}`",
                    Self::name(),
                    Self::PRIMARY_KEY
                ))
            })?;

            let stmt = Update::new(Self::table(), self.record().dirty())
                .filter(Condition::eq(Self::PRIMARY_KEY, key));
            db.exec(stmt).await?;
        } else {
            let stmt = Insert::new(Self::table(), self.record().attributes().clone());
            let res = db.exec(stmt).await?;

            if self.key().is_none() {
                if let Some(id) = res.last_insert_id {
                    self.record_mut().set(Self::PRIMARY_KEY, id);
                }
            }
        }

        self.record_mut().sync_original();
        Ok(())
    }

    /// Delete this instance's row. Returns `false` when there was none.
    async fn delete(&mut self, db: &Db) -> Result<bool> {
        let Some(key) = self.key().cloned().filter(|_| self.exists()) else {
            return Ok(false);
        };

        let stmt = Delete::new(Self::table()).filter(Condition::eq(Self::PRIMARY_KEY, key));
        let res = db.exec(stmt).await?;
        self.record_mut().mark_deleted();
        Ok(res.rows_affected > 0)
    }

    /// Reload the attributes from the database, discarding unsaved changes.
    async fn refresh(&mut self, db: &Db) -> Result<()> {
        let Some(key) = self.key().cloned() else {
            return Err(Error::record_not_found(format!(
                "cannot refresh a `{}` without a `{}`",
                Self::name(),
                Self::PRIMARY_KEY
            )));
        };

        let stmt = Select::new(Self::table())
            .filter(Condition::eq(Self::PRIMARY_KEY, key.clone()))
            .limit(1);

        match db.fetch(stmt).await?.into_iter().next() {
            Some(row) => {
                self.record_mut().reload(row);
                Ok(())
            }
            None => Err(Error::record_not_found(format!(
                "table={}; {}={:?}",
                Self::table(),
                Self::PRIMARY_KEY,
                key
            ))),
        }
    }

    /// Attributes with casts applied and hidden attributes removed. A value
    /// that fails its cast is returned raw.
    fn to_array(&self) -> Attributes {
        self.record()
            .attributes()
            .iter()
            .filter(|(key, _)| !Self::HIDDEN.contains(&key.as_str()))
            .map(|(key, raw)| {
                let value = Self::cast_for(key)
                    .and_then(|cast| cast.apply(raw).ok())
                    .unwrap_or_else(|| raw.clone());
                (key.clone(), value)
            })
            .collect()
    }

    fn to_json(&self) -> Result<serde_json::Value> {
        let mut map = serde_json::Map::new();
        for (key, value) in self.to_array() {
            map.insert(key, serde_json::to_value(value)?);
        }
        Ok(serde_json::Value::Object(map))
    }

    /// This model holds `R`'s key in `R::foreign_key()`.
    fn belongs_to<R: Model>(name: &str) -> Relation<R> {
        Relation::new(RelationKind::BelongsTo, name, R::foreign_key(), R::PRIMARY_KEY)
    }

    /// One `R` holds this model's key in `Self::foreign_key()`.
    fn has_one<R: Model>(name: &str) -> Relation<R> {
        Relation::new(RelationKind::HasOne, name, Self::foreign_key(), Self::PRIMARY_KEY)
    }

    /// Many `R`s hold this model's key in `Self::foreign_key()`.
    fn has_many<R: Model>(name: &str) -> Relation<R> {
        Relation::new(RelationKind::HasMany, name, Self::foreign_key(), Self::PRIMARY_KEY)
    }

    /// Linked through a pivot table named after both models in alphabetical
    /// order: `Role` and `User` -> `role_user`.
    fn belongs_to_many<R: Model>(name: &str) -> Relation<R> {
        let mut names = [inflect::snake(Self::name()), inflect::snake(R::name())];
        names.sort();

        Relation::new(
            RelationKind::BelongsToMany,
            name,
            Self::foreign_key(),
            Self::PRIMARY_KEY,
        )
        .pivot(names.join("_"), Self::foreign_key(), R::foreign_key())
    }
}

/// Current UTC time truncated to whole seconds, the precision the text
/// date-time format stores.
pub(crate) fn now() -> chrono::NaiveDateTime {
    let now = chrono::Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}
