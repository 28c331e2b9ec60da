//! Relationships between models.
//!
//! A [`Relation`] describes how two tables are linked. Resolving it for an
//! owner issues fresh queries; [`Relation::get`] memoizes the result in the
//! owner's relation cache, so each relation costs one round trip per
//! instance (two for `BelongsToMany`). [`Relation::eager_load`] fills the
//! cache of many owners at once.

use crate::{Db, Model};

use oxygen_core::{err, Result, Row, Value};
use oxygen_sql::stmt::{Condition, Select};
use std::{collections::HashMap, fmt, marker::PhantomData, slice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// The owner holds the related model's key.
    BelongsTo,
    HasOne,
    HasMany,
    /// Linked through a pivot table.
    BelongsToMany,
}

pub struct Relation<R> {
    kind: RelationKind,

    /// Key in the relation cache.
    name: String,

    /// `BelongsTo`: column on the owner. `HasOne`/`HasMany`: column on the
    /// related table. `BelongsToMany`: unused, see `pivot`.
    foreign_key: String,

    /// `BelongsTo`: column on the related table the foreign key points at.
    /// Otherwise: column on the owner the related rows point at.
    local_key: String,

    pivot: Option<Pivot>,

    _related: PhantomData<fn() -> R>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pivot {
    table: String,
    /// Pivot column holding the owner's key.
    foreign_pivot_key: String,
    /// Pivot column holding the related model's key.
    related_pivot_key: String,
}

/// A resolved relation.
#[derive(Debug)]
pub enum Related<R> {
    One(Option<R>),
    Many(Vec<R>),
}

impl<R> Related<R> {
    /// The single related model, or the first of many.
    pub fn as_one(&self) -> Option<&R> {
        match self {
            Related::One(model) => model.as_ref(),
            Related::Many(models) => models.first(),
        }
    }

    pub fn as_slice(&self) -> &[R] {
        match self {
            Related::One(Some(model)) => slice::from_ref(model),
            Related::One(None) => &[],
            Related::Many(models) => models,
        }
    }

    pub fn into_vec(self) -> Vec<R> {
        match self {
            Related::One(model) => model.into_iter().collect(),
            Related::Many(models) => models,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl<R: Model> Relation<R> {
    pub(crate) fn new(
        kind: RelationKind,
        name: &str,
        foreign_key: impl Into<String>,
        local_key: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.to_string(),
            foreign_key: foreign_key.into(),
            local_key: local_key.into(),
            pivot: None,
            _related: PhantomData,
        }
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Override the foreign key column.
    pub fn foreign_key(mut self, column: impl Into<String>) -> Self {
        self.foreign_key = column.into();
        self
    }

    /// Override the owner key (`BelongsTo`) or local key (other kinds).
    pub fn local_key(mut self, column: impl Into<String>) -> Self {
        self.local_key = column.into();
        self
    }

    /// Override the pivot table and its two key columns.
    pub fn pivot(
        mut self,
        table: impl Into<String>,
        foreign_pivot_key: impl Into<String>,
        related_pivot_key: impl Into<String>,
    ) -> Self {
        self.pivot = Some(Pivot {
            table: table.into(),
            foreign_pivot_key: foreign_pivot_key.into(),
            related_pivot_key: related_pivot_key.into(),
        });
        self
    }

    /// The relation for `owner`, from the cache when it was loaded before.
    pub async fn get<'a, O: Model>(&self, db: &Db, owner: &'a mut O) -> Result<&'a Related<R>> {
        if !owner.record().relation_loaded(&self.name) {
            let related = self.resolve(db, &*owner).await?;
            owner.record_mut().set_relation(&self.name, related);
        }

        owner
            .record()
            .relation::<Related<R>>(&self.name)
            .ok_or_else(|| {
                err!(
                    "relation `{}` on `{}` is cached as a different model",
                    self.name,
                    O::name()
                )
            })
    }

    /// Query the relation for `owner`, bypassing the cache.
    ///
    /// An owner whose key is unset resolves to nothing without a query.
    pub async fn resolve<O: Model>(&self, db: &Db, owner: &O) -> Result<Related<R>> {
        match self.kind {
            RelationKind::BelongsTo => {
                let Some(key) = key_of(owner.record().get(&self.foreign_key)) else {
                    return Ok(Related::One(None));
                };

                let related = R::query()
                    .where_eq(&self.local_key, key)
                    .first(db)
                    .await?;
                Ok(Related::One(related))
            }
            RelationKind::HasOne => {
                let Some(key) = key_of(owner.record().get(&self.local_key)) else {
                    return Ok(Related::One(None));
                };

                let related = R::query()
                    .where_eq(&self.foreign_key, key)
                    .first(db)
                    .await?;
                Ok(Related::One(related))
            }
            RelationKind::HasMany => {
                let Some(key) = key_of(owner.record().get(&self.local_key)) else {
                    return Ok(Related::Many(vec![]));
                };

                let related = R::query().where_eq(&self.foreign_key, key).get(db).await?;
                Ok(Related::Many(related))
            }
            RelationKind::BelongsToMany => {
                let Some(key) = key_of(owner.record().get(&self.local_key)) else {
                    return Ok(Related::Many(vec![]));
                };

                let pivot = self.pivot_table()?;
                let select = Select::new(&pivot.table)
                    .columns([&pivot.related_pivot_key])
                    .filter(Condition::eq(&pivot.foreign_pivot_key, key));

                let ids: Vec<Value> = db
                    .fetch(select)
                    .await?
                    .iter()
                    .filter_map(|row| key_of(row.get(&pivot.related_pivot_key)))
                    .collect();

                if ids.is_empty() {
                    return Ok(Related::Many(vec![]));
                }

                let related = R::query().where_in(R::PRIMARY_KEY, ids).get(db).await?;
                Ok(Related::Many(related))
            }
        }
    }

    /// Resolve the relation for every owner with one query (two for
    /// `BelongsToMany`) and store each result in its owner's cache.
    pub async fn eager_load<O: Model>(&self, db: &Db, owners: &mut [O]) -> Result<()> {
        if owners.is_empty() {
            return Ok(());
        }

        let owner_column = match self.kind {
            RelationKind::BelongsTo => &self.foreign_key,
            _ => &self.local_key,
        };

        let keys = unique_keys(
            owners
                .iter()
                .filter_map(|owner| key_of(owner.record().get(owner_column))),
        );

        let results = match self.kind {
            RelationKind::BelongsTo => self.eager_rows(db, &self.local_key, keys).await?,
            RelationKind::HasOne | RelationKind::HasMany => {
                self.eager_rows(db, &self.foreign_key, keys).await?
            }
            RelationKind::BelongsToMany => self.eager_pivot(db, keys).await?,
        };

        for owner in owners.iter_mut() {
            let rows = owner
                .record()
                .get(owner_column)
                .and_then(key_string)
                .and_then(|key| results.get(&key))
                .cloned()
                .unwrap_or_default();

            let related = match self.kind {
                RelationKind::BelongsTo | RelationKind::HasOne => {
                    Related::One(rows.into_iter().next().map(R::hydrate))
                }
                RelationKind::HasMany | RelationKind::BelongsToMany => {
                    Related::Many(rows.into_iter().map(R::hydrate).collect())
                }
            };

            owner.record_mut().set_relation(&self.name, related);
        }

        Ok(())
    }

    /// Rows of `R` whose `column` is one of `keys`, grouped by that column.
    async fn eager_rows(
        &self,
        db: &Db,
        column: &str,
        keys: Vec<Value>,
    ) -> Result<HashMap<String, Vec<Row>>> {
        let mut grouped: HashMap<String, Vec<Row>> = HashMap::new();

        if keys.is_empty() {
            return Ok(grouped);
        }

        let select = R::query().where_in(column, keys).into_select()?;

        for row in db.fetch(select).await? {
            if let Some(key) = row.get(column).and_then(key_string) {
                grouped.entry(key).or_default().push(row);
            }
        }

        Ok(grouped)
    }

    /// Rows of `R` linked to each owner key through the pivot table. A
    /// related row is cloned for every owner it is linked to.
    async fn eager_pivot(&self, db: &Db, keys: Vec<Value>) -> Result<HashMap<String, Vec<Row>>> {
        let mut grouped: HashMap<String, Vec<Row>> = HashMap::new();

        if keys.is_empty() {
            return Ok(grouped);
        }

        let pivot = self.pivot_table()?;
        let select = Select::new(&pivot.table)
            .columns([&pivot.foreign_pivot_key, &pivot.related_pivot_key])
            .filter(Condition::in_list(&pivot.foreign_pivot_key, keys));

        let links: Vec<(String, Value)> = db
            .fetch(select)
            .await?
            .iter()
            .filter_map(|row| {
                let owner = row.get(&pivot.foreign_pivot_key).and_then(key_string)?;
                let related = key_of(row.get(&pivot.related_pivot_key))?;
                Some((owner, related))
            })
            .collect();

        let ids = unique_keys(links.iter().map(|(_, related)| related.clone()));
        let related = self.eager_rows(db, R::PRIMARY_KEY, ids).await?;

        for (owner, related_key) in links {
            let rows = key_string(&related_key)
                .and_then(|key| related.get(&key))
                .into_iter()
                .flatten()
                .cloned();
            grouped.entry(owner).or_default().extend(rows);
        }

        Ok(grouped)
    }

    fn pivot_table(&self) -> Result<&Pivot> {
        self.pivot
            .as_ref()
            .ok_or_else(|| err!("relation `{}` has no pivot table", self.name))
    }
}

impl<R> fmt::Debug for Relation<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relation")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("foreign_key", &self.foreign_key)
            .field("local_key", &self.local_key)
            .field("pivot", &self.pivot)
            .finish()
    }
}

/// A usable key value: present and not `NULL`.
fn key_of(value: Option<&Value>) -> Option<Value> {
    value.filter(|value| !value.is_null()).cloned()
}

/// Keys are compared in text form so an integer key matches the same
/// number read back as text.
fn key_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::I64(v) => Some(v.to_string()),
        Value::String(v) => Some(v.clone()),
        Value::Bool(v) => Some(i64::from(*v).to_string()),
        Value::F64(v) => Some(v.to_string()),
        other => Some(format!("{other:?}")),
    }
}

fn unique_keys(keys: impl Iterator<Item = Value>) -> Vec<Value> {
    let mut seen = std::collections::HashSet::new();
    keys.filter(|key| key_string(key).is_some_and(|key| seen.insert(key)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_compare_as_text() {
        assert_eq!(key_string(&Value::I64(3)), Some("3".to_string()));
        assert_eq!(key_string(&Value::from("3")), Some("3".to_string()));
        assert_eq!(key_string(&Value::Null), None);

        let keys = unique_keys(
            vec![Value::I64(1), Value::from("1"), Value::I64(2), Value::Null].into_iter(),
        );
        assert_eq!(keys, vec![Value::I64(1), Value::I64(2)]);
    }

    #[test]
    fn related_accessors() {
        let one: Related<i32> = Related::One(Some(7));
        assert_eq!(one.as_one(), Some(&7));
        assert_eq!(one.as_slice(), &[7]);

        let none: Related<i32> = Related::One(None);
        assert!(none.is_empty());

        let many = Related::Many(vec![1, 2, 3]);
        assert_eq!(many.as_one(), Some(&1));
        assert_eq!(many.len(), 3);
        assert_eq!(many.into_vec(), vec![1, 2, 3]);
    }
}
