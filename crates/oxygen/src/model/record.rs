use super::Attributes;

use oxygen_core::{Row, Value};

use std::{any::Any, collections::HashMap, fmt};

/// State behind every model instance: current attributes, the attributes
/// as last loaded or saved, whether a database row backs the instance, and
/// the relations resolved so far.
#[derive(Default)]
pub struct Record {
    attributes: Attributes,
    original: Attributes,
    exists: bool,
    relations: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate from a fetched row. Values are copied verbatim.
    pub fn from_row(row: Row) -> Self {
        let attributes: Attributes = row.into_columns();
        Self {
            original: attributes.clone(),
            attributes,
            exists: true,
            relations: HashMap::new(),
        }
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.attributes.shift_remove(key)
    }

    pub fn original(&self, key: &str) -> Option<&Value> {
        self.original.get(key)
    }

    /// Attributes that differ from the last load or save.
    pub fn dirty(&self) -> Attributes {
        self.attributes
            .iter()
            .filter(|(key, value)| self.original.get(key.as_str()) != Some(*value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    pub fn is_dirty(&self) -> bool {
        self.attributes
            .iter()
            .any(|(key, value)| self.original.get(key.as_str()) != Some(value))
    }

    /// Mark the current attributes as persisted.
    pub(crate) fn sync_original(&mut self) {
        self.original = self.attributes.clone();
        self.exists = true;
    }

    /// Replace the attributes with a freshly fetched row, keeping cached
    /// relations.
    pub(crate) fn reload(&mut self, row: Row) {
        self.attributes = row.into_columns();
        self.sync_original();
    }

    pub(crate) fn mark_deleted(&mut self) {
        self.exists = false;
    }

    pub fn relation_loaded(&self, name: &str) -> bool {
        self.relations.contains_key(name)
    }

    /// The cached value of relation `name`, if it was loaded as a `T`.
    pub fn relation<T: 'static>(&self, name: &str) -> Option<&T> {
        self.relations.get(name)?.downcast_ref()
    }

    pub fn set_relation<T: Send + Sync + 'static>(&mut self, name: impl Into<String>, value: T) {
        self.relations.insert(name.into(), Box::new(value));
    }

    /// Drop a cached relation so the next access queries again.
    pub fn unset_relation(&mut self, name: &str) {
        self.relations.remove(name);
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut relations: Vec<&String> = self.relations.keys().collect();
        relations.sort();

        f.debug_struct("Record")
            .field("attributes", &self.attributes)
            .field("exists", &self.exists)
            .field("relations", &relations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirty_tracking() {
        let mut row = Row::new();
        row.insert("id", 1);
        row.insert("title", "Hello");

        let mut record = Record::from_row(row);
        assert!(record.exists());
        assert!(!record.is_dirty());

        record.set("title", "Hello");
        assert!(!record.is_dirty());

        record.set("title", "Bye");
        record.set("body", "new");
        let dirty = record.dirty();
        assert_eq!(dirty.len(), 2);
        assert_eq!(dirty.get("title"), Some(&Value::from("Bye")));

        record.sync_original();
        assert!(!record.is_dirty());
    }

    #[test]
    fn relation_cache() {
        let mut record = Record::new();
        assert!(!record.relation_loaded("posts"));

        record.set_relation("posts", vec![1_i64, 2]);
        assert_eq!(record.relation::<Vec<i64>>("posts"), Some(&vec![1, 2]));
        assert_eq!(record.relation::<String>("posts"), None);

        record.unset_relation("posts");
        assert!(!record.relation_loaded("posts"));
    }
}
