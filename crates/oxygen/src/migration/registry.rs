use super::{Migration, MigrationSource};

use indexmap::IndexMap;
use oxygen_core::{Error, Result};
use std::sync::Arc;

/// Migrations compiled into the binary, keyed by file-style name.
#[derive(Default, Clone)]
pub struct Registry {
    migrations: IndexMap<String, Arc<dyn Migration>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: impl Into<String>, migration: impl Migration + 'static) -> Self {
        self.insert(name, migration);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, migration: impl Migration + 'static) {
        self.migrations.insert(name.into(), Arc::new(migration));
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }
}

impl MigrationSource for Registry {
    fn names(&self) -> Result<Vec<String>> {
        Ok(self.migrations.keys().cloned().collect())
    }

    fn load(&self, name: &str) -> Result<Arc<dyn Migration>> {
        self.migrations
            .get(name)
            .cloned()
            .ok_or_else(|| Error::resolution(name, "no migration registered under this name"))
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.migrations.keys()).finish()
    }
}
