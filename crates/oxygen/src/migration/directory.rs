use super::{class_name, is_migration_file, Migration, MigrationSource, SqlMigration};

use oxygen_core::{Error, Result};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Migrations listed from the files of a directory.
///
/// Only files named `{timestamp}_{description}.{ext}` are listed; anything
/// else in the directory, such as a `README.md`, is ignored.
/// `.sql` files are loaded as [`SqlMigration`]s. Any other file is resolved
/// by its class name (see [`class_name`](super::class_name)) among the
/// migrations registered with [`register`](Self::register).
#[derive(Clone)]
pub struct Directory {
    path: PathBuf,
    classes: HashMap<String, Arc<dyn Migration>>,
}

impl Directory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            classes: HashMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Make `migration` available to files whose class name is `class`.
    pub fn register(mut self, class: impl Into<String>, migration: impl Migration + 'static) -> Self {
        self.classes.insert(class.into(), Arc::new(migration));
        self
    }
}

impl MigrationSource for Directory {
    fn names(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.path) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
            Err(err) => {
                return Err(Error::from(err).context(crate::err!(
                    "failed to read migrations directory `{}`",
                    self.path.display()
                )))
            }
        };

        let mut names = vec![];

        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_migration_file(&name) {
                tracing::debug!(file = %name, "skipping non-migration file");
                continue;
            }

            names.push(name);
        }

        Ok(names)
    }

    fn load(&self, name: &str) -> Result<Arc<dyn Migration>> {
        if name.ends_with(".sql") {
            let text = fs::read_to_string(self.path.join(name))?;
            return Ok(Arc::new(SqlMigration::parse(&text)));
        }

        let class = class_name(name);
        self.classes.get(&class).cloned().ok_or_else(|| {
            Error::resolution(
                class,
                format!("no migration registered for `{name}`"),
            )
        })
    }
}

impl std::fmt::Debug for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut classes: Vec<&String> = self.classes.keys().collect();
        classes.sort();

        f.debug_struct("Directory")
            .field("path", &self.path)
            .field("classes", &classes)
            .finish()
    }
}
