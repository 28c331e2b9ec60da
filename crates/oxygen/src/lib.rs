pub mod config;
pub use config::{Config, DatabaseConfig, MigrationConfig};

pub mod container;
pub use container::{Autowire, Container, Parameters, Resolver};

pub mod db;
pub use db::Db;

mod inflect;

pub mod migration;
pub use migration::{FailurePolicy, Migration, MigrationSource, Migrator};

pub mod model;
pub use model::{Attributes, Cast, Model, Query, Record};

pub mod relation;
pub use relation::{Related, Relation, RelationKind};

pub use oxygen_core::{bail, err, Error, Result, Row, Value};
pub use oxygen_sql::{stmt::Direction, Blueprint, Schema};

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::model::{Cast, Model, Record};
    pub use std::borrow::Cow;
}

/// Load the configuration, connect to the configured database and register
/// both in a fresh [`Container`].
///
/// The `Db` is registered as a pre-resolved singleton, so every component
/// that asks the container for a `Db` shares the one connection.
pub async fn boot(config: Config) -> Result<Container> {
    let db = Db::connect(&config.database.url).await?;

    tracing::info!(dialect = ?db.dialect(), "database connected");

    let container = Container::new();
    container.instance(config);
    container.instance(db);
    Ok(container)
}
