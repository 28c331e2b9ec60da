mod blueprint;
pub use blueprint::Blueprint;

use crate::{
    stmt::{DropTable, RenameTable, Statement},
    Serializer,
};

use oxygen_core::{Dialect, Result, Value};

/// Collects the DDL statements a migration wants to run.
///
/// Nothing is executed here: the migration runner serializes and executes
/// [`statements`](Schema::statements) once `up()` or `down()` returns.
#[derive(Debug)]
pub struct Schema {
    dialect: Dialect,
    statements: Vec<Statement>,
}

impl Schema {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            statements: vec![],
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Create a new table, defined by `build`.
    pub fn create(
        &mut self,
        table: &str,
        build: impl FnOnce(&mut Blueprint) -> Result<()>,
    ) -> Result<()> {
        let mut blueprint = Blueprint::create(table);
        build(&mut blueprint)?;
        self.push_blueprint(blueprint)
    }

    pub fn create_if_not_exists(
        &mut self,
        table: &str,
        build: impl FnOnce(&mut Blueprint) -> Result<()>,
    ) -> Result<()> {
        let mut blueprint = Blueprint::create(table).if_not_exists();
        build(&mut blueprint)?;
        self.push_blueprint(blueprint)
    }

    /// Modify an existing table.
    pub fn table(
        &mut self,
        table: &str,
        build: impl FnOnce(&mut Blueprint) -> Result<()>,
    ) -> Result<()> {
        let mut blueprint = Blueprint::alter(table);
        build(&mut blueprint)?;
        self.push_blueprint(blueprint)
    }

    pub fn drop(&mut self, table: &str) {
        self.statements.push(
            DropTable {
                name: table.to_string(),
                if_exists: false,
            }
            .into(),
        );
    }

    pub fn drop_if_exists(&mut self, table: &str) {
        self.statements.push(
            DropTable {
                name: table.to_string(),
                if_exists: true,
            }
            .into(),
        );
    }

    pub fn rename(&mut self, from: &str, to: &str) {
        self.statements.push(
            RenameTable {
                from: from.to_string(),
                to: to.to_string(),
            }
            .into(),
        );
    }

    /// Run SQL text as-is.
    pub fn raw(&mut self, sql: impl Into<String>) {
        self.statements.push(Statement::Raw(sql.into()));
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Serializes every collected statement.
    pub fn to_sql(&self) -> Vec<String> {
        let serializer = Serializer::new(self.dialect);

        self.statements
            .iter()
            .map(|stmt| {
                let mut params: Vec<Value> = vec![];
                serializer.serialize(stmt, &mut params)
            })
            .collect()
    }

    fn push_blueprint(&mut self, blueprint: Blueprint) -> Result<()> {
        let statements = blueprint.build(self.dialect)?;
        self.statements.extend(statements);
        Ok(())
    }
}
