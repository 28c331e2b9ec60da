use crate::{
    stmt::{
        AlterAction, AlterTable, ColumnDef, ColumnDefault, ColumnType, CreateTable, ForeignKey,
        ReferentialAction, Statement,
    },
    Serializer,
};

use oxygen_core::{Dialect, Error, Result, Value};

/// Fluent definition of one table's columns and constraints.
///
/// Column methods append one column each. Modifiers (`nullable`, `default`,
/// `unsigned`, `unique`, ...) always apply to the most recently appended
/// column and fail when there is none.
#[derive(Debug, Clone)]
pub struct Blueprint {
    table: String,
    mode: Mode,
    columns: Vec<ColumnDef>,
    foreign_keys: Vec<ForeignKey>,
    renames: Vec<(String, String)>,
    drops: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Create { if_not_exists: bool },
    Alter,
}

impl Blueprint {
    pub fn create(table: impl Into<String>) -> Self {
        Self::new(table.into(), Mode::Create { if_not_exists: false })
    }

    pub fn alter(table: impl Into<String>) -> Self {
        Self::new(table.into(), Mode::Alter)
    }

    fn new(table: String, mode: Mode) -> Self {
        Self {
            table,
            mode,
            columns: vec![],
            foreign_keys: vec![],
            renames: vec![],
            drops: vec![],
        }
    }

    pub(super) fn if_not_exists(mut self) -> Self {
        self.mode = Mode::Create {
            if_not_exists: true,
        };
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    fn add(&mut self, name: &str, ty: ColumnType) -> &mut Self {
        self.columns.push(ColumnDef::new(name, ty));
        self
    }

    /// Auto-incrementing `BIGINT UNSIGNED` primary key named `id`.
    pub fn id(&mut self) -> &mut Self {
        self.big_increments("id")
    }

    pub fn big_increments(&mut self, name: &str) -> &mut Self {
        self.add(name, ColumnType::BigIncrements)
    }

    pub fn increments(&mut self, name: &str) -> &mut Self {
        self.add(name, ColumnType::Increments)
    }

    /// `VARCHAR(255)`
    pub fn string(&mut self, name: &str) -> &mut Self {
        self.string_len(name, 255)
    }

    pub fn string_len(&mut self, name: &str, len: u32) -> &mut Self {
        self.add(name, ColumnType::String(len))
    }

    pub fn text(&mut self, name: &str) -> &mut Self {
        self.add(name, ColumnType::Text)
    }

    pub fn integer(&mut self, name: &str) -> &mut Self {
        self.add(name, ColumnType::Integer)
    }

    pub fn big_integer(&mut self, name: &str) -> &mut Self {
        self.add(name, ColumnType::BigInteger)
    }

    pub fn decimal(&mut self, name: &str, precision: u8, scale: u8) -> &mut Self {
        self.add(name, ColumnType::Decimal { precision, scale })
    }

    pub fn boolean(&mut self, name: &str) -> &mut Self {
        self.add(name, ColumnType::Boolean)
    }

    pub fn date(&mut self, name: &str) -> &mut Self {
        self.add(name, ColumnType::Date)
    }

    pub fn datetime(&mut self, name: &str) -> &mut Self {
        self.add(name, ColumnType::DateTime)
    }

    pub fn timestamp(&mut self, name: &str) -> &mut Self {
        self.add(name, ColumnType::Timestamp)
    }

    pub fn enumeration<I, S>(&mut self, name: &str, variants: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variants = variants.into_iter().map(Into::into).collect();
        self.add(name, ColumnType::Enum(variants))
    }

    pub fn json(&mut self, name: &str) -> &mut Self {
        self.add(name, ColumnType::Json)
    }

    /// Unsigned `BIGINT` column meant to reference another table's `id`.
    /// Follow with [`constrained`](Self::constrained) to add the constraint.
    pub fn foreign_id(&mut self, name: &str) -> &mut Self {
        self.add(name, ColumnType::BigInteger);
        if let Some(column) = self.columns.last_mut() {
            column.unsigned = true;
        }
        self
    }

    /// Nullable `created_at` and `updated_at` timestamps.
    pub fn timestamps(&mut self) -> &mut Self {
        for name in ["created_at", "updated_at"] {
            self.add(name, ColumnType::Timestamp);
            if let Some(column) = self.columns.last_mut() {
                column.nullable = true;
            }
        }
        self
    }

    pub fn nullable(&mut self) -> Result<&mut Self> {
        self.last_column("nullable")?.nullable = true;
        Ok(self)
    }

    pub fn default(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        self.last_column("default")?.default = Some(ColumnDefault::Value(value.into()));
        Ok(self)
    }

    /// `DEFAULT CURRENT_TIMESTAMP`
    pub fn use_current(&mut self) -> Result<&mut Self> {
        self.last_column("use_current")?.default =
            Some(ColumnDefault::Expr("CURRENT_TIMESTAMP".to_string()));
        Ok(self)
    }

    pub fn unsigned(&mut self) -> Result<&mut Self> {
        self.last_column("unsigned")?.unsigned = true;
        Ok(self)
    }

    pub fn unique(&mut self) -> Result<&mut Self> {
        self.last_column("unique")?.unique = true;
        Ok(self)
    }

    /// Constrain the last column to the `id` of the table named after it:
    /// `user_id` references `users.id`.
    pub fn constrained(&mut self) -> Result<&mut Self> {
        let column = self.last_column("constrained")?.name.clone();
        let table = guess_table(&column);
        self.constrained_to(&table, "id")
    }

    pub fn constrained_to(&mut self, table: &str, column: &str) -> Result<&mut Self> {
        let name = self.last_column("constrained")?.name.clone();
        self.foreign_keys.push(ForeignKey {
            name: format!("{}_{}_foreign", self.table, name),
            column: name,
            references_table: table.to_string(),
            references_column: column.to_string(),
            on_delete: None,
            on_update: None,
        });
        Ok(self)
    }

    pub fn cascade_on_delete(&mut self) -> Result<&mut Self> {
        self.last_foreign_key("cascade_on_delete")?.on_delete = Some(ReferentialAction::Cascade);
        Ok(self)
    }

    pub fn null_on_delete(&mut self) -> Result<&mut Self> {
        self.last_foreign_key("null_on_delete")?.on_delete = Some(ReferentialAction::SetNull);
        Ok(self)
    }

    pub fn restrict_on_delete(&mut self) -> Result<&mut Self> {
        self.last_foreign_key("restrict_on_delete")?.on_delete =
            Some(ReferentialAction::Restrict);
        Ok(self)
    }

    pub fn cascade_on_update(&mut self) -> Result<&mut Self> {
        self.last_foreign_key("cascade_on_update")?.on_update = Some(ReferentialAction::Cascade);
        Ok(self)
    }

    pub fn drop_column(&mut self, name: &str) -> Result<&mut Self> {
        self.require_alter("drop_column")?;
        self.drops.push(name.to_string());
        Ok(self)
    }

    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<&mut Self> {
        self.require_alter("rename_column")?;
        self.renames.push((from.to_string(), to.to_string()));
        Ok(self)
    }

    /// Renders the statements this blueprint builds for `dialect`.
    ///
    /// In create mode this is one `CREATE TABLE` with every column in
    /// declaration order, then every foreign key. In alter mode it is the
    /// `ALTER TABLE` statements, one per action on SQLite.
    pub fn to_sql(&self, dialect: Dialect) -> Result<Vec<String>> {
        let serializer = Serializer::new(dialect);

        Ok(self
            .clone()
            .build(dialect)?
            .iter()
            .map(|stmt| {
                let mut params: Vec<Value> = vec![];
                serializer.serialize(stmt, &mut params)
            })
            .collect())
    }

    /// Converts the blueprint into the statements needed for `dialect`.
    pub fn build(self, dialect: Dialect) -> Result<Vec<Statement>> {
        match self.mode {
            Mode::Create { if_not_exists } => Ok(vec![self.create_table(if_not_exists).into()]),
            Mode::Alter => self.alter_table(dialect),
        }
    }

    fn create_table(&self, if_not_exists: bool) -> CreateTable {
        CreateTable {
            name: self.table.clone(),
            columns: self.columns.clone(),
            foreign_keys: self.foreign_keys.clone(),
            if_not_exists,
        }
    }

    fn alter_table(self, dialect: Dialect) -> Result<Vec<Statement>> {
        if dialect == Dialect::Sqlite && !self.foreign_keys.is_empty() {
            return Err(Error::schema_builder(
                &self.table,
                "SQLite cannot add a foreign key to an existing table",
            ));
        }

        let mut actions = vec![];
        actions.extend(self.columns.into_iter().map(AlterAction::AddColumn));
        actions.extend(self.foreign_keys.into_iter().map(AlterAction::AddForeignKey));
        actions.extend(
            self.renames
                .into_iter()
                .map(|(from, to)| AlterAction::RenameColumn { from, to }),
        );
        actions.extend(self.drops.into_iter().map(AlterAction::DropColumn));

        if actions.is_empty() {
            return Ok(vec![]);
        }

        let table = self.table;

        Ok(match dialect {
            Dialect::Mysql => vec![AlterTable {
                name: table,
                actions,
            }
            .into()],
            Dialect::Sqlite => actions
                .into_iter()
                .map(|action| {
                    AlterTable {
                        name: table.clone(),
                        actions: vec![action],
                    }
                    .into()
                })
                .collect(),
        })
    }

    fn last_column(&mut self, modifier: &str) -> Result<&mut ColumnDef> {
        self.columns.last_mut().ok_or_else(|| {
            Error::schema_builder(
                &self.table,
                format!("`{modifier}` called before any column was added"),
            )
        })
    }

    fn last_foreign_key(&mut self, modifier: &str) -> Result<&mut ForeignKey> {
        self.foreign_keys.last_mut().ok_or_else(|| {
            Error::schema_builder(
                &self.table,
                format!("`{modifier}` called before any foreign key was added"),
            )
        })
    }

    fn require_alter(&self, method: &str) -> Result<()> {
        match self.mode {
            Mode::Alter => Ok(()),
            Mode::Create { .. } => Err(Error::schema_builder(
                &self.table,
                format!("`{method}` is only valid when altering a table"),
            )),
        }
    }
}

/// `user_id` -> `users`. Naive: strips `_id` and appends `s`, so irregular
/// plurals need [`Blueprint::constrained_to`].
fn guess_table(column: &str) -> String {
    let stem = column.strip_suffix("_id").unwrap_or(column);
    format!("{stem}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_table_from_column() {
        assert_eq!(guess_table("user_id"), "users");
        assert_eq!(guess_table("category_id"), "categorys");
        assert_eq!(guess_table("owner"), "owners");
    }

    #[test]
    fn modifier_targets_last_column() {
        let mut blueprint = Blueprint::create("users");
        blueprint.string("name");
        blueprint.string("email").unique().unwrap();

        assert!(!blueprint.columns()[0].unique);
        assert!(blueprint.columns()[1].unique);
    }
}
