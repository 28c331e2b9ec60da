use super::{Formatter, Params};
use crate::stmt::{
    AlterAction, AlterTable, ColumnDef, ColumnDefault, ColumnType, CreateTable, DropTable,
    ForeignKey, RenameTable,
};

use oxygen_core::{value::DATETIME_FORMAT, Dialect, Value};

impl<P: Params> Formatter<'_, P> {
    pub(super) fn create_table(&mut self, stmt: &CreateTable) {
        self.push("CREATE TABLE ");
        if stmt.if_not_exists {
            self.push("IF NOT EXISTS ");
        }
        self.ident(&stmt.name);
        self.push(" (\n");

        let mut first = true;
        for column in &stmt.columns {
            if !first {
                self.push(",\n");
            }
            first = false;
            self.push("    ");
            self.column_def(column);
        }

        for foreign_key in &stmt.foreign_keys {
            if !first {
                self.push(",\n");
            }
            first = false;
            self.push("    ");
            self.foreign_key(foreign_key);
        }

        self.push("\n)");

        if self.dialect == Dialect::Mysql {
            self.push(" ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci");
        }
    }

    pub(super) fn alter_table(&mut self, stmt: &AlterTable) {
        match self.dialect {
            Dialect::Mysql => {
                self.push("ALTER TABLE ");
                self.ident(&stmt.name);
                self.push(" ");
                self.comma(&stmt.actions, |f, action| f.alter_action(action));
            }
            // SQLite accepts a single action per ALTER TABLE.
            Dialect::Sqlite => {
                for (i, action) in stmt.actions.iter().enumerate() {
                    if i > 0 {
                        self.push("; ");
                    }
                    self.push("ALTER TABLE ");
                    self.ident(&stmt.name);
                    self.push(" ");
                    self.alter_action(action);
                }
            }
        }
    }

    fn alter_action(&mut self, action: &AlterAction) {
        match action {
            AlterAction::AddColumn(column) => {
                self.push("ADD COLUMN ");
                self.column_def(column);
            }
            AlterAction::DropColumn(name) => {
                self.push("DROP COLUMN ");
                self.ident(name);
            }
            AlterAction::RenameColumn { from, to } => {
                self.push("RENAME COLUMN ");
                self.ident(from);
                self.push(" TO ");
                self.ident(to);
            }
            AlterAction::AddForeignKey(foreign_key) => {
                self.push("ADD ");
                self.foreign_key(foreign_key);
            }
        }
    }

    pub(super) fn drop_table(&mut self, stmt: &DropTable) {
        self.push("DROP TABLE ");
        if stmt.if_exists {
            self.push("IF EXISTS ");
        }
        self.ident(&stmt.name);
    }

    pub(super) fn rename_table(&mut self, stmt: &RenameTable) {
        match self.dialect {
            Dialect::Mysql => {
                self.push("RENAME TABLE ");
                self.ident(&stmt.from);
                self.push(" TO ");
            }
            Dialect::Sqlite => {
                self.push("ALTER TABLE ");
                self.ident(&stmt.from);
                self.push(" RENAME TO ");
            }
        }
        self.ident(&stmt.to);
    }

    fn column_def(&mut self, column: &ColumnDef) {
        self.ident(&column.name);
        self.push(" ");

        if column.is_auto_increment() {
            match self.dialect {
                Dialect::Mysql => {
                    self.column_type(column);
                    self.push(" UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY");
                }
                Dialect::Sqlite => self.push("INTEGER PRIMARY KEY AUTOINCREMENT"),
            }
            return;
        }

        self.column_type(column);

        if column.unsigned && column.ty.is_numeric() && self.dialect == Dialect::Mysql {
            self.push(" UNSIGNED");
        }

        match (column.nullable, self.dialect) {
            (false, _) => self.push(" NOT NULL"),
            (true, Dialect::Mysql) => self.push(" NULL"),
            (true, Dialect::Sqlite) => {}
        }

        if let Some(default) = &column.default {
            self.push(" DEFAULT ");
            match default {
                ColumnDefault::Value(value) => self.literal(value),
                ColumnDefault::Expr(expr) => self.push(expr),
            }
        }

        if column.unique {
            self.push(" UNIQUE");
        }

        if let (ColumnType::Enum(variants), Dialect::Sqlite) = (&column.ty, self.dialect) {
            self.push(" CHECK (");
            self.ident(&column.name);
            self.push(" IN (");
            self.comma(variants, |f, variant| f.string_literal(variant));
            self.push("))");
        }
    }

    fn column_type(&mut self, column: &ColumnDef) {
        let sqlite = self.dialect == Dialect::Sqlite;

        match &column.ty {
            ColumnType::BigIncrements | ColumnType::BigInteger if sqlite => self.push("INTEGER"),
            ColumnType::BigIncrements | ColumnType::BigInteger => self.push("BIGINT"),
            ColumnType::Increments | ColumnType::Integer if sqlite => self.push("INTEGER"),
            ColumnType::Increments | ColumnType::Integer => self.push("INT"),
            ColumnType::String(len) => self.push(&format!("VARCHAR({len})")),
            ColumnType::Text => self.push("TEXT"),
            ColumnType::Decimal { precision, scale } => {
                self.push(&format!("DECIMAL({precision}, {scale})"))
            }
            ColumnType::Boolean if sqlite => self.push("INTEGER"),
            ColumnType::Boolean => self.push("TINYINT(1)"),
            ColumnType::Date | ColumnType::DateTime | ColumnType::Timestamp if sqlite => {
                self.push("TEXT")
            }
            ColumnType::Date => self.push("DATE"),
            ColumnType::DateTime => self.push("DATETIME"),
            ColumnType::Timestamp => self.push("TIMESTAMP"),
            ColumnType::Enum(_) if sqlite => self.push("TEXT"),
            ColumnType::Enum(variants) => {
                self.push("ENUM(");
                self.comma(variants, |f, variant| f.string_literal(variant));
                self.push(")");
            }
            ColumnType::Json if sqlite => self.push("TEXT"),
            ColumnType::Json => self.push("JSON"),
        }
    }

    fn foreign_key(&mut self, foreign_key: &ForeignKey) {
        self.push("CONSTRAINT ");
        self.ident(&foreign_key.name);
        self.push(" FOREIGN KEY (");
        self.ident(&foreign_key.column);
        self.push(") REFERENCES ");
        self.ident(&foreign_key.references_table);
        self.push(" (");
        self.ident(&foreign_key.references_column);
        self.push(")");

        if let Some(action) = foreign_key.on_delete {
            self.push(" ON DELETE ");
            self.push(action.as_sql());
        }

        if let Some(action) = foreign_key.on_update {
            self.push(" ON UPDATE ");
            self.push(action.as_sql());
        }
    }

    /// DDL cannot carry bound parameters, so defaults are rendered as escaped
    /// literals.
    fn literal(&mut self, value: &Value) {
        match value {
            Value::Null => self.push("NULL"),
            Value::Bool(true) => self.push("1"),
            Value::Bool(false) => self.push("0"),
            Value::I64(v) => self.push(&v.to_string()),
            Value::F64(v) => self.push(&v.to_string()),
            Value::String(v) => self.string_literal(v),
            Value::DateTime(v) => self.string_literal(&v.format(DATETIME_FORMAT).to_string()),
            Value::Json(v) => self.string_literal(&v.to_string()),
            Value::Bytes(v) => {
                let hex: String = v.iter().map(|b| format!("{b:02X}")).collect();
                self.push(&format!("X'{hex}'"));
            }
        }
    }

    fn string_literal(&mut self, value: &str) {
        self.push("'");
        self.push(&value.replace('\'', "''"));
        self.push("'");
    }
}
