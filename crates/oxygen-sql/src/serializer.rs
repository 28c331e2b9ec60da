mod ddl;
mod dml;

mod params;
pub use params::{Params, Placeholder};

use crate::stmt::Statement;

use oxygen_core::{Dialect, Value};

/// Serialize a statement to a SQL string
#[derive(Debug, Clone, Copy)]
pub struct Serializer {
    /// The dialect handles the differences in quoting, placeholders and
    /// column types between databases.
    dialect: Dialect,
}

struct Formatter<'a, P> {
    dialect: Dialect,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut P,
}

impl Serializer {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn mysql() -> Self {
        Self::new(Dialect::Mysql)
    }

    pub fn sqlite() -> Self {
        Self::new(Dialect::Sqlite)
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Render `stmt`, pushing every bound value into `params`. Values are
    /// never interpolated into the SQL text.
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        if let Statement::Raw(sql) = stmt {
            return sql.clone();
        }

        let mut ret = String::new();

        let mut f = Formatter {
            dialect: self.dialect,
            dst: &mut ret,
            params,
        };

        match stmt {
            Statement::CreateTable(stmt) => f.create_table(stmt),
            Statement::AlterTable(stmt) => f.alter_table(stmt),
            Statement::DropTable(stmt) => f.drop_table(stmt),
            Statement::RenameTable(stmt) => f.rename_table(stmt),
            Statement::Select(stmt) => f.select(stmt),
            Statement::Insert(stmt) => f.insert(stmt),
            Statement::Update(stmt) => f.update(stmt),
            Statement::Delete(stmt) => f.delete(stmt),
            Statement::Raw(_) => unreachable!(),
        }

        ret.push(';');
        ret
    }
}

impl<P: Params> Formatter<'_, P> {
    fn push(&mut self, sql: &str) {
        self.dst.push_str(sql);
    }

    fn ident(&mut self, name: &str) {
        let quoted = self.dialect.quote(name);
        self.dst.push_str(&quoted);
    }

    fn param(&mut self, value: &Value) {
        let placeholder = self.params.push(value);
        let sql = self.dialect.placeholder(placeholder.0);
        self.dst.push_str(&sql);
    }

    /// Writes `items` separated by `, `.
    fn comma<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            each(self, item);
        }
    }
}
