mod alter_table;
pub use alter_table::{AlterAction, AlterTable};

mod column_def;
pub use column_def::{ColumnDef, ColumnDefault, ColumnType};

mod condition;
pub use condition::{Condition, Operator};

mod create_table;
pub use create_table::CreateTable;

mod delete;
pub use delete::Delete;

mod drop_table;
pub use drop_table::DropTable;

mod foreign_key;
pub use foreign_key::{ForeignKey, ReferentialAction};

mod insert;
pub use insert::Insert;

mod rename_table;
pub use rename_table::RenameTable;

mod select;
pub use select::{Direction, OrderBy, Projection, Select};

mod update;
pub use update::Update;

/// A single SQL statement, rendered to text by a [`Serializer`](crate::Serializer).
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateTable(CreateTable),
    AlterTable(AlterTable),
    DropTable(DropTable),
    RenameTable(RenameTable),
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),

    /// SQL text passed through untouched.
    Raw(String),
}

impl Statement {
    /// Returns `true` for statements that produce rows.
    pub fn is_query(&self) -> bool {
        matches!(self, Statement::Select(_))
    }
}

macro_rules! impl_from_stmt {
    ( $($variant:ident),+ ) => {
        $(
            impl From<$variant> for Statement {
                fn from(stmt: $variant) -> Self {
                    Statement::$variant(stmt)
                }
            }
        )+
    };
}

impl_from_stmt!(CreateTable, AlterTable, DropTable, RenameTable, Select, Insert, Update, Delete);
