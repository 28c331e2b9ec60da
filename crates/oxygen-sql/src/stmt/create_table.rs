use super::{ColumnDef, ForeignKey};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub name: String,

    /// Columns in declaration order
    pub columns: Vec<ColumnDef>,

    /// Constraints, emitted after every column
    pub foreign_keys: Vec<ForeignKey>,

    pub if_not_exists: bool,
}
