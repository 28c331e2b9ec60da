use super::{ColumnDef, ForeignKey};

#[derive(Debug, Clone, PartialEq)]
pub struct AlterTable {
    pub name: String,
    pub actions: Vec<AlterAction>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlterAction {
    AddColumn(ColumnDef),
    DropColumn(String),
    RenameColumn { from: String, to: String },
    AddForeignKey(ForeignKey),
}
