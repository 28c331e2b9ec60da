#[derive(Debug, Clone, PartialEq)]
pub struct RenameTable {
    pub from: String,
    pub to: String,
}
