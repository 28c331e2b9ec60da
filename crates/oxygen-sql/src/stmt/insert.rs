use indexmap::IndexMap;
use oxygen_core::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,
    pub values: IndexMap<String, Value>,
}

impl Insert {
    pub fn new(table: impl Into<String>, values: IndexMap<String, Value>) -> Self {
        Self {
            table: table.into(),
            values,
        }
    }
}
