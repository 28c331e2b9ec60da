use super::Condition;

use indexmap::IndexMap;
use oxygen_core::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,
    pub assignments: IndexMap<String, Value>,
    pub filter: Vec<Condition>,
}

impl Update {
    pub fn new(table: impl Into<String>, assignments: IndexMap<String, Value>) -> Self {
        Self {
            table: table.into(),
            assignments,
            filter: vec![],
        }
    }

    pub fn filter(mut self, condition: Condition) -> Self {
        self.filter.push(condition);
        self
    }
}
