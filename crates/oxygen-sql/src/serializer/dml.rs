use super::{Formatter, Params};
use crate::stmt::{Condition, Delete, Direction, Insert, Operator, Projection, Select, Update};

use oxygen_core::{Dialect, Value};

impl<P: Params> Formatter<'_, P> {
    pub(super) fn select(&mut self, stmt: &Select) {
        self.push("SELECT ");

        match &stmt.projection {
            Projection::All => self.push("*"),
            Projection::Columns(columns) => self.comma(columns, |f, column| f.ident(column)),
            Projection::Count => {
                self.push("COUNT(*) AS ");
                self.ident("aggregate");
            }
        }

        self.push(" FROM ");
        self.ident(&stmt.table);
        self.filter(&stmt.filter);

        if !stmt.order_by.is_empty() {
            self.push(" ORDER BY ");
            self.comma(&stmt.order_by, |f, order_by| {
                f.ident(&order_by.column);
                f.push(match order_by.direction {
                    Direction::Asc => " ASC",
                    Direction::Desc => " DESC",
                });
            });
        }

        match (stmt.limit, stmt.offset) {
            (Some(limit), offset) => {
                self.push(&format!(" LIMIT {limit}"));
                if let Some(offset) = offset {
                    self.push(&format!(" OFFSET {offset}"));
                }
            }
            // Both dialects require a LIMIT before OFFSET.
            (None, Some(offset)) => match self.dialect {
                Dialect::Mysql => self.push(&format!(" LIMIT 18446744073709551615 OFFSET {offset}")),
                Dialect::Sqlite => self.push(&format!(" LIMIT -1 OFFSET {offset}")),
            },
            (None, None) => {}
        }
    }

    pub(super) fn insert(&mut self, stmt: &Insert) {
        self.push("INSERT INTO ");
        self.ident(&stmt.table);

        if stmt.values.is_empty() {
            match self.dialect {
                Dialect::Mysql => self.push(" () VALUES ()"),
                Dialect::Sqlite => self.push(" DEFAULT VALUES"),
            }
            return;
        }

        let columns: Vec<&String> = stmt.values.keys().collect();
        let values: Vec<&Value> = stmt.values.values().collect();

        self.push(" (");
        self.comma(&columns, |f, column| f.ident(column));
        self.push(") VALUES (");
        self.comma(&values, |f, value| f.param(value));
        self.push(")");
    }

    pub(super) fn update(&mut self, stmt: &Update) {
        self.push("UPDATE ");
        self.ident(&stmt.table);
        self.push(" SET ");

        let assignments: Vec<(&String, &Value)> = stmt.assignments.iter().collect();
        self.comma(&assignments, |f, (column, value)| {
            f.ident(column);
            f.push(" = ");
            f.param(value);
        });

        self.filter(&stmt.filter);
    }

    pub(super) fn delete(&mut self, stmt: &Delete) {
        self.push("DELETE FROM ");
        self.ident(&stmt.table);
        self.filter(&stmt.filter);
    }

    fn filter(&mut self, conditions: &[Condition]) {
        for (i, condition) in conditions.iter().enumerate() {
            self.push(if i == 0 { " WHERE " } else { " AND " });
            self.condition(condition);
        }
    }

    fn condition(&mut self, condition: &Condition) {
        match condition {
            Condition::Compare {
                column,
                op: Operator::Eq,
                value: Value::Null,
            } => {
                self.ident(column);
                self.push(" IS NULL");
            }
            Condition::Compare {
                column,
                op: Operator::Ne,
                value: Value::Null,
            } => {
                self.ident(column);
                self.push(" IS NOT NULL");
            }
            Condition::Compare { column, op, value } => {
                self.ident(column);
                self.push(" ");
                self.push(op.as_sql());
                self.push(" ");
                self.param(value);
            }
            Condition::In { values, .. } if values.is_empty() => self.push("1 = 0"),
            Condition::NotIn { values, .. } if values.is_empty() => self.push("1 = 1"),
            Condition::In { column, values } | Condition::NotIn { column, values } => {
                self.ident(column);
                if matches!(condition, Condition::NotIn { .. }) {
                    self.push(" NOT IN (");
                } else {
                    self.push(" IN (");
                }
                self.comma(values, |f, value| f.param(value));
                self.push(")");
            }
        }
    }
}
