use super::Migration;

use oxygen_core::Result;
use oxygen_sql::Schema;

/// A migration written as plain SQL.
///
/// The text is split on marker lines `-- up` and `-- down` (case
/// insensitive). Text before any marker belongs to `up`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlMigration {
    up: String,
    down: String,
}

impl SqlMigration {
    pub fn new(up: impl Into<String>, down: impl Into<String>) -> Self {
        Self {
            up: up.into(),
            down: down.into(),
        }
    }

    pub fn parse(text: &str) -> Self {
        let mut up = String::new();
        let mut down = String::new();
        let mut in_down = false;

        for line in text.lines() {
            match marker(line) {
                Some(Section::Up) => in_down = false,
                Some(Section::Down) => in_down = true,
                None => {
                    let section = if in_down { &mut down } else { &mut up };
                    section.push_str(line);
                    section.push('\n');
                }
            }
        }

        Self::new(up.trim(), down.trim())
    }

    pub fn up_sql(&self) -> &str {
        &self.up
    }

    pub fn down_sql(&self) -> &str {
        &self.down
    }
}

impl Migration for SqlMigration {
    fn up(&self, schema: &mut Schema) -> Result<()> {
        if !self.up.is_empty() {
            schema.raw(self.up.clone());
        }
        Ok(())
    }

    fn down(&self, schema: &mut Schema) -> Result<()> {
        if !self.down.is_empty() {
            schema.raw(self.down.clone());
        }
        Ok(())
    }
}

enum Section {
    Up,
    Down,
}

fn marker(line: &str) -> Option<Section> {
    let rest = line.trim().strip_prefix("--")?.trim();

    if rest.eq_ignore_ascii_case("up") {
        Some(Section::Up)
    } else if rest.eq_ignore_ascii_case("down") {
        Some(Section::Down)
    } else {
        None
    }
}
