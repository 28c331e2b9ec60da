/// SQL dialects that statements and DDL are rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Backtick-quoted identifiers, `?` placeholders, `ENGINE=InnoDB` tables.
    #[default]
    Mysql,

    /// Double-quoted identifiers, `?N` placeholders.
    Sqlite,
}

impl Dialect {
    /// Character used to quote identifiers.
    pub fn quote_char(self) -> char {
        match self {
            Dialect::Mysql => '`',
            Dialect::Sqlite => '"',
        }
    }

    /// Quotes an identifier, doubling any embedded quote characters. Dotted
    /// names (`schema.table`) are quoted per segment.
    pub fn quote(self, ident: &str) -> String {
        let q = self.quote_char();
        let mut out = String::with_capacity(ident.len() + 2);

        for (i, part) in ident.split('.').enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push(q);
            for c in part.chars() {
                if c == q {
                    out.push(q);
                }
                out.push(c);
            }
            out.push(q);
        }

        out
    }

    /// Placeholder for the parameter at 1-based `position`.
    pub fn placeholder(self, position: usize) -> String {
        match self {
            Dialect::Mysql => "?".to_string(),
            Dialect::Sqlite => format!("?{position}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_identifiers() {
        assert_eq!(Dialect::Mysql.quote("order"), "`order`");
        assert_eq!(Dialect::Sqlite.quote("order"), "\"order\"");
        assert_eq!(Dialect::Mysql.quote("we`ird"), "`we``ird`");
        assert_eq!(Dialect::Sqlite.quote("main.users"), "\"main\".\"users\"");
    }

    #[test]
    fn placeholders() {
        assert_eq!(Dialect::Mysql.placeholder(3), "?");
        assert_eq!(Dialect::Sqlite.placeholder(3), "?3");
    }
}
