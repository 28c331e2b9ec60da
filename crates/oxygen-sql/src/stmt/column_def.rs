use oxygen_core::Value;

/// One column of a `CREATE TABLE` or `ALTER TABLE .. ADD COLUMN`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub ty: ColumnType,
    pub nullable: bool,
    pub default: Option<ColumnDefault>,
    pub unsigned: bool,
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnType {
    /// Auto-incrementing `BIGINT` primary key.
    BigIncrements,
    /// Auto-incrementing `INT` primary key.
    Increments,
    String(u32),
    Text,
    Integer,
    BigInteger,
    Decimal { precision: u8, scale: u8 },
    Boolean,
    Date,
    DateTime,
    Timestamp,
    Enum(Vec<String>),
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnDefault {
    /// A literal, rendered as a SQL literal.
    Value(Value),
    /// An expression rendered verbatim, e.g. `CURRENT_TIMESTAMP`.
    Expr(String),
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        let unsigned = matches!(ty, ColumnType::BigIncrements | ColumnType::Increments);
        Self {
            name: name.into(),
            ty,
            nullable: false,
            default: None,
            unsigned,
            unique: false,
        }
    }

    pub fn is_auto_increment(&self) -> bool {
        matches!(self.ty, ColumnType::BigIncrements | ColumnType::Increments)
    }
}

impl ColumnType {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ColumnType::BigIncrements
                | ColumnType::Increments
                | ColumnType::Integer
                | ColumnType::BigInteger
                | ColumnType::Decimal { .. }
        )
    }
}
