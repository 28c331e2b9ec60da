use oxygen_core::{Result, Value};

/// Read-time coercion of a raw column value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cast {
    Boolean,
    Integer,
    Float,
    String,
    DateTime,
    /// JSON text decoded into a JSON value.
    Array,
}

impl Cast {
    /// `NULL` is never cast.
    pub fn apply(self, value: &Value) -> Result<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }

        Ok(match self {
            Cast::Boolean => Value::Bool(value.to_bool()?),
            Cast::Integer => Value::I64(value.to_i64()?),
            Cast::Float => Value::F64(value.to_f64()?),
            Cast::String => match value {
                Value::String(_) => value.clone(),
                Value::I64(v) => Value::String(v.to_string()),
                Value::F64(v) => Value::String(v.to_string()),
                Value::Bool(v) => Value::String(v.to_string()),
                _ => return Err(oxygen_core::Error::type_conversion(value.clone(), "String")),
            },
            Cast::DateTime => Value::DateTime(value.to_datetime()?),
            Cast::Array => Value::Json(value.to_json()?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casts() {
        assert_eq!(Cast::Boolean.apply(&Value::I64(1)).unwrap(), Value::Bool(true));
        assert_eq!(Cast::Integer.apply(&Value::from("42")).unwrap(), Value::I64(42));
        assert_eq!(Cast::Float.apply(&Value::I64(2)).unwrap(), Value::F64(2.0));
        assert_eq!(Cast::String.apply(&Value::I64(7)).unwrap(), Value::from("7"));
        assert_eq!(
            Cast::Array.apply(&Value::from("[1,2]")).unwrap(),
            Value::Json(serde_json::json!([1, 2]))
        );
        assert!(matches!(
            Cast::DateTime.apply(&Value::from("2024-01-01 00:00:00")).unwrap(),
            Value::DateTime(_)
        ));
        assert_eq!(Cast::Boolean.apply(&Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn failed_cast() {
        let err = Cast::Integer.apply(&Value::from("abc")).unwrap_err();
        assert!(err.is_type_conversion());
    }
}
