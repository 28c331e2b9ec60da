use crate::{Error, Result};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

/// Text format used to store and parse date-time values.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single column value, as bound to a statement or read from a row.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    DateTime(NaiveDateTime),
    Json(serde_json::Value),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the variant, used in error messages.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::I64(_) => "I64",
            Value::F64(_) => "F64",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::DateTime(_) => "DateTime",
            Value::Json(_) => "Json",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(value) => Some(*value),
            _ => None,
        }
    }

    /// Coerces the value into a boolean. Integers are `true` when non-zero;
    /// strings accept the spellings databases and HTML forms produce.
    pub fn to_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(value) => Ok(*value),
            Value::I64(value) => Ok(*value != 0),
            Value::F64(value) => Ok(*value != 0.0),
            Value::String(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => Ok(true),
                "0" | "false" | "off" | "no" | "" => Ok(false),
                _ => Err(Error::type_conversion(self.clone(), "bool")),
            },
            _ => Err(Error::type_conversion(self.clone(), "bool")),
        }
    }

    pub fn to_i64(&self) -> Result<i64> {
        match self {
            Value::I64(value) => Ok(*value),
            Value::Bool(value) => Ok(*value as i64),
            Value::F64(value) => Ok(*value as i64),
            Value::String(value) => value
                .trim()
                .parse()
                .map_err(|_| Error::type_conversion(self.clone(), "i64")),
            _ => Err(Error::type_conversion(self.clone(), "i64")),
        }
    }

    pub fn to_f64(&self) -> Result<f64> {
        match self {
            Value::F64(value) => Ok(*value),
            Value::I64(value) => Ok(*value as f64),
            Value::String(value) => value
                .trim()
                .parse()
                .map_err(|_| Error::type_conversion(self.clone(), "f64")),
            _ => Err(Error::type_conversion(self.clone(), "f64")),
        }
    }

    /// Parses `YYYY-MM-DD HH:MM:SS` (with optional `T` separator and fraction)
    /// or a bare `YYYY-MM-DD` into a date-time.
    pub fn to_datetime(&self) -> Result<NaiveDateTime> {
        match self {
            Value::DateTime(value) => Ok(*value),
            Value::String(value) => {
                let value = value.trim();
                NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
                    .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
                    .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
                    .or_else(|_| {
                        NaiveDate::parse_from_str(value, "%Y-%m-%d")
                            .map(|date| date.and_hms_opt(0, 0, 0).unwrap_or_default())
                    })
                    .map_err(|_| Error::type_conversion(self.clone(), "DateTime"))
            }
            _ => Err(Error::type_conversion(self.clone(), "DateTime")),
        }
    }

    /// Decodes the value as JSON. Strings are parsed; JSON values pass through.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        match self {
            Value::Json(value) => Ok(value.clone()),
            Value::String(value) => serde_json::from_str(value)
                .map_err(|_| Error::type_conversion(self.clone(), "Json")),
            _ => Err(Error::type_conversion(self.clone(), "Json")),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::I64(value) => serializer.serialize_i64(*value),
            Value::F64(value) => serializer.serialize_f64(*value),
            Value::String(value) => serializer.serialize_str(value),
            Value::Bytes(value) => value.serialize(serializer),
            Value::DateTime(value) => {
                serializer.collect_str(&value.format(DATETIME_FORMAT))
            }
            Value::Json(value) => value.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_int {
    ( $($t:ty),+ ) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::I64(value as i64)
                }
            }
        )+
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::Json(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Value::Null,
        }
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_coercion() {
        assert!(Value::I64(1).to_bool().unwrap());
        assert!(!Value::I64(0).to_bool().unwrap());
        assert!(Value::from("true").to_bool().unwrap());
        assert!(!Value::from("0").to_bool().unwrap());
        assert!(Value::from("maybe").to_bool().is_err());
    }

    #[test]
    fn datetime_coercion() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();

        assert_eq!(
            Value::from("2024-01-01 12:30:00").to_datetime().unwrap(),
            expected
        );
        assert_eq!(
            Value::from("2024-01-01T12:30:00").to_datetime().unwrap(),
            expected
        );
        assert!(Value::I64(3).to_datetime().unwrap_err().is_type_conversion());
    }

    #[test]
    fn serialize_to_json() {
        let value = serde_json::to_value(Value::from("hi")).unwrap();
        assert_eq!(value, serde_json::json!("hi"));
        assert_eq!(
            serde_json::to_value(Value::Null).unwrap(),
            serde_json::Value::Null
        );
    }
}
