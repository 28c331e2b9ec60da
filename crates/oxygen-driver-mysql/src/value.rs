use mysql_async::prelude::ToValue;
use oxygen_core::{value::DATETIME_FORMAT, Value as CoreValue};

#[derive(Debug)]
pub struct Value<'a>(pub &'a CoreValue);

impl Value<'_> {
    /// Converts a MySQL value read from a row into an oxygen value.
    ///
    /// Text arrives as bytes and is decoded when it is valid UTF-8. Dates and
    /// times are rendered in the text form model casts parse.
    pub fn from_sql(value: mysql_async::Value) -> CoreValue {
        use mysql_async::Value::*;

        match value {
            NULL => CoreValue::Null,
            Int(value) => CoreValue::I64(value),
            // `BIGINT UNSIGNED` values past `i64::MAX` keep their digits as text.
            UInt(value) => match i64::try_from(value) {
                Ok(value) => CoreValue::I64(value),
                Err(_) => CoreValue::String(value.to_string()),
            },
            Float(value) => CoreValue::F64(value as f64),
            Double(value) => CoreValue::F64(value),
            Bytes(value) => match String::from_utf8(value) {
                Ok(value) => CoreValue::String(value),
                Err(err) => CoreValue::Bytes(err.into_bytes()),
            },
            Date(year, month, day, hour, minute, second, _) => CoreValue::String(format!(
                "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
            )),
            Time(negative, days, hours, minutes, seconds, _) => {
                let hours = days * 24 + hours as u32;
                let sign = if negative { "-" } else { "" };
                CoreValue::String(format!("{sign}{hours:02}:{minutes:02}:{seconds:02}"))
            }
        }
    }
}

impl ToValue for Value<'_> {
    fn to_value(&self) -> mysql_async::Value {
        match self.0 {
            CoreValue::Null => mysql_async::Value::NULL,
            CoreValue::Bool(value) => value.to_value(),
            CoreValue::I64(value) => value.to_value(),
            CoreValue::F64(value) => value.to_value(),
            CoreValue::String(value) => value.to_value(),
            CoreValue::Bytes(value) => value.to_value(),
            CoreValue::DateTime(value) => value.format(DATETIME_FORMAT).to_string().to_value(),
            CoreValue::Json(value) => value.to_string().to_value(),
        }
    }
}
