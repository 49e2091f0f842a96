//! Literal values for insert statements
//!
//! Values are rendered as T-SQL literals; nothing here checks them against
//! the column types of the section they end up in.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;

/// Literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    /// Rendered as `1` / `0`
    Bool(bool),
    Int(i64),
    /// Non-finite values render as `NULL`
    Float(f64),
    /// Unicode string literal
    Text(String),
    Uuid(uuid::Uuid),
    /// Hex literal
    Bytes(Vec<u8>),
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
    Time(NaiveTime),
    /// SQL expression emitted verbatim (`GETDATE()`, `@id`, ...)
    Raw(String),
}

impl Literal {
    pub fn raw(expression: impl Into<String>) -> Self {
        Literal::Raw(expression.into())
    }

    /// Converts a JSON value; arrays and objects become their JSON text.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Literal::Null,
            Value::Bool(b) => Literal::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Literal::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Literal::Float(f)
                } else {
                    Literal::Text(n.to_string())
                }
            }
            Value::String(s) => Literal::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Literal::Text(value.to_string()),
        }
    }

    /// T-SQL literal text
    pub fn to_tsql(&self) -> String {
        match self {
            Literal::Null => "NULL".to_string(),
            Literal::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
            Literal::Int(i) => i.to_string(),
            Literal::Float(f) if f.is_finite() => f.to_string(),
            Literal::Float(_) => "NULL".to_string(),
            Literal::Text(s) => format!("N'{}'", s.replace('\'', "''")),
            Literal::Uuid(u) => format!("'{}'", u.hyphenated()),
            Literal::Bytes(bytes) => {
                let mut out = String::with_capacity(2 + bytes.len() * 2);
                out.push_str("0x");
                for b in bytes {
                    out.push_str(&format!("{:02X}", b));
                }
                out
            }
            Literal::DateTime(dt) => format!("'{}'", dt.format("%Y-%m-%dT%H:%M:%S%.3f")),
            Literal::DateTimeOffset(dt) => {
                format!("'{}'", dt.format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
            }
            Literal::Time(t) => format!("'{}'", t.format("%H:%M:%S%.3f")),
            Literal::Raw(expr) => expr.clone(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_tsql())
    }
}

macro_rules! literal_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Literal::$variant(value.into())
                }
            }
        )*
    };
}

literal_from! {
    bool => Bool,
    u8 => Int,
    i8 => Int,
    i16 => Int,
    u16 => Int,
    i32 => Int,
    u32 => Int,
    i64 => Int,
    f64 => Float,
    String => Text,
    &str => Text,
    uuid::Uuid => Uuid,
    Vec<u8> => Bytes,
    &[u8] => Bytes,
    NaiveDateTime => DateTime,
    DateTime<FixedOffset> => DateTimeOffset,
    NaiveTime => Time,
}

// Goes through the shortest f32 text so `0.1f32` stays `0.1`.
impl From<f32> for Literal {
    fn from(value: f32) -> Self {
        let widened = value.to_string().parse().unwrap_or(f64::from(value));
        Literal::Float(widened)
    }
}

impl From<DateTime<Utc>> for Literal {
    fn from(value: DateTime<Utc>) -> Self {
        Literal::DateTimeOffset(value.fixed_offset())
    }
}

impl From<&Value> for Literal {
    fn from(value: &Value) -> Self {
        Literal::from_json(value)
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Literal::Null,
        }
    }
}
