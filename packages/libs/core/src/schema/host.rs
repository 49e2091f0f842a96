//! Host-language data types
//!
//! Sections infer column types from the properties of a host schema. The host
//! side is described with a closed set of primitive kinds; anything else is
//! carried by name as [`HostKind::Other`] and rejected by the mapper.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Host primitive kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostKind {
    Bool,
    Byte,
    String,
    /// Date and time without offset
    DateTime,
    /// Date and time with UTC offset
    DateTimeOffset,
    Int16,
    Int32,
    Int64,
    Decimal,
    Double,
    Float,
    /// Time interval / time of day
    TimeSpan,
    /// Unique identifier (UUID)
    Guid,
    /// Binary blob
    Bytes,
    /// Character array
    Chars,
    /// Any type outside the primitive set
    Other(String),
}

impl HostKind {
    /// Canonical type name
    pub fn name(&self) -> &str {
        match self {
            HostKind::Bool => "bool",
            HostKind::Byte => "byte",
            HostKind::String => "string",
            HostKind::DateTime => "DateTime",
            HostKind::DateTimeOffset => "DateTimeOffset",
            HostKind::Int16 => "short",
            HostKind::Int32 => "int",
            HostKind::Int64 => "long",
            HostKind::Decimal => "decimal",
            HostKind::Double => "double",
            HostKind::Float => "float",
            HostKind::TimeSpan => "TimeSpan",
            HostKind::Guid => "Guid",
            HostKind::Bytes => "byte[]",
            HostKind::Chars => "char[]",
            HostKind::Other(name) => name,
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "bool" | "boolean" | "Boolean" => HostKind::Bool,
            "byte" | "u8" | "Byte" => HostKind::Byte,
            "string" | "String" | "str" => HostKind::String,
            "DateTime" | "datetime" | "NaiveDateTime" => HostKind::DateTime,
            "DateTimeOffset" | "datetimeoffset" => HostKind::DateTimeOffset,
            "short" | "i16" | "Int16" => HostKind::Int16,
            "int" | "i32" | "Int32" => HostKind::Int32,
            "long" | "i64" | "Int64" => HostKind::Int64,
            "decimal" | "Decimal" => HostKind::Decimal,
            "double" | "f64" | "Double" => HostKind::Double,
            "float" | "f32" | "Single" => HostKind::Float,
            "TimeSpan" | "timespan" | "Duration" => HostKind::TimeSpan,
            "Guid" | "guid" | "Uuid" | "uuid" => HostKind::Guid,
            "byte[]" | "Vec<u8>" | "bytes" => HostKind::Bytes,
            "char[]" | "Vec<char>" | "chars" => HostKind::Chars,
            other => HostKind::Other(other.to_string()),
        }
    }
}

/// Host type: a primitive kind, optionally in its nullable variant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HostType {
    pub kind: HostKind,
    pub nullable: bool,
}

impl HostType {
    pub fn new(kind: HostKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    pub fn nullable(kind: HostKind) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }

    /// The nullable variant of this type
    pub fn into_nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    pub fn is_nullable_variant(&self) -> bool {
        self.nullable
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.name())?;
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// Parses `int`, `int?`, `Guid`, `byte[]`, ... ; unknown names become
/// [`HostKind::Other`].
impl FromStr for HostType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (name, nullable) = match s.strip_suffix('?') {
            Some(base) => (base.trim_end(), true),
            None => (s, false),
        };

        if name.is_empty() {
            return Err(Error::SchemaParse {
                message: format!("empty host type name in '{}'", s),
            });
        }

        Ok(Self {
            kind: HostKind::from_name(name),
            nullable,
        })
    }
}

impl TryFrom<String> for HostType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<HostType> for String {
    fn from(value: HostType) -> Self {
        value.to_string()
    }
}

/// Rust types usable as host schema properties
pub trait HostTyped {
    fn host_type() -> HostType;
}

macro_rules! host_typed {
    ($($ty:ty => $kind:expr),* $(,)?) => {
        $(
            impl HostTyped for $ty {
                fn host_type() -> HostType {
                    HostType::new($kind)
                }
            }
        )*
    };
}

host_typed! {
    bool => HostKind::Bool,
    u8 => HostKind::Byte,
    String => HostKind::String,
    &str => HostKind::String,
    chrono::NaiveDateTime => HostKind::DateTime,
    chrono::DateTime<chrono::FixedOffset> => HostKind::DateTimeOffset,
    chrono::DateTime<chrono::Utc> => HostKind::DateTimeOffset,
    i16 => HostKind::Int16,
    i32 => HostKind::Int32,
    i64 => HostKind::Int64,
    f64 => HostKind::Double,
    f32 => HostKind::Float,
    std::time::Duration => HostKind::TimeSpan,
    chrono::NaiveTime => HostKind::TimeSpan,
    uuid::Uuid => HostKind::Guid,
    Vec<u8> => HostKind::Bytes,
    Vec<char> => HostKind::Chars,
}

impl<T: HostTyped> HostTyped for Option<T> {
    fn host_type() -> HostType {
        T::host_type().into_nullable()
    }
}
