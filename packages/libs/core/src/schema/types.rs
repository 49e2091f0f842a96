//! Column data types
//!
//! The fixed set of T-SQL column types that sections can declare.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Column data type
///
/// `length: None` on the variable-length types renders as `(MAX)`; on the
/// fixed-length types it leaves the length off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnType {
    /// BIT
    Bit,

    /// 8-bit unsigned integer
    TinyInt,

    /// 16-bit integer
    SmallInt,

    /// 32-bit integer
    Int,

    /// 64-bit integer
    BigInt,

    /// Fixed-point number
    Decimal {
        #[serde(default = "default_precision")]
        precision: u8,
        #[serde(default = "default_scale")]
        scale: u8,
    },

    /// 64-bit floating point
    Float,

    /// 32-bit floating point
    Real,

    Money,

    /// Unicode text
    NVarChar {
        #[serde(default)]
        length: Option<u16>,
    },

    /// Non-unicode text
    VarChar {
        #[serde(default)]
        length: Option<u16>,
    },

    /// Fixed-length unicode text
    NChar {
        #[serde(default)]
        length: Option<u16>,
    },

    /// Fixed-length non-unicode text
    Char {
        #[serde(default)]
        length: Option<u16>,
    },

    Date,

    DateTime,

    DateTime2,

    DateTimeOffset,

    Time,

    UniqueIdentifier,

    /// Fixed-length binary
    Binary {
        #[serde(default)]
        length: Option<u16>,
    },

    /// Variable-length binary
    VarBinary {
        #[serde(default)]
        length: Option<u16>,
    },

    Xml,
}

fn default_precision() -> u8 {
    18
}
fn default_scale() -> u8 {
    2
}

impl ColumnType {
    /// DECIMAL with the default precision and scale
    pub fn decimal() -> Self {
        ColumnType::Decimal {
            precision: default_precision(),
            scale: default_scale(),
        }
    }

    /// NVARCHAR(MAX)
    pub fn nvarchar_max() -> Self {
        ColumnType::NVarChar { length: None }
    }

    /// Parses a bare type keyword (`int`, `nvarchar`, `datetime2`, ...).
    ///
    /// Sized forms like `nvarchar(50)` have to go through the tagged
    /// (YAML/JSON) representation.
    pub fn from_simple_str(s: &str) -> Option<Self> {
        let ty = match s.to_ascii_lowercase().as_str() {
            "bit" => ColumnType::Bit,
            "tinyint" => ColumnType::TinyInt,
            "smallint" => ColumnType::SmallInt,
            "int" | "integer" => ColumnType::Int,
            "bigint" => ColumnType::BigInt,
            "decimal" | "numeric" => ColumnType::decimal(),
            "float" => ColumnType::Float,
            "real" => ColumnType::Real,
            "money" => ColumnType::Money,
            "nvarchar" => ColumnType::NVarChar { length: None },
            "varchar" => ColumnType::VarChar { length: None },
            "nchar" => ColumnType::NChar { length: None },
            "char" => ColumnType::Char { length: None },
            "date" => ColumnType::Date,
            "datetime" => ColumnType::DateTime,
            "datetime2" => ColumnType::DateTime2,
            "datetimeoffset" => ColumnType::DateTimeOffset,
            "time" => ColumnType::Time,
            "uniqueidentifier" => ColumnType::UniqueIdentifier,
            "binary" => ColumnType::Binary { length: None },
            "varbinary" => ColumnType::VarBinary { length: None },
            "xml" => ColumnType::Xml,
            _ => return None,
        };
        Some(ty)
    }

    /// T-SQL type text
    pub fn to_tsql_type(&self) -> String {
        match self {
            ColumnType::Bit => "BIT".to_string(),
            ColumnType::TinyInt => "TINYINT".to_string(),
            ColumnType::SmallInt => "SMALLINT".to_string(),
            ColumnType::Int => "INT".to_string(),
            ColumnType::BigInt => "BIGINT".to_string(),
            ColumnType::Decimal { precision, scale } => {
                format!("DECIMAL({},{})", precision, scale)
            }
            ColumnType::Float => "FLOAT".to_string(),
            ColumnType::Real => "REAL".to_string(),
            ColumnType::Money => "MONEY".to_string(),
            ColumnType::NVarChar { length } => variable_length("NVARCHAR", *length),
            ColumnType::VarChar { length } => variable_length("VARCHAR", *length),
            ColumnType::NChar { length } => fixed_length("NCHAR", *length),
            ColumnType::Char { length } => fixed_length("CHAR", *length),
            ColumnType::Date => "DATE".to_string(),
            ColumnType::DateTime => "DATETIME".to_string(),
            ColumnType::DateTime2 => "DATETIME2".to_string(),
            ColumnType::DateTimeOffset => "DATETIMEOFFSET".to_string(),
            ColumnType::Time => "TIME".to_string(),
            ColumnType::UniqueIdentifier => "UNIQUEIDENTIFIER".to_string(),
            ColumnType::Binary { length } => fixed_length("BINARY", *length),
            ColumnType::VarBinary { length } => variable_length("VARBINARY", *length),
            ColumnType::Xml => "XML".to_string(),
        }
    }
}

fn variable_length(keyword: &str, length: Option<u16>) -> String {
    match length {
        Some(n) => format!("{}({})", keyword, n),
        None => format!("{}(MAX)", keyword),
    }
}

fn fixed_length(keyword: &str, length: Option<u16>) -> String {
    match length {
        Some(n) => format!("{}({})", keyword, n),
        None => keyword.to_string(),
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_tsql_type())
    }
}
