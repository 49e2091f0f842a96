//! Identifier value types
//!
//! Names supplied for variables, tables and columns are validated once, at
//! construction, and never change afterwards.
//!
//! # Rules
//!
//! - Not empty and not whitespace only
//! - Only `[A-Za-z0-9_]`
//! - Variable names carry exactly one leading `@`; it is added when missing

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Leading marker of a variable name
pub const VARIABLE_SIGIL: char = '@';

fn invalid(name: &str, reason: &'static str) -> Error {
    Error::InvalidIdentifier {
        name: name.to_string(),
        reason,
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Validates the body of a name (everything after an optional sigil).
fn validate_body(raw: &str, body: &str) -> Result<()> {
    if body.trim().is_empty() {
        return Err(invalid(
            raw,
            "name cannot be empty or consist entirely of whitespace",
        ));
    }

    if !body.chars().all(is_identifier_char) {
        return Err(invalid(
            raw,
            "name can only contain letters, numbers and underscores",
        ));
    }

    Ok(())
}

macro_rules! identifier_impls {
    ($ty:ident) => {
        impl $ty {
            /// Textual form
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = Error;

            fn try_from(value: String) -> Result<Self> {
                Self::parse(&value)
            }
        }

        impl TryFrom<&str> for $ty {
            type Error = Error;

            fn try_from(value: &str) -> Result<Self> {
                Self::parse(value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

/// Variable name, always rendered with one leading `@`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VariableName(String);

impl VariableName {
    /// Normalizes (prepends `@` when absent) and validates.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(invalid(
                raw,
                "name cannot be empty or consist entirely of whitespace",
            ));
        }

        let normalized = if raw.starts_with(VARIABLE_SIGIL) {
            raw.to_string()
        } else {
            format!("{}{}", VARIABLE_SIGIL, raw)
        };

        let body = &normalized[VARIABLE_SIGIL.len_utf8()..];
        if body.starts_with(VARIABLE_SIGIL) {
            return Err(invalid(
                raw,
                "variable name must not start with two or more '@' signs",
            ));
        }
        validate_body(raw, body)?;

        Ok(Self(normalized))
    }

    /// Name without the leading `@`
    pub fn bare(&self) -> &str {
        &self.0[VARIABLE_SIGIL.len_utf8()..]
    }
}

identifier_impls!(VariableName);

/// Table name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableName(String);

impl TableName {
    pub fn parse(raw: &str) -> Result<Self> {
        validate_body(raw, raw)?;
        Ok(Self(raw.to_string()))
    }
}

identifier_impls!(TableName);

/// Column name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnName(String);

impl ColumnName {
    pub fn parse(raw: &str) -> Result<Self> {
        validate_body(raw, raw)?;
        Ok(Self(raw.to_string()))
    }
}

identifier_impls!(ColumnName);

/// Target of an insert statement: a real table or a table variable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationTable {
    Table(TableName),
    Variable(VariableName),
}

impl DestinationTable {
    /// A leading `@` selects a variable, anything else a table.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.starts_with(VARIABLE_SIGIL) {
            Ok(DestinationTable::Variable(VariableName::parse(raw)?))
        } else {
            Ok(DestinationTable::Table(TableName::parse(raw)?))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DestinationTable::Table(name) => name.as_str(),
            DestinationTable::Variable(name) => name.as_str(),
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, DestinationTable::Variable(_))
    }
}

impl fmt::Display for DestinationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<VariableName> for DestinationTable {
    fn from(value: VariableName) -> Self {
        DestinationTable::Variable(value)
    }
}

impl From<TableName> for DestinationTable {
    fn from(value: TableName) -> Self {
        DestinationTable::Table(value)
    }
}
