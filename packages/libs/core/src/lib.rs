//! sqlscript-core: shared data model for sqlscript
//!
//! Everything a script section is built from: validated identifiers, column
//! types, column entities and the host schemas columns are inferred from.
//!
//! # Module structure
//!
//! - `ident`: variable / table / column names
//! - `schema`: column types, host types, type mapper, columns, descriptors
//! - `error`: common error type

pub mod error;
pub mod ident;
pub mod schema;

pub use error::{Error, Result};
pub use ident::{ColumnName, DestinationTable, TableName, VariableName, VARIABLE_SIGIL};
