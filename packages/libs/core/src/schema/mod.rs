//! Column types, column entities and host schemas
//!
//! # Module structure
//!
//! - `types`: T-SQL column types
//! - `host`: host-language primitive types
//! - `mapper`: host type → column type lookup
//! - `descriptor`: host schemas (static trait or runtime descriptor)
//! - `column`: column entities
//! - `parser`: YAML/JSON descriptor parsing

mod column;
mod descriptor;
mod host;
mod mapper;
mod parser;
mod types;

pub use column::{Column, TableColumn};
pub use descriptor::{HostSchema, Property, SchemaDescriptor};
pub use host::{HostKind, HostType, HostTyped};
pub use mapper::TypeMapper;
pub use parser::SchemaParser;
pub use types::ColumnType;
