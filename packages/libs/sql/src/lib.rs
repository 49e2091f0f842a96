//! sqlscript: fluent T-SQL script composition
//!
//! A [`ScriptComposer`] collects sections (table variable declarations and
//! inserts) built through chained builders, then renders them in finalize
//! order as one script.
//!
//! # Module structure
//!
//! - `composer`: script root, section queue, variable name registry
//! - `section`: section builders and their finalized forms
//! - `value`: literal values and their T-SQL text
//! - `render`: section renderers, T-SQL dialect
//! - `config`: render options

pub mod composer;
pub mod config;
pub mod render;
pub mod section;
pub mod value;

pub use composer::ScriptComposer;
pub use config::RenderOptions;
pub use render::{Renderer, TSqlRenderer};
pub use section::{
    InsertData, InsertDataSection, InsertSource, Section, SectionKind, TableVariable,
    TableVariableSection,
};
pub use value::Literal;

pub use sqlscript_core::schema::{
    Column, ColumnType, HostKind, HostSchema, HostType, HostTyped, Property, SchemaDescriptor,
    SchemaParser, TableColumn, TypeMapper,
};
pub use sqlscript_core::{
    host_schema, ColumnName, DestinationTable, Error, Result, TableName, VariableName,
};
