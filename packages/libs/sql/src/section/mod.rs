//! Script sections
//!
//! A section is one self-contained fragment of the script. While open it is a
//! builder borrowing the composer; once finalized it becomes an immutable
//! [`Section`] queued in the composer.
//!
//! # Module structure
//!
//! - `state`: column map + finalize-once lifecycle shared by all builders
//! - `table_variable`: `DECLARE @x TABLE (...)` builder
//! - `insert_data`: `INSERT INTO ...` builder and its data sources

mod insert_data;
mod state;
mod table_variable;

use std::fmt;

use sqlscript_core::schema::{Column, TableColumn};
use sqlscript_core::{DestinationTable, VariableName};

use crate::value::Literal;

pub use insert_data::InsertDataSection;
pub use table_variable::TableVariableSection;

/// Section kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    TableVariable,
    InsertData,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKind::TableVariable => f.write_str("table variable"),
            SectionKind::InsertData => f.write_str("insert data"),
        }
    }
}

/// Finalized section
#[derive(Debug, Clone)]
pub enum Section {
    TableVariable(TableVariable),
    InsertData(InsertData),
}

impl Section {
    pub fn kind(&self) -> SectionKind {
        match self {
            Section::TableVariable(_) => SectionKind::TableVariable,
            Section::InsertData(_) => SectionKind::InsertData,
        }
    }

    /// Variable this section declares, if any
    pub fn declared_variable(&self) -> Option<&VariableName> {
        match self {
            Section::TableVariable(section) => Some(&section.name),
            Section::InsertData(_) => None,
        }
    }
}

/// Finalized table variable declaration
#[derive(Debug, Clone)]
pub struct TableVariable {
    pub name: VariableName,

    /// Columns in declaration order
    pub columns: Vec<TableColumn>,

    /// Name of the host schema the section was bound to
    pub schema: Option<String>,
}

impl TableVariable {
    /// Primary key columns in declaration order
    pub fn primary_key(&self) -> impl Iterator<Item = &TableColumn> {
        self.columns.iter().filter(|c| c.is_primary_key)
    }
}

/// Finalized insert section
#[derive(Debug, Clone)]
pub struct InsertData {
    pub destination: DestinationTable,

    /// Insert column list; empty means "all columns, table order"
    pub columns: Vec<Column>,

    /// One statement group per source, in the order they were defined
    pub sources: Vec<InsertSource>,
}

/// Where the rows of an insert come from
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// One literal row
    Values(Vec<Literal>),

    /// Several literal rows
    ValueList(Vec<Vec<Literal>>),

    /// Query text producing the rows
    Query(String),
}
