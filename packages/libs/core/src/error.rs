//! Common error type
//!
//! Every failure in sqlscript is a caller programming error raised at the
//! exact call that broke an invariant. Nothing here is retried.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// sqlscript common error
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Identifier Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("invalid identifier '{name}': {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },

    // ─────────────────────────────────────────────────────────────────────────────
    // Section Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("column name '{column}' already exists in section '{section}'")]
    DuplicateColumn { section: String, column: String },

    #[error("variable name '{name}' has already been declared in this script")]
    DuplicateVariableName { name: String },

    #[error("section '{section}' has already been finalized")]
    SectionFinalized { section: String },

    #[error("cannot add columns to section '{section}' once data population has begun")]
    DataPopulationStarted { section: String },

    #[error("table variable '{section}' declares no columns")]
    EmptyTableVariable { section: String },

    #[error("section '{section}' is not bound to a host schema")]
    SchemaNotBound { section: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Type Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("no column type mapped for host type '{type_name}'")]
    UnmappedType { type_name: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Rendering Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("cannot render sections of kind '{kind}'")]
    UnsupportedSectionType { kind: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Schema Descriptor / Serialization Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("schema parse error: {message}")]
    SchemaParse { message: String },

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidIdentifier { .. } => "INVALID_IDENTIFIER",
            Error::DuplicateColumn { .. } => "DUPLICATE_COLUMN",
            Error::DuplicateVariableName { .. } => "DUPLICATE_VARIABLE_NAME",
            Error::SectionFinalized { .. } => "SECTION_FINALIZED",
            Error::DataPopulationStarted { .. } => "DATA_POPULATION_STARTED",
            Error::EmptyTableVariable { .. } => "EMPTY_TABLE_VARIABLE",
            Error::SchemaNotBound { .. } => "SCHEMA_NOT_BOUND",
            Error::UnmappedType { .. } => "UNMAPPED_TYPE",
            Error::UnsupportedSectionType { .. } => "UNSUPPORTED_SECTION_TYPE",
            Error::SchemaParse { .. } => "SCHEMA_PARSE_ERROR",
            Error::Yaml(_) => "YAML_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }
    }
}
