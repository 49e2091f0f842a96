//! Render options
//!
//! Options are plain data: build them in code, or load them from a YAML/JSON
//! document where every missing field takes its default.

use serde::{Deserialize, Serialize};
use sqlscript_core::Result;

/// Render options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Spaces per indentation level
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Wrap table and column names in `[...]` (variables are never wrapped)
    #[serde(default = "default_true")]
    pub quote_identifiers: bool,

    /// End every statement with `;`
    #[serde(default = "default_true")]
    pub terminate_statements: bool,

    /// Rows per `INSERT ... VALUES` statement before a new statement starts
    #[serde(default = "default_max_rows_per_insert")]
    pub max_rows_per_insert: usize,
}

fn default_indent() -> usize {
    4
}
fn default_true() -> bool {
    true
}
// T-SQL row constructor limit
fn default_max_rows_per_insert() -> usize {
    1000
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            quote_identifiers: default_true(),
            terminate_statements: default_true(),
            max_rows_per_insert: default_max_rows_per_insert(),
        }
    }
}

impl RenderOptions {
    /// Options from a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Options from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub(crate) fn indentation(&self) -> String {
        " ".repeat(self.indent)
    }

    pub(crate) fn terminator(&self) -> &'static str {
        if self.terminate_statements {
            ";"
        } else {
            ""
        }
    }

    /// Batch size, never zero
    pub(crate) fn batch_size(&self) -> usize {
        self.max_rows_per_insert.max(1)
    }
}
