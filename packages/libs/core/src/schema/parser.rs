//! Host schema descriptor parser
//!
//! Loads [`SchemaDescriptor`]s from YAML or JSON so the embedding
//! application can describe its types without reflection.
//!
//! # Formats
//!
//! Single descriptor:
//!
//! ```yaml
//! name: Person
//! properties:
//!   - name: Name
//!     type: string
//!   - name: Age
//!     type: int?
//! ```
//!
//! Several descriptors, property order preserved:
//!
//! ```yaml
//! schemas:
//!   Person:
//!     Name: string
//!     Age: int?
//! ```

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Deserialize;

use super::descriptor::{Property, SchemaDescriptor};
use super::host::HostType;
use crate::error::{Error, Result};

/// Descriptor parser
pub struct SchemaParser;

impl SchemaParser {
    /// One descriptor from YAML
    pub fn parse_yaml(yaml: &str) -> Result<SchemaDescriptor> {
        let descriptor: SchemaDescriptor = serde_yaml::from_str(yaml)?;
        Self::validate(descriptor)
    }

    /// One descriptor from JSON
    pub fn parse_json(json: &str) -> Result<SchemaDescriptor> {
        let descriptor: SchemaDescriptor = serde_json::from_str(json)?;
        Self::validate(descriptor)
    }

    /// All descriptors of a `schemas:` document, in document order
    pub fn parse_yaml_many(yaml: &str) -> Result<Vec<SchemaDescriptor>> {
        let raw: RawSchemas = serde_yaml::from_str(yaml)?;
        Self::convert_raw_schemas(raw)
    }

    fn convert_raw_schemas(raw: RawSchemas) -> Result<Vec<SchemaDescriptor>> {
        let mut descriptors = Vec::with_capacity(raw.schemas.len());

        for (name, raw_properties) in raw.schemas {
            let mut properties = Vec::with_capacity(raw_properties.len());
            for (property_name, type_name) in raw_properties {
                let host_type: HostType = type_name.parse()?;
                properties.push(Property::new(property_name, host_type));
            }

            descriptors.push(Self::validate(SchemaDescriptor::new(name, properties))?);
        }

        Ok(descriptors)
    }

    fn validate(descriptor: SchemaDescriptor) -> Result<SchemaDescriptor> {
        if descriptor.name.trim().is_empty() {
            return Err(Error::SchemaParse {
                message: "schema name cannot be empty".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for property in &descriptor.properties {
            if !seen.insert(property.name.as_str()) {
                return Err(Error::SchemaParse {
                    message: format!(
                        "duplicate property '{}' in schema '{}'",
                        property.name, descriptor.name
                    ),
                });
            }
        }

        Ok(descriptor)
    }
}

#[derive(Debug, Deserialize)]
struct RawSchemas {
    #[serde(default)]
    schemas: IndexMap<String, IndexMap<String, String>>,
}
