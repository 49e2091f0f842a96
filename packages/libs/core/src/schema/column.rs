//! Column entities
//!
//! Pure data: a validated name plus a type. [`TableColumn`] adds the
//! nullability and key flags a table declaration needs.

use serde::{Deserialize, Serialize};

use super::descriptor::Property;
use super::mapper::TypeMapper;
use super::types::ColumnType;
use crate::error::Result;
use crate::ident::ColumnName;

/// Column referenced by an insert statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: ColumnName,

    /// Column type
    #[serde(flatten)]
    pub data_type: ColumnType,
}

impl Column {
    pub fn new(name: &str, data_type: ColumnType) -> Result<Self> {
        Ok(Self {
            name: ColumnName::parse(name)?,
            data_type,
        })
    }

    /// Column for a host property, typed through the [`TypeMapper`]
    pub fn from_property(property: &Property) -> Result<Self> {
        Self::new(
            &property.name,
            TypeMapper::map_host_type(&property.host_type)?,
        )
    }
}

/// Column of a table declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    /// Column name
    pub name: ColumnName,

    /// Column type
    #[serde(flatten)]
    pub data_type: ColumnType,

    /// NULL allowed
    #[serde(default)]
    pub allow_null: bool,

    /// Part of the primary key
    #[serde(default)]
    pub is_primary_key: bool,
}

impl TableColumn {
    pub fn new(
        name: &str,
        data_type: ColumnType,
        allow_null: bool,
        is_primary_key: bool,
    ) -> Result<Self> {
        Ok(Self {
            name: ColumnName::parse(name)?,
            data_type,
            allow_null,
            is_primary_key,
        })
    }

    /// Infers whatever is not given explicitly from a host property
    ///
    /// - `data_type`: mapped from the property's host type
    /// - `allow_null`: whether the host type is a nullable variant
    pub fn infer(
        property: &Property,
        data_type: Option<ColumnType>,
        allow_null: Option<bool>,
        is_primary_key: bool,
    ) -> Result<Self> {
        let data_type = match data_type {
            Some(ty) => ty,
            None => TypeMapper::map_host_type(&property.host_type)?,
        };
        let allow_null = allow_null.unwrap_or_else(|| property.host_type.is_nullable_variant());

        Self::new(&property.name, data_type, allow_null, is_primary_key)
    }

    /// Fully inferred column, not a key
    pub fn from_property(property: &Property) -> Result<Self> {
        Self::infer(property, None, None, false)
    }
}

impl From<TableColumn> for Column {
    fn from(value: TableColumn) -> Self {
        Column {
            name: value.name,
            data_type: value.data_type,
        }
    }
}

impl From<&TableColumn> for Column {
    fn from(value: &TableColumn) -> Self {
        Column {
            name: value.name.clone(),
            data_type: value.data_type,
        }
    }
}
