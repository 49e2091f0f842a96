//! Table variable section builder
//!
//! Accumulates the columns of a `DECLARE @name TABLE (...)` statement.

use sqlscript_core::schema::{Column, ColumnType, Property, SchemaDescriptor, TableColumn};
use sqlscript_core::{DestinationTable, Error, Result, VariableName};

use super::insert_data::InsertDataSection;
use super::state::SectionState;
use super::{Section, TableVariable};
use crate::composer::ScriptComposer;

/// Open table variable section
///
/// Every step consumes the builder and hands it back, so a chain reads
/// top to bottom and ends in [`finalize`](Self::finalize) or
/// [`begin_insert`](Self::begin_insert).
///
/// A finalized section is gone; it cannot be touched again:
///
/// ```compile_fail
/// use sqlscript::{ColumnType, ScriptComposer};
///
/// fn build() -> sqlscript::Result<()> {
///     let mut composer = ScriptComposer::new();
///     let section = composer.declare_table_variable("t")?;
///     section.finalize()?;
///     section.column("c1", ColumnType::Int)?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct TableVariableSection<'a> {
    composer: &'a mut ScriptComposer,
    name: VariableName,
    schema: Option<SchemaDescriptor>,
    state: SectionState<TableColumn>,
}

impl<'a> TableVariableSection<'a> {
    pub(crate) fn new(
        composer: &'a mut ScriptComposer,
        name: VariableName,
        schema: Option<SchemaDescriptor>,
    ) -> Self {
        let state = SectionState::new(name.as_str());
        Self {
            composer,
            name,
            schema,
            state,
        }
    }

    pub fn name(&self) -> &VariableName {
        &self.name
    }

    /// Bound host schema, if declared from one
    pub fn schema(&self) -> Option<&SchemaDescriptor> {
        self.schema.as_ref()
    }

    pub fn is_schema_bound(&self) -> bool {
        self.schema.is_some()
    }

    pub fn column_exists(&self, name: &str) -> bool {
        self.state.contains(name)
    }

    pub fn columns(&self) -> impl Iterator<Item = &TableColumn> {
        self.state.columns()
    }

    /// `NOT NULL`, non-key column
    pub fn column(self, name: &str, data_type: ColumnType) -> Result<Self> {
        self.column_with(name, data_type, false, false)
    }

    pub fn column_with(
        self,
        name: &str,
        data_type: ColumnType,
        allow_null: bool,
        is_primary_key: bool,
    ) -> Result<Self> {
        let column = TableColumn::new(name, data_type, allow_null, is_primary_key)?;
        self.add_column(column)
    }

    /// Fails with `DuplicateColumn` when the name is already taken.
    pub fn add_column(mut self, column: TableColumn) -> Result<Self> {
        self.state.insert(column)?;
        Ok(self)
    }

    /// Column for one property of the bound schema
    ///
    /// `data_type` and `allow_null` are inferred from the property when `None`.
    pub fn property_column(
        self,
        property: &str,
        data_type: Option<ColumnType>,
        allow_null: Option<bool>,
        is_primary_key: bool,
    ) -> Result<Self> {
        let property = self.bound_property(property)?;
        let column = TableColumn::infer(&property, data_type, allow_null, is_primary_key)?;
        self.add_column(column)
    }

    /// One inferred column per property of the bound schema
    ///
    /// Properties whose column already exists are skipped, not rejected.
    pub fn generate_columns(self) -> Result<Self> {
        self.generate_columns_with(TableColumn::from_property)
    }

    /// Like [`generate_columns`](Self::generate_columns) with a caller-built column per property
    pub fn generate_columns_with<F>(mut self, mut factory: F) -> Result<Self>
    where
        F: FnMut(&Property) -> Result<TableColumn>,
    {
        let properties = self.bound_schema()?.properties.clone();

        for property in &properties {
            let column = factory(property)?;
            if self.state.contains(column.name.as_str()) {
                tracing::debug!(
                    "section {}: column {} already defined, skipping property",
                    self.name,
                    column.name
                );
                continue;
            }
            self.state.insert(column)?;
        }

        Ok(self)
    }

    /// Finalizes the section and returns the composer
    ///
    /// Fails with `EmptyTableVariable` when no column was defined, and with
    /// `DuplicateVariableName` when the variable was already declared in this
    /// script.
    pub fn finalize(self) -> Result<&'a mut ScriptComposer> {
        let Self {
            composer,
            name,
            schema,
            mut state,
        } = self;

        if state.is_empty() {
            return Err(Error::EmptyTableVariable {
                section: name.to_string(),
            });
        }
        state.finalize()?;
        let section = Section::TableVariable(TableVariable {
            name,
            columns: state.into_columns(),
            schema: schema.map(|s| s.name),
        });
        composer.register_finalized_section(section)?;

        Ok(composer)
    }

    /// Finalizes this section and opens an insert into the variable
    ///
    /// A schema-bound section seeds the insert with all of its columns.
    pub fn begin_insert(self) -> Result<InsertDataSection<'a>> {
        let destination = DestinationTable::Variable(self.name.clone());
        let schema = self.schema.clone();
        let seed: Vec<Column> = if schema.is_some() {
            self.state.columns().map(Column::from).collect()
        } else {
            Vec::new()
        };

        let composer = self.finalize()?;
        let mut insert = InsertDataSection::new(composer, destination, schema);
        for column in seed {
            insert = insert.add_column(column)?;
        }

        Ok(insert)
    }

    fn bound_schema(&self) -> Result<&SchemaDescriptor> {
        self.schema.as_ref().ok_or_else(|| Error::SchemaNotBound {
            section: self.name.to_string(),
        })
    }

    fn bound_property(&self, name: &str) -> Result<Property> {
        let schema = self.bound_schema()?;
        schema.property(name).cloned().ok_or_else(|| Error::SchemaParse {
            message: format!("schema '{}' has no property '{}'", schema.name, name),
        })
    }
}
