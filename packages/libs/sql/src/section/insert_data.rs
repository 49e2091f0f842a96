//! Insert data section builder
//!
//! Two phases before finalize:
//!
//! 1. columns open: the insert column list is being defined
//! 2. data defining: rows are supplied from literal values or a query; the
//!    column list is frozen from the first data call on
//!
//! Finalizing straight from phase 1 is allowed and renders nothing.

use sqlscript_core::schema::{Column, ColumnType, Property, SchemaDescriptor};
use sqlscript_core::{DestinationTable, Error, Result};

use super::state::SectionState;
use super::{InsertData, InsertSource, Section};
use crate::composer::ScriptComposer;
use crate::value::Literal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    ColumnsOpen,
    DataDefining,
}

/// Open insert section
#[derive(Debug)]
pub struct InsertDataSection<'a> {
    composer: &'a mut ScriptComposer,
    destination: DestinationTable,
    schema: Option<SchemaDescriptor>,
    state: SectionState<Column>,
    phase: Phase,
    sources: Vec<InsertSource>,
}

impl<'a> InsertDataSection<'a> {
    pub(crate) fn new(
        composer: &'a mut ScriptComposer,
        destination: DestinationTable,
        schema: Option<SchemaDescriptor>,
    ) -> Self {
        let state = SectionState::new(destination.as_str());
        Self {
            composer,
            destination,
            schema,
            state,
            phase: Phase::ColumnsOpen,
            sources: Vec::new(),
        }
    }

    pub fn destination(&self) -> &DestinationTable {
        &self.destination
    }

    pub fn schema(&self) -> Option<&SchemaDescriptor> {
        self.schema.as_ref()
    }

    pub fn is_schema_bound(&self) -> bool {
        self.schema.is_some()
    }

    pub fn column_exists(&self, name: &str) -> bool {
        self.state.contains(name)
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.state.columns()
    }

    /// True once any data source has been defined
    pub fn is_data_defining(&self) -> bool {
        self.phase == Phase::DataDefining
    }

    pub fn is_finalized(&self) -> bool {
        self.state.is_finalized()
    }

    pub fn column(self, name: &str, data_type: ColumnType) -> Result<Self> {
        let column = Column::new(name, data_type)?;
        self.add_column(column)
    }

    /// Fails with `DataPopulationStarted` once data has been defined, and
    /// with `DuplicateColumn` on a repeated name.
    pub fn add_column(mut self, column: Column) -> Result<Self> {
        self.state.ensure_open()?;
        if self.phase == Phase::DataDefining {
            return Err(Error::DataPopulationStarted {
                section: self.state.label().to_string(),
            });
        }
        self.state.insert(column)?;
        Ok(self)
    }

    /// Column for one property of the bound schema
    pub fn property_column(self, property: &str, data_type: Option<ColumnType>) -> Result<Self> {
        let schema = self.schema.as_ref().ok_or_else(|| Error::SchemaNotBound {
            section: self.destination.to_string(),
        })?;
        let property = schema.property(property).ok_or_else(|| Error::SchemaParse {
            message: format!("schema '{}' has no property '{}'", schema.name, property),
        })?;
        let column = match data_type {
            Some(ty) => Column::new(&property.name, ty)?,
            None => Column::from_property(property)?,
        };
        self.add_column(column)
    }

    /// One inferred column per property of the bound schema, skipping
    /// properties whose column already exists
    pub fn generate_columns(self) -> Result<Self> {
        self.generate_columns_with(Column::from_property)
    }

    pub fn generate_columns_with<F>(mut self, mut factory: F) -> Result<Self>
    where
        F: FnMut(&Property) -> Result<Column>,
    {
        let properties = match &self.schema {
            Some(schema) => schema.properties.clone(),
            None => {
                return Err(Error::SchemaNotBound {
                    section: self.destination.to_string(),
                })
            }
        };

        for property in &properties {
            let column = factory(property)?;
            if self.state.contains(column.name.as_str()) {
                tracing::debug!(
                    "section {}: column {} already defined, skipping property",
                    self.destination,
                    column.name
                );
                continue;
            }
            self = self.add_column(column)?;
        }

        Ok(self)
    }

    /// Inserts one row of literal values
    pub fn with_values<I, L>(self, row: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        let row = row.into_iter().map(Into::into).collect();
        self.define_data(InsertSource::Values(row))
    }

    /// Inserts a list of literal rows
    pub fn with_rows<R, I, L>(self, rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        self.define_data(InsertSource::ValueList(rows))
    }

    /// Inserts the rows produced by a query
    pub fn with_query(self, query: impl Into<String>) -> Self {
        self.define_data(InsertSource::Query(query.into()))
    }

    fn define_data(mut self, source: InsertSource) -> Self {
        if self.phase == Phase::ColumnsOpen {
            tracing::trace!("section {}: data definition started", self.destination);
            self.phase = Phase::DataDefining;
        }
        self.sources.push(source);
        self
    }

    /// Finalizes the section and returns the composer
    pub fn finalize(self) -> Result<&'a mut ScriptComposer> {
        let Self {
            composer,
            destination,
            mut state,
            sources,
            ..
        } = self;

        state.finalize()?;
        let section = Section::InsertData(InsertData {
            destination,
            columns: state.into_columns(),
            sources,
        });
        composer.register_finalized_section(section)?;

        Ok(composer)
    }
}

#[cfg(test)]
mod tests {
    use sqlscript_core::schema::{HostKind, HostType};

    use super::*;

    #[test]
    fn test_destination_kind_from_sigil() {
        let mut composer = ScriptComposer::new();
        let insert = composer.insert_data("People").unwrap();
        assert!(!insert.destination().is_variable());

        let mut composer = ScriptComposer::new();
        let insert = composer.insert_data("@people").unwrap();
        assert!(insert.destination().is_variable());
    }

    #[test]
    fn test_invalid_destination_fails() {
        let mut composer = ScriptComposer::new();
        assert!(matches!(
            composer.insert_data("dbo.People"),
            Err(Error::InvalidIdentifier { .. })
        ));
        assert!(matches!(
            composer.insert_data("@@people"),
            Err(Error::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn test_duplicate_column_fails() {
        let mut composer = ScriptComposer::new();
        let result = composer
            .insert_data("People")
            .unwrap()
            .column("Name", ColumnType::nvarchar_max())
            .unwrap()
            .column("Name", ColumnType::Int);
        assert!(matches!(result, Err(Error::DuplicateColumn { .. })));
    }

    #[test]
    fn test_column_after_data_definition_fails() {
        let mut composer = ScriptComposer::new();
        let insert = composer
            .insert_data("People")
            .unwrap()
            .column("Name", ColumnType::nvarchar_max())
            .unwrap()
            .with_values(["Ada"]);

        assert!(insert.is_data_defining());
        assert!(!insert.is_finalized());
        assert!(matches!(
            insert.column("Age", ColumnType::Int),
            Err(Error::DataPopulationStarted { .. })
        ));
    }

    #[test]
    fn test_every_data_facility_freezes_columns() {
        let mut composer = ScriptComposer::new();
        let insert = composer.insert_data("People").unwrap().with_query("SELECT 1");
        assert!(matches!(
            insert.column("Age", ColumnType::Int),
            Err(Error::DataPopulationStarted { .. })
        ));

        let mut composer = ScriptComposer::new();
        let insert = composer
            .insert_data("People")
            .unwrap()
            .with_rows(Vec::<Vec<Literal>>::new());
        assert!(insert.is_data_defining());
    }

    #[test]
    fn test_column_exists() {
        let mut composer = ScriptComposer::new();
        let insert = composer
            .insert_data("People")
            .unwrap()
            .column("Name", ColumnType::nvarchar_max())
            .unwrap();
        assert!(insert.column_exists("Name"));
        assert!(!insert.column_exists("Age"));
    }

    #[test]
    fn test_finalize_without_data() {
        let mut composer = ScriptComposer::new();
        composer
            .insert_data("People")
            .unwrap()
            .column("Name", ColumnType::nvarchar_max())
            .unwrap()
            .finalize()
            .unwrap();
        assert_eq!(composer.len(), 1);
    }

    #[test]
    fn test_insert_sections_skip_variable_registry() {
        let mut composer = ScriptComposer::new();
        composer
            .insert_data("@t")
            .unwrap()
            .finalize()
            .unwrap()
            .insert_data("@t")
            .unwrap()
            .finalize()
            .unwrap();
        assert_eq!(composer.len(), 2);
        assert!(!composer.is_variable_declared("@t"));
    }

    #[test]
    fn test_multiple_sources_are_kept_in_order() {
        let mut composer = ScriptComposer::new();
        composer
            .insert_data("People")
            .unwrap()
            .column("Name", ColumnType::nvarchar_max())
            .unwrap()
            .with_values(["Ada"])
            .with_rows(vec![vec!["Grace"], vec!["Linus"]])
            .with_query("SELECT Name FROM Staff")
            .finalize()
            .unwrap();

        let first = composer.sections().next();
        match first {
            Some(Section::InsertData(insert)) => {
                assert_eq!(insert.sources.len(), 3);
                assert!(matches!(insert.sources[0], InsertSource::Values(_)));
                assert!(matches!(insert.sources[1], InsertSource::ValueList(_)));
                assert!(matches!(insert.sources[2], InsertSource::Query(_)));
            }
            other => panic!("expected insert section, got {:?}", other),
        }
    }

    #[test]
    fn test_typed_insert_generates_columns() {
        let schema = SchemaDescriptor::new(
            "Pet",
            vec![
                Property::new("Species", HostType::new(HostKind::String)),
                Property::new("Legs", HostType::new(HostKind::Byte)),
            ],
        );
        let mut composer = ScriptComposer::new();
        let insert = composer
            .insert_data_from(schema, "")
            .unwrap()
            .property_column("Legs", Some(ColumnType::Int))
            .unwrap()
            .generate_columns()
            .unwrap();

        assert_eq!(insert.destination().as_str(), "Pet");
        let columns: Vec<&Column> = insert.columns().collect();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].data_type, ColumnType::Int);
        assert_eq!(columns[1].name.as_str(), "Species");
    }

    #[test]
    fn test_untyped_generate_columns_fails() {
        let mut composer = ScriptComposer::new();
        let result = composer.insert_data("People").unwrap().generate_columns();
        assert!(matches!(result, Err(Error::SchemaNotBound { .. })));
    }
}
