//! Script composer
//!
//! Root of a script under construction. Opens sections, receives them back
//! once finalized, and keeps them in finalize order.

use std::collections::{HashSet, VecDeque};

use sqlscript_core::schema::{HostSchema, SchemaDescriptor};
use sqlscript_core::{DestinationTable, Error, Result, VariableName};

use crate::config::RenderOptions;
use crate::render::{Renderer, TSqlRenderer};
use crate::section::{InsertDataSection, Section, TableVariableSection};

/// Script composer
///
/// One composer is one script. Sections opened from it borrow it mutably
/// until they are finalized, so only one section is ever open at a time.
///
/// ```
/// use sqlscript::{ColumnType, ScriptComposer};
///
/// # fn main() -> sqlscript::Result<()> {
/// let mut composer = ScriptComposer::new();
/// composer
///     .declare_table_variable("ids")?
///     .column_with("Id", ColumnType::Int, false, true)?
///     .begin_insert()?
///     .column("Id", ColumnType::Int)?
///     .with_rows([[1], [2], [3]])
///     .finalize()?;
///
/// let script = composer.render()?;
/// assert!(script.starts_with("DECLARE @ids TABLE ("));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ScriptComposer {
    options: RenderOptions,
    sections: VecDeque<Section>,
    registered_variable_names: HashSet<VariableName>,
}

impl ScriptComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Table variables
    // ─────────────────────────────────────────────────────────────────────────────

    /// Opens a `DECLARE @name TABLE` section
    ///
    /// The section is not part of the script until it is finalized.
    pub fn declare_table_variable(&mut self, name: &str) -> Result<TableVariableSection<'_>> {
        let name = VariableName::parse(name)?;
        Ok(TableVariableSection::new(self, name, None))
    }

    /// Opens a table variable section bound to a static host schema
    ///
    /// A blank `name` falls back to the schema name.
    pub fn declare_typed_table_variable<S: HostSchema>(
        &mut self,
        name: &str,
    ) -> Result<TableVariableSection<'_>> {
        self.declare_table_variable_from(S::descriptor(), name)
    }

    /// Opens a table variable section bound to a runtime schema descriptor
    pub fn declare_table_variable_from(
        &mut self,
        schema: SchemaDescriptor,
        name: &str,
    ) -> Result<TableVariableSection<'_>> {
        let name = VariableName::parse(name_or_default(name, &schema))?;
        Ok(TableVariableSection::new(self, name, Some(schema)))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Inserts
    // ─────────────────────────────────────────────────────────────────────────────

    /// Opens an `INSERT INTO` section
    ///
    /// A destination starting with `@` is a table variable, anything else a
    /// table.
    pub fn insert_data(&mut self, destination: &str) -> Result<InsertDataSection<'_>> {
        let destination = DestinationTable::parse(destination)?;
        Ok(InsertDataSection::new(self, destination, None))
    }

    /// Opens an insert section bound to a static host schema
    ///
    /// A blank `destination` falls back to the schema name (as a table).
    pub fn insert_typed_data<S: HostSchema>(
        &mut self,
        destination: &str,
    ) -> Result<InsertDataSection<'_>> {
        self.insert_data_from(S::descriptor(), destination)
    }

    /// Opens an insert section bound to a runtime schema descriptor
    pub fn insert_data_from(
        &mut self,
        schema: SchemaDescriptor,
        destination: &str,
    ) -> Result<InsertDataSection<'_>> {
        let destination = DestinationTable::parse(name_or_default(destination, &schema))?;
        Ok(InsertDataSection::new(self, destination, Some(schema)))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Registered sections
    // ─────────────────────────────────────────────────────────────────────────────

    /// Queues a finalized section
    ///
    /// Sections declaring a variable must use a name not yet declared in this
    /// script; other sections skip the check.
    pub(crate) fn register_finalized_section(&mut self, section: Section) -> Result<()> {
        if let Some(name) = section.declared_variable() {
            if self.registered_variable_names.contains(name) {
                return Err(Error::DuplicateVariableName {
                    name: name.to_string(),
                });
            }
            self.registered_variable_names.insert(name.clone());
        }

        tracing::debug!(
            "section #{} ({}) registered",
            self.sections.len() + 1,
            section.kind()
        );
        self.sections.push_back(section);
        Ok(())
    }

    /// Finalized sections in finalize order
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Variables declared so far, in declaration order
    pub fn declared_variables(&self) -> impl Iterator<Item = &VariableName> {
        self.sections.iter().filter_map(Section::declared_variable)
    }

    /// Accepts the name with or without `@`.
    pub fn is_variable_declared(&self, name: &str) -> bool {
        match VariableName::parse(name) {
            Ok(name) => self.registered_variable_names.contains(&name),
            Err(_) => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────────

    /// Renders the script as T-SQL with this composer's options
    pub fn render(&self) -> Result<String> {
        self.render_with(&TSqlRenderer::new(self.options.clone()))
    }

    /// Renders every section in finalize order, one fragment per line group
    ///
    /// Sections that render to nothing (an insert without data) are left out.
    pub fn render_with<R: Renderer + ?Sized>(&self, renderer: &R) -> Result<String> {
        let mut script = String::new();

        for section in &self.sections {
            let fragment = renderer.render(section)?;
            if fragment.is_empty() {
                continue;
            }
            script.push_str(&fragment);
            script.push('\n');
        }

        Ok(script)
    }
}

fn name_or_default<'n>(name: &'n str, schema: &'n SchemaDescriptor) -> &'n str {
    if name.trim().is_empty() {
        &schema.name
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use sqlscript_core::schema::{ColumnType, TableColumn};

    use super::*;
    use crate::section::{InsertSource, TableVariable};
    use crate::value::Literal;

    struct Person;

    sqlscript_core::host_schema!(Person {
        Name: String,
        Age: i32,
    });

    #[test]
    fn test_duplicate_variable_name_fails() {
        let mut composer = ScriptComposer::new();
        composer
            .declare_table_variable("t")
            .unwrap()
            .column("c1", ColumnType::Int)
            .unwrap()
            .finalize()
            .unwrap();

        let result = composer
            .declare_table_variable("@t")
            .unwrap()
            .column("c2", ColumnType::Int)
            .unwrap()
            .finalize();

        match result {
            Err(Error::DuplicateVariableName { name }) => assert_eq!(name, "@t"),
            other => panic!("expected DuplicateVariableName, got {:?}", other),
        }

        // the first declaration stays
        assert_eq!(composer.len(), 1);
        assert!(composer.is_variable_declared("t"));
        let declared: Vec<&str> = composer.declared_variables().map(|v| v.as_str()).collect();
        assert_eq!(declared, vec!["@t"]);
    }

    #[test]
    fn test_distinct_variables_coexist() {
        let mut composer = ScriptComposer::new();
        composer
            .declare_table_variable("a")
            .unwrap()
            .column("Id", ColumnType::Int)
            .unwrap()
            .finalize()
            .unwrap()
            .declare_table_variable("b")
            .unwrap()
            .column("Id", ColumnType::Int)
            .unwrap()
            .finalize()
            .unwrap();
        assert_eq!(composer.len(), 2);
    }

    #[test]
    fn test_sections_kept_in_finalize_order() {
        let mut composer = ScriptComposer::new();
        composer
            .declare_table_variable("first")
            .unwrap()
            .column("Id", ColumnType::Int)
            .unwrap()
            .finalize()
            .unwrap()
            .insert_data("Second")
            .unwrap()
            .finalize()
            .unwrap()
            .declare_table_variable("third")
            .unwrap()
            .column("Id", ColumnType::Int)
            .unwrap()
            .finalize()
            .unwrap();

        let kinds: Vec<String> = composer
            .sections()
            .map(|s| match s {
                Section::TableVariable(t) => t.name.to_string(),
                Section::InsertData(i) => i.destination.to_string(),
            })
            .collect();
        assert_eq!(kinds, vec!["@first", "Second", "@third"]);
    }

    #[test]
    fn test_typed_declaration_defaults_to_schema_name() {
        let mut composer = ScriptComposer::new();
        let section = composer.declare_typed_table_variable::<Person>("  ").unwrap();
        assert_eq!(section.name().as_str(), "@Person");

        let mut composer = ScriptComposer::new();
        let section = composer.declare_typed_table_variable::<Person>("people").unwrap();
        assert_eq!(section.name().as_str(), "@people");
        assert_eq!(section.schema().unwrap().name, "Person");
    }

    #[test]
    fn test_typed_insert_defaults_to_schema_table() {
        let mut composer = ScriptComposer::new();
        let insert = composer.insert_typed_data::<Person>("").unwrap();
        assert_eq!(
            insert.destination(),
            &DestinationTable::parse("Person").unwrap()
        );
    }

    #[test]
    fn test_end_to_end_single_table_variable() {
        let mut composer = ScriptComposer::new();
        composer
            .declare_table_variable("t")
            .unwrap()
            .column("c1", ColumnType::Int)
            .unwrap()
            .finalize()
            .unwrap();

        assert_eq!(composer.len(), 1);
        let script = composer.render().unwrap();
        assert_eq!(script, "DECLARE @t TABLE (\n    [c1] INT NOT NULL\n);\n");
        assert!(script.contains("@t"));
        assert!(script.contains("[c1] INT"));
    }

    #[test]
    fn test_end_to_end_generated_columns_seed_insert() {
        let mut composer = ScriptComposer::new();
        let insert = composer
            .declare_typed_table_variable::<Person>("")
            .unwrap()
            .generate_columns()
            .unwrap()
            .begin_insert()
            .unwrap();

        let columns: Vec<(&str, ColumnType)> = insert
            .columns()
            .map(|c| (c.name.as_str(), c.data_type))
            .collect();
        assert_eq!(
            columns,
            vec![("Name", ColumnType::nvarchar_max()), ("Age", ColumnType::Int)]
        );

        insert
            .with_values([Literal::from("Ada"), Literal::from(36)])
            .finalize()
            .unwrap();

        let script = composer.render().unwrap();
        let expected = "\
DECLARE @Person TABLE (
    [Name] NVARCHAR(MAX) NOT NULL,
    [Age] INT NOT NULL
);
INSERT INTO @Person ([Name], [Age])
VALUES (N'Ada', 36);
";
        assert_eq!(script, expected);
    }

    #[test]
    fn test_insert_without_data_renders_nothing() {
        let mut composer = ScriptComposer::new();
        composer
            .insert_data("People")
            .unwrap()
            .column("Name", ColumnType::nvarchar_max())
            .unwrap()
            .finalize()
            .unwrap();

        assert_eq!(composer.len(), 1);
        assert_eq!(composer.render().unwrap(), "");
    }

    #[test]
    fn test_custom_options_apply() {
        let options = RenderOptions {
            indent: 2,
            quote_identifiers: false,
            terminate_statements: false,
            ..RenderOptions::default()
        };
        let mut composer = ScriptComposer::with_options(options);
        composer
            .declare_table_variable("t")
            .unwrap()
            .add_column(TableColumn::new("Id", ColumnType::BigInt, false, true).unwrap())
            .unwrap()
            .finalize()
            .unwrap();

        assert_eq!(
            composer.render().unwrap(),
            "DECLARE @t TABLE (\n  Id BIGINT NOT NULL PRIMARY KEY\n)\n"
        );
    }

    struct DeclarationsOnly;

    impl Renderer for DeclarationsOnly {
        fn render_table_variable(&self, section: &TableVariable) -> Result<String> {
            Ok(format!("-- {}", section.name))
        }
    }

    #[test]
    fn test_custom_renderer_unsupported_kind() {
        let mut composer = ScriptComposer::new();
        composer
            .declare_table_variable("t")
            .unwrap()
            .column("Id", ColumnType::Int)
            .unwrap()
            .finalize()
            .unwrap();
        assert_eq!(composer.render_with(&DeclarationsOnly).unwrap(), "-- @t\n");

        composer
            .insert_data("@t")
            .unwrap()
            .with_query("SELECT 1")
            .finalize()
            .unwrap();
        match composer.render_with(&DeclarationsOnly) {
            Err(Error::UnsupportedSectionType { kind }) => assert_eq!(kind, "insert data"),
            other => panic!("expected UnsupportedSectionType, got {:?}", other),
        }
    }

    #[test]
    fn test_registered_sources_survive_finalize() {
        let mut composer = ScriptComposer::new();
        composer
            .insert_data("People")
            .unwrap()
            .with_query("SELECT Name FROM Staff")
            .finalize()
            .unwrap();

        let first = composer.sections().next();
        match first {
            Some(Section::InsertData(insert)) => assert_eq!(
                insert.sources,
                vec![InsertSource::Query("SELECT Name FROM Staff".to_string())]
            ),
            other => panic!("expected insert section, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_table_variable_never_reaches_script() {
        let mut composer = ScriptComposer::new();
        let result = composer.declare_table_variable("t").unwrap().finalize();
        assert!(matches!(result, Err(Error::EmptyTableVariable { .. })));

        assert!(composer.is_empty());
        assert_eq!(composer.render().unwrap(), "");
    }
}
