//! Script rendering
//!
//! A [`Renderer`] turns one finalized section into one script fragment.
//! [`TSqlRenderer`] is the T-SQL dialect; other renderers may support only
//! some section kinds and leave the rest to the default methods, which fail
//! with `UnsupportedSectionType`.

use sqlscript_core::schema::{Column, TableColumn};
use sqlscript_core::{DestinationTable, Error, Result};

use crate::config::RenderOptions;
use crate::section::{InsertData, InsertSource, Section, SectionKind, TableVariable};
use crate::value::Literal;

/// Section renderer
pub trait Renderer {
    fn render_table_variable(&self, _section: &TableVariable) -> Result<String> {
        Err(unsupported(SectionKind::TableVariable))
    }

    fn render_insert_data(&self, _section: &InsertData) -> Result<String> {
        Err(unsupported(SectionKind::InsertData))
    }

    /// Dispatches on the section kind
    fn render(&self, section: &Section) -> Result<String> {
        match section {
            Section::TableVariable(s) => self.render_table_variable(s),
            Section::InsertData(s) => self.render_insert_data(s),
        }
    }
}

fn unsupported(kind: SectionKind) -> Error {
    Error::UnsupportedSectionType {
        kind: kind.to_string(),
    }
}

/// T-SQL renderer
#[derive(Debug, Clone, Default)]
pub struct TSqlRenderer {
    options: RenderOptions,
}

impl TSqlRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn quote(&self, name: &str) -> String {
        if self.options.quote_identifiers {
            format!("[{}]", name.replace(']', "]]"))
        } else {
            name.to_string()
        }
    }

    fn destination(&self, destination: &DestinationTable) -> String {
        match destination {
            DestinationTable::Variable(v) => v.to_string(),
            DestinationTable::Table(t) => self.quote(t.as_str()),
        }
    }

    fn column_definition(&self, column: &TableColumn, inline_key: bool) -> String {
        let mut line = format!(
            "{} {} {}",
            self.quote(column.name.as_str()),
            column.data_type.to_tsql_type(),
            if column.allow_null { "NULL" } else { "NOT NULL" }
        );
        if inline_key && column.is_primary_key {
            line.push_str(" PRIMARY KEY");
        }
        line
    }

    fn column_list(&self, columns: &[Column]) -> String {
        if columns.is_empty() {
            return String::new();
        }
        let names: Vec<String> = columns
            .iter()
            .map(|c| self.quote(c.name.as_str()))
            .collect();
        format!(" ({})", names.join(", "))
    }

    fn row(&self, row: &[Literal]) -> String {
        let values: Vec<String> = row.iter().map(Literal::to_tsql).collect();
        format!("({})", values.join(", "))
    }

    fn render_source(&self, head: &str, source: &InsertSource) -> Vec<String> {
        let terminator = self.options.terminator();

        match source {
            InsertSource::Values(row) => {
                vec![format!("{}\nVALUES {}{}", head, self.row(row), terminator)]
            }
            InsertSource::ValueList(rows) if rows.is_empty() => Vec::new(),
            InsertSource::ValueList(rows) => {
                let batch_size = self.options.batch_size();
                if rows.len() > batch_size {
                    tracing::debug!(
                        "{}: splitting {} rows into batches of {}",
                        head,
                        rows.len(),
                        batch_size
                    );
                }

                let indent = self.options.indentation();
                rows.chunks(batch_size)
                    .map(|batch| {
                        let lines: Vec<String> = batch
                            .iter()
                            .map(|row| format!("{}{}", indent, self.row(row)))
                            .collect();
                        format!("{}\nVALUES\n{}{}", head, lines.join(",\n"), terminator)
                    })
                    .collect()
            }
            InsertSource::Query(query) => {
                let query = query.trim();
                let query = query.strip_suffix(';').unwrap_or(query).trim_end();
                if query.is_empty() {
                    tracing::debug!("{}: blank query source skipped", head);
                    return Vec::new();
                }
                vec![format!("{}\n{}{}", head, query, terminator)]
            }
        }
    }
}

impl Renderer for TSqlRenderer {
    /// `DECLARE @name TABLE (...)`
    ///
    /// A single key column carries `PRIMARY KEY` inline; a composite key is
    /// a trailing table constraint. A declaration without columns is an error.
    fn render_table_variable(&self, section: &TableVariable) -> Result<String> {
        if section.columns.is_empty() {
            return Err(Error::EmptyTableVariable {
                section: section.name.to_string(),
            });
        }

        let indent = self.options.indentation();
        let key: Vec<&TableColumn> = section.primary_key().collect();
        let inline_key = key.len() == 1;

        let mut lines: Vec<String> = section
            .columns
            .iter()
            .map(|c| format!("{}{}", indent, self.column_definition(c, inline_key)))
            .collect();

        if key.len() > 1 {
            let names: Vec<String> = key.iter().map(|c| self.quote(c.name.as_str())).collect();
            lines.push(format!("{}PRIMARY KEY ({})", indent, names.join(", ")));
        }

        Ok(format!(
            "DECLARE {} TABLE (\n{}\n){}",
            section.name,
            lines.join(",\n"),
            self.options.terminator()
        ))
    }

    /// One `INSERT INTO` statement per source (more for batched row lists)
    ///
    /// An insert without sources renders as an empty fragment.
    fn render_insert_data(&self, section: &InsertData) -> Result<String> {
        let head = format!(
            "INSERT INTO {}{}",
            self.destination(&section.destination),
            self.column_list(&section.columns)
        );

        let statements: Vec<String> = section
            .sources
            .iter()
            .flat_map(|source| self.render_source(&head, source))
            .collect();

        Ok(statements.join("\n"))
    }
}
