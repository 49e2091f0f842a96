//! Section lifecycle state
//!
//! Shared by every section builder: the column map (unique by name) and the
//! one-way Open → Finalized transition.

use indexmap::IndexMap;
use sqlscript_core::schema::{Column, TableColumn};
use sqlscript_core::{ColumnName, Error, Result};

/// Anything that can live in a section's column map
pub(crate) trait SectionColumn {
    fn column_name(&self) -> &ColumnName;
}

impl SectionColumn for Column {
    fn column_name(&self) -> &ColumnName {
        &self.name
    }
}

impl SectionColumn for TableColumn {
    fn column_name(&self) -> &ColumnName {
        &self.name
    }
}

/// Column map plus the finalized flag
///
/// Columns keep their insertion order, which is the order they render in.
#[derive(Debug, Clone)]
pub(crate) struct SectionState<C> {
    label: String,
    columns: IndexMap<ColumnName, C>,
    finalized: bool,
}

impl<C: SectionColumn> SectionState<C> {
    /// `label` names the section in error messages.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            columns: IndexMap::new(),
            finalized: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Fails with [`Error::SectionFinalized`] once finalized.
    pub fn ensure_open(&self) -> Result<()> {
        if self.finalized {
            return Err(Error::SectionFinalized {
                section: self.label.clone(),
            });
        }
        Ok(())
    }

    /// Adds a column
    ///
    /// Fails when finalized, or when a column with the same name exists.
    pub fn insert(&mut self, column: C) -> Result<()> {
        self.ensure_open()?;

        let name = column.column_name();
        if self.columns.contains_key(name) {
            return Err(Error::DuplicateColumn {
                section: self.label.clone(),
                column: name.to_string(),
            });
        }

        tracing::trace!("section {}: column {} added", self.label, name);
        self.columns.insert(name.clone(), column);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn columns(&self) -> impl Iterator<Item = &C> {
        self.columns.values()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Open → Finalized. A second call is an error, not a no-op.
    pub fn finalize(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.finalized = true;
        Ok(())
    }

    /// Columns in insertion order
    pub fn into_columns(self) -> Vec<C> {
        self.columns.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlscript_core::schema::ColumnType;

    fn column(name: &str) -> TableColumn {
        TableColumn::new(name, ColumnType::Int, false, false).unwrap()
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut state = SectionState::new("@t");
        state.insert(column("c1")).unwrap();

        match state.insert(column("c1")) {
            Err(Error::DuplicateColumn { section, column }) => {
                assert_eq!(section, "@t");
                assert_eq!(column, "c1");
            }
            other => panic!("expected DuplicateColumn, got {:?}", other),
        }
        assert_eq!(state.columns().count(), 1);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut state = SectionState::new("@t");
        state.insert(column("Name")).unwrap();
        state.insert(column("name")).unwrap();
        assert_eq!(state.columns().count(), 2);
        assert!(state.contains("Name"));
        assert!(!state.contains("NAME"));
    }

    #[test]
    fn test_independent_sections_allow_same_name() {
        let mut first = SectionState::new("@a");
        let mut second = SectionState::new("@b");
        first.insert(column("c1")).unwrap();
        second.insert(column("c1")).unwrap();
    }

    #[test]
    fn test_insert_after_finalize_fails() {
        let mut state = SectionState::new("@t");
        state.insert(column("c1")).unwrap();
        state.finalize().unwrap();

        assert!(state.is_finalized());
        assert!(matches!(
            state.insert(column("c2")),
            Err(Error::SectionFinalized { .. })
        ));
    }

    #[test]
    fn test_finalize_twice_fails() {
        let mut state: SectionState<Column> = SectionState::new("People");
        state.finalize().unwrap();
        assert!(matches!(
            state.finalize(),
            Err(Error::SectionFinalized { .. })
        ));
    }

    #[test]
    fn test_columns_keep_insertion_order() {
        let mut state = SectionState::new("@t");
        for name in ["z", "a", "m"] {
            state.insert(column(name)).unwrap();
        }
        let names: Vec<String> = state
            .into_columns()
            .into_iter()
            .map(|c| c.name.to_string())
            .collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }
}
