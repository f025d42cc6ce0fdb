use std::collections::BTreeSet;

use crate::error::SelectionError;

/// The set of columns the user wants to keep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSelection {
    selected: BTreeSet<String>,
}

impl ColumnSelection {
    pub fn select_all(&mut self, columns: &[String]) {
        self.selected = columns.iter().cloned().collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn set(&mut self, column: &str, selected: bool) {
        if selected {
            self.selected.insert(column.to_string());
        } else {
            self.selected.remove(column);
        }
    }

    pub fn is_selected(&self, column: &str) -> bool {
        self.selected.contains(column)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Resolve the selection against the dataset's columns.
    ///
    /// The result follows `columns` order, not the order names were picked.
    pub fn resolve(&self, columns: &[String]) -> Result<Vec<String>, SelectionError> {
        if self.is_empty() {
            return Err(SelectionError::Empty);
        }
        if let Some(unknown) = self.selected.iter().find(|name| !columns.contains(name)) {
            return Err(SelectionError::UnknownColumn(unknown.clone()));
        }
        Ok(columns
            .iter()
            .filter(|c| self.selected.contains(*c))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn columns() -> Vec<String> {
        ["Name", "City", "Age"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_in_dataset_order() {
        let mut sel = ColumnSelection::default();
        sel.set("Age", true);
        sel.set("Name", true);
        assert_eq!(sel.resolve(&columns()), Ok(vec!["Name".to_string(), "Age".to_string()]));
    }

    #[test]
    fn empty_selection_is_an_error() {
        let mut sel = ColumnSelection::default();
        sel.select_all(&columns());
        sel.clear();
        assert_eq!(sel.resolve(&columns()), Err(SelectionError::Empty));
    }

    #[test]
    fn unknown_column_is_an_error() {
        let mut sel = ColumnSelection::default();
        sel.set("Name", true);
        sel.set("Country", true);
        assert_eq!(
            sel.resolve(&columns()),
            Err(SelectionError::UnknownColumn("Country".into()))
        );
    }

    #[test]
    fn deselecting_removes_a_column() {
        let mut sel = ColumnSelection::default();
        sel.select_all(&columns());
        sel.set("City", false);
        assert!(!sel.is_selected("City"));
        assert_eq!(sel.len(), 2);
    }
}
