use crate::error::{FilterError, SelectionError};

use super::model::{CellValue, Dataset};
use super::rules::{SearchMode, SearchRule};

// ---------------------------------------------------------------------------
// FilteredDataset
// ---------------------------------------------------------------------------

/// Result of one filter run. Read-only; recomputed on every run.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredDataset {
    dataset: Dataset,
    source_rows: usize,
}

impl FilteredDataset {
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Row count of the dataset the filter started from.
    pub fn source_rows(&self) -> usize {
        self.source_rows
    }

    pub fn row_count(&self) -> usize {
        self.dataset.row_count()
    }
}

// ---------------------------------------------------------------------------
// Filter pipeline
// ---------------------------------------------------------------------------

/// Project `dataset` onto `selected_columns`, then narrow the rows with each
/// rule in order. Every step intersects with the previous one.
///
/// Within a rule every keyword must hold:
/// * `Contains`    → the cell contains each keyword (null cells never match)
/// * `NotContains` → the cell contains none of the keywords (null cells pass)
///
/// A rule whose column holds any non-text, non-null cell aborts the whole run,
/// whether or not earlier rules already dropped that row. Columns that are
/// entirely null never fault.
pub fn apply(
    dataset: &Dataset,
    selected_columns: &[String],
    rules: &[SearchRule],
) -> Result<FilteredDataset, FilterError> {
    if selected_columns.is_empty() {
        return Err(SelectionError::Empty.into());
    }
    if let Some(unknown) = selected_columns.iter().find(|c| !dataset.has_column(c)) {
        return Err(SelectionError::UnknownColumn(unknown.clone()).into());
    }

    let projected = dataset.project(selected_columns);
    let mut rows: Vec<usize> = (0..projected.row_count()).collect();

    for (idx, rule) in rules.iter().enumerate() {
        let Some(column_name) = rule.column.as_deref().filter(|_| !rule.is_noop()) else {
            log::debug!("search {} is empty, skipping", idx + 1);
            continue;
        };
        let column = projected
            .column(column_name)
            .ok_or_else(|| FilterError::ColumnNotFound {
                column: column_name.to_string(),
            })?;

        if let Some((row, cell)) = column
            .values
            .iter()
            .enumerate()
            .find(|(_, cell)| !matches!(cell, CellValue::Text(_) | CellValue::Null))
        {
            return Err(FilterError::NonTextCell {
                column: column_name.to_string(),
                row,
                found: cell.kind(),
            });
        }

        let before = rows.len();
        for keyword in &rule.keywords {
            rows.retain(|&row| {
                let hit = contains(&column.values[row], keyword);
                match rule.mode {
                    SearchMode::Contains => hit,
                    SearchMode::NotContains => !hit,
                }
            });
        }
        log::debug!(
            "search {} ({column_name} {} {:?}): {before} -> {} rows",
            idx + 1,
            rule.mode,
            rule.keywords,
            rows.len()
        );
    }

    Ok(FilteredDataset {
        dataset: projected.take_rows(&rows),
        source_rows: dataset.row_count(),
    })
}

/// Case-sensitive substring test. Null never matches.
fn contains(cell: &CellValue, keyword: &str) -> bool {
    match cell {
        CellValue::Text(s) => s.contains(keyword),
        _ => false,
    }
}
