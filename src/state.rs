use std::path::{Path, PathBuf};

use crate::data::export::{self, ConflictResolver, ExportOutcome, OutputTarget};
use crate::data::filter::{self, FilteredDataset};
use crate::data::loader;
use crate::data::model::Dataset;
use crate::data::rules::SearchRuleList;
use crate::data::selection::ColumnSelection;
use crate::error::{FilterError, SessionError};

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub level: StatusLevel,
    pub text: String,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Status {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Status {
            level: StatusLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Status {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Everything one user session works on, independent of rendering.
///
/// Operations return `Result`; a failed operation leaves the dataset,
/// selection and rules exactly as they were.
pub struct Session {
    /// Loaded dataset (None until user loads a file).
    dataset: Option<Dataset>,

    /// Where the dataset came from.
    pub source_path: Option<PathBuf>,

    /// Columns to keep.
    pub selection: ColumnSelection,

    /// Keyword filters, applied in order.
    pub rules: SearchRuleList,

    /// Export folder and filename.
    pub output: OutputTarget,

    /// Result of the most recent successful filter run.
    last_result: Option<FilteredDataset>,

    /// Status message shown in the UI.
    pub status: Status,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            dataset: None,
            source_path: None,
            selection: ColumnSelection::default(),
            rules: SearchRuleList::with_initial_rule(),
            output: OutputTarget::default(),
            last_result: None,
            status: Status::info("No file loaded."),
        }
    }
}

impl Session {
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn last_result(&self) -> Option<&FilteredDataset> {
        self.last_result.as_ref()
    }

    /// Column names of the loaded dataset, empty if nothing is loaded.
    pub fn columns(&self) -> Vec<String> {
        self.dataset
            .as_ref()
            .map(Dataset::column_names)
            .unwrap_or_default()
    }

    /// Replace the dataset with the contents of `path`.
    ///
    /// Every column starts selected; rules keep their keywords and modes but
    /// lose their column choice.
    pub fn load_csv(&mut self, path: &Path) -> Result<Status, SessionError> {
        let dataset = loader::load_csv(path)?;
        let columns = dataset.column_names();
        log::info!(
            "Loaded {} rows with columns {:?} from {}",
            dataset.row_count(),
            columns,
            path.display()
        );

        self.selection.select_all(&columns);
        self.rules.refresh_for_new_dataset(&columns);
        self.dataset = Some(dataset);
        self.source_path = Some(path.to_path_buf());
        self.last_result = None;
        Ok(Status::info(format!("Loaded CSV file: {}", path.display())))
    }

    pub fn set_output_folder(&mut self, folder: PathBuf) -> Status {
        let status = Status::info(format!("Selected output folder: {}", folder.display()));
        self.output.folder = folder;
        status
    }

    /// Run the filter pipeline over the current dataset.
    pub fn filter(&self) -> Result<FilteredDataset, SessionError> {
        let dataset = self.dataset.as_ref().ok_or(FilterError::NoDataset)?;
        let selected = self
            .selection
            .resolve(&dataset.column_names())
            .map_err(FilterError::from)?;
        Ok(filter::apply(dataset, &selected, self.rules.rules())?)
    }

    /// Filter without exporting; the result is kept for display.
    pub fn preview(&mut self) -> Result<Status, SessionError> {
        let filtered = self.filter()?;
        let status = Status::info(format!(
            "{} of {} rows match",
            filtered.row_count(),
            filtered.source_rows()
        ));
        self.last_result = Some(filtered);
        Ok(status)
    }

    /// Filter, then write the result to the output target.
    pub fn apply_and_export(
        &mut self,
        resolver: &mut dyn ConflictResolver,
    ) -> Result<Status, SessionError> {
        self.output.resolve()?;
        let filtered = self.filter()?;
        let status = match export::export(&filtered, &self.output, resolver)? {
            ExportOutcome::Written(path) => {
                Status::info(format!("Filtered data saved to: {}", path.display()))
            }
            ExportOutcome::Cancelled => Status::warning("Export cancelled."),
        };
        self.last_result = Some(filtered);
        Ok(status)
    }

    /// Action boundary: turn the outcome of a user action into the status
    /// line. The fault is handed back so the caller can surface it.
    pub fn record(&mut self, result: Result<Status, SessionError>) -> Option<SessionError> {
        match result {
            Ok(status) => {
                self.status = status;
                None
            }
            Err(err) => {
                log::error!("{}: {err}", err.title());
                self.status = Status::error(format!("{}: {err}", err.title()));
                Some(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::rules::SearchMode;
    use crate::error::{ExportError, LoadError};
    use pretty_assertions::assert_eq;

    struct NeverOverwrite;

    impl ConflictResolver for NeverOverwrite {
        fn confirm_overwrite(&mut self, _path: &Path) -> bool {
            false
        }

        fn alternate_path(&mut self, _folder: &Path) -> Option<PathBuf> {
            None
        }
    }

    fn people_csv(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("people.csv");
        std::fs::write(&path, "Name,City,Age\nAlice,Paris,30\nBob,Lyon,25\nCarl,Paris,40\n")
            .unwrap();
        path
    }

    #[test]
    fn starts_with_one_empty_rule() {
        let session = Session::default();
        assert_eq!(session.rules.len(), 1);
        assert!(session.rules.rules()[0].is_noop());
        assert!(session.dataset().is_none());
    }

    #[test]
    fn load_selects_all_columns_and_clears_rule_columns() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::default();
        session.rules.set_rule_column(0, "Town").unwrap();
        session.rules.set_rule_keywords(0, "Paris").unwrap();

        let status = session.load_csv(&people_csv(&dir)).unwrap();
        assert!(status.text.starts_with("Loaded CSV file:"));
        assert_eq!(session.columns(), vec!["Name", "City", "Age"]);
        assert_eq!(session.selection.len(), 3);
        assert_eq!(session.rules.rules()[0].column, None);
        assert_eq!(session.rules.rules()[0].keywords, vec!["Paris"]);
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::default();
        session.load_csv(&people_csv(&dir)).unwrap();
        session.rules.set_rule_column(0, "City").unwrap();

        let result = session.load_csv(&dir.path().join("missing.csv"));
        let err = session.record(result).expect("load should fail");

        assert!(matches!(err, SessionError::Load(LoadError::Open { .. })));
        assert_eq!(session.status.level, StatusLevel::Error);
        assert_eq!(session.dataset().unwrap().row_count(), 3);
        assert_eq!(session.rules.rules()[0].column.as_deref(), Some("City"));
    }

    #[test]
    fn filter_without_dataset_is_an_input_error() {
        let session = Session::default();
        let err = session.filter().unwrap_err();
        assert_eq!(err.title(), "Input Error");
    }

    #[test]
    fn preview_reports_match_count() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::default();
        session.load_csv(&people_csv(&dir)).unwrap();
        session.selection.set("Age", false);
        session.rules.set_rule_column(0, "City").unwrap();
        session.rules.set_rule_keywords(0, "Paris").unwrap();
        session.rules.set_rule_mode(0, SearchMode::NotContains).unwrap();

        let status = session.preview().unwrap();
        assert_eq!(status.text, "1 of 3 rows match");
        let result = session.last_result().unwrap();
        assert_eq!(result.dataset().column_names(), vec!["Name", "City"]);
    }

    #[test]
    fn apply_and_export_writes_the_filtered_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::default();
        session.load_csv(&people_csv(&dir)).unwrap();
        session.selection.set("Age", false);
        session.rules.set_rule_column(0, "City").unwrap();
        session.rules.set_rule_keywords(0, "Paris").unwrap();
        let idx = session.rules.add_rule();
        session.rules.set_rule_column(idx, "Name").unwrap();
        session.rules.set_rule_keywords(idx, "Carl").unwrap();
        session.rules.set_rule_mode(idx, SearchMode::NotContains).unwrap();
        session.output = OutputTarget::new(dir.path(), "paris");

        let status = session.apply_and_export(&mut NeverOverwrite).unwrap();
        assert_eq!(status.level, StatusLevel::Info);

        let written = std::fs::read_to_string(dir.path().join("paris.csv")).unwrap();
        assert_eq!(written, "Name,City\nAlice,Paris\n");
    }

    #[test]
    fn declined_overwrite_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::default();
        let source = people_csv(&dir);
        session.load_csv(&source).unwrap();
        session.output = OutputTarget::new(dir.path(), "people");

        let result = session.apply_and_export(&mut NeverOverwrite);
        assert!(session.record(result).is_none());
        assert_eq!(session.status, Status::warning("Export cancelled."));
        assert!(std::fs::read_to_string(&source).unwrap().starts_with("Name,City,Age\nAlice"));
    }

    #[test]
    fn missing_target_is_reported_before_filtering() {
        let mut session = Session::default();
        let err = session.apply_and_export(&mut NeverOverwrite).unwrap_err();
        assert!(matches!(err, SessionError::Export(ExportError::MissingTarget)));
    }
}
