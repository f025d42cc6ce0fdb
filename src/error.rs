use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Dataset shape
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),
    #[error("column '{column}' has {found} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        found: usize,
    },
}

// ---------------------------------------------------------------------------
// Per-stage errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{} has no header row", .path.display())]
    MissingHeader { path: PathBuf },
    #[error(transparent)]
    Shape(#[from] DatasetError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no columns selected")]
    Empty,
    #[error("column '{0}' does not exist in the dataset")]
    UnknownColumn(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("search {index} does not exist ({len} defined)")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("no dataset loaded")]
    NoDataset,
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("column '{column}' does not exist in the filtered data")]
    ColumnNotFound { column: String },
    #[error("column '{column}' row {row}: cannot search a {found} value for text")]
    NonTextCell {
        column: String,
        row: usize,
        found: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("select an output folder and enter a filename")]
    MissingTarget,
    #[error("filename '{0}' must not contain a path")]
    InvalidFilename(String),
    #[error("permission denied writing {}", .path.display())]
    PermissionDenied { path: PathBuf },
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot serialise CSV: {0}")]
    Serialize(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Action boundary
// ---------------------------------------------------------------------------

/// Any fault raised by a user-triggered action.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl SessionError {
    /// Heading shown to the user, keyed by fault kind.
    pub fn title(&self) -> &'static str {
        match self {
            SessionError::Load(_) => "Load Error",
            SessionError::Filter(FilterError::NoDataset | FilterError::Selection(_)) => {
                "Input Error"
            }
            SessionError::Filter(FilterError::ColumnNotFound { .. }) => "Column Error",
            SessionError::Filter(FilterError::NonTextCell { .. }) => "Filter Error",
            SessionError::Export(ExportError::MissingTarget | ExportError::InvalidFilename(_)) => {
                "Input Error"
            }
            SessionError::Export(ExportError::PermissionDenied { .. }) => "Permission Error",
            SessionError::Export(_) => "Export Error",
        }
    }
}
