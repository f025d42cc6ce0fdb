use std::io;
use std::path::{Path, PathBuf};

use crate::error::ExportError;

use super::filter::FilteredDataset;
use super::model::Dataset;

pub const OUTPUT_EXTENSION: &str = "csv";

// ---------------------------------------------------------------------------
// Output target
// ---------------------------------------------------------------------------

/// Folder + bare filename chosen by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTarget {
    pub folder: PathBuf,
    pub filename: String,
}

impl OutputTarget {
    pub fn new(folder: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        OutputTarget {
            folder: folder.into(),
            filename: filename.into(),
        }
    }

    /// `folder/filename.csv`, or `MissingTarget` if either part is blank.
    ///
    /// The filename must be a bare name: separators and `..` would let it
    /// escape the folder.
    pub fn resolve(&self) -> Result<PathBuf, ExportError> {
        let filename = self.filename.trim();
        if self.folder.to_string_lossy().trim().is_empty() || filename.is_empty() {
            return Err(ExportError::MissingTarget);
        }
        if filename.contains(['/', '\\']) || filename == ".." || filename == "." {
            return Err(ExportError::InvalidFilename(filename.to_string()));
        }
        Ok(self.folder.join(format!("{filename}.{OUTPUT_EXTENSION}")))
    }
}

// ---------------------------------------------------------------------------
// Conflict handling
// ---------------------------------------------------------------------------

/// Asks the user what to do when the output file already exists.
pub trait ConflictResolver {
    /// `true` to overwrite `path`.
    fn confirm_overwrite(&mut self, path: &Path) -> bool;

    /// An explicit replacement path, or `None` to cancel the export.
    ///
    /// A path that already carries an extension counts as confirmed by the
    /// picker; a bare one gets `.csv` and is asked about again if it exists.
    fn alternate_path(&mut self, folder: &Path) -> Option<PathBuf>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written(PathBuf),
    /// The user declined to overwrite and gave no other path.
    Cancelled,
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Write `filtered` to the resolved target, consulting `resolver` if a file is
/// already there.
pub fn export(
    filtered: &FilteredDataset,
    target: &OutputTarget,
    resolver: &mut dyn ConflictResolver,
) -> Result<ExportOutcome, ExportError> {
    let mut path = target.resolve()?;
    let mut confirmed = false;

    while !confirmed && path.exists() {
        if resolver.confirm_overwrite(&path) {
            log::info!("overwriting {}", path.display());
            break;
        }
        log::info!("not overwriting {}", path.display());
        match resolver.alternate_path(&target.folder) {
            Some(alternate) => {
                confirmed = alternate.extension().is_some();
                path = with_default_extension(alternate);
            }
            None => return Ok(ExportOutcome::Cancelled),
        }
    }

    write_csv(filtered.dataset(), &path)?;
    log::info!(
        "wrote {} rows x {} columns to {}",
        filtered.row_count(),
        filtered.dataset().column_count(),
        path.display()
    );
    Ok(ExportOutcome::Written(path))
}

/// Serialise fully in memory, then write the file in one go.
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<(), ExportError> {
    let bytes = to_csv_bytes(dataset)?;
    std::fs::write(path, bytes).map_err(|source| match source.kind() {
        io::ErrorKind::PermissionDenied => ExportError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => ExportError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

fn to_csv_bytes(dataset: &Dataset) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(dataset.columns().iter().map(|c| c.name.as_str()))?;
    for row in 0..dataset.row_count() {
        writer.write_record(dataset.row(row).map(|cell| cell.as_field().into_owned()))?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Serialize(csv::Error::from(e.into_error())))
}

fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(OUTPUT_EXTENSION)
    }
}
