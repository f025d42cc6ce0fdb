use std::path::{Path, PathBuf};

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::data::export::ConflictResolver;
use crate::error::{ExportError, FilterError, SessionError};
use crate::state::{Session, Status};

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_csv_dialog(session: &mut Session) {
    let file = FileDialog::new()
        .set_title("Load CSV")
        .add_filter("CSV files", &["csv"])
        .pick_file();

    match file {
        Some(path) => {
            let result = session.load_csv(&path);
            report(session, result);
        }
        None => session.status = Status::warning("No file selected."),
    }
}

pub fn output_folder_dialog(session: &mut Session) {
    let mut dialog = FileDialog::new().set_title("Select output folder");
    if !session.output.folder.as_os_str().is_empty() {
        dialog = dialog.set_directory(&session.output.folder);
    }
    if let Some(folder) = dialog.pick_folder() {
        session.status = session.set_output_folder(folder);
    }
}

// ---------------------------------------------------------------------------
// Fault reporting
// ---------------------------------------------------------------------------

/// Record the outcome on the session and pop up a message box on failure.
pub fn report(session: &mut Session, result: Result<Status, SessionError>) {
    if let Some(err) = session.record(result) {
        let level = match &err {
            SessionError::Filter(FilterError::NoDataset | FilterError::Selection(_))
            | SessionError::Export(ExportError::MissingTarget | ExportError::InvalidFilename(_)) => {
                MessageLevel::Warning
            }
            _ => MessageLevel::Error,
        };
        MessageDialog::new()
            .set_level(level)
            .set_title(err.title())
            .set_description(err.to_string())
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

// ---------------------------------------------------------------------------
// Overwrite prompts
// ---------------------------------------------------------------------------

/// Native Yes/No prompt, then a save dialog for a different file.
pub struct DialogResolver;

impl ConflictResolver for DialogResolver {
    fn confirm_overwrite(&mut self, path: &Path) -> bool {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("File Exists")
            .set_description(format!(
                "{} already exists. Do you want to overwrite it?",
                path.display()
            ))
            .set_buttons(MessageButtons::YesNo)
            .show();
        matches!(answer, MessageDialogResult::Yes)
    }

    fn alternate_path(&mut self, folder: &Path) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Save filtered data as")
            .set_directory(folder)
            .add_filter("CSV files", &["csv"])
            .save_file()
    }
}
