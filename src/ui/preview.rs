use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::state::Session;

// ---------------------------------------------------------------------------
// Data table (central panel)
// ---------------------------------------------------------------------------

/// Render the last filter result, or the loaded dataset if nothing has been
/// filtered yet.
pub fn data_table(ui: &mut Ui, session: &Session, row_height: f32) {
    let (title, dataset) = match (session.last_result(), session.dataset()) {
        (Some(result), _) => (
            format!(
                "Filtered: {} of {} rows",
                result.row_count(),
                result.source_rows()
            ),
            result.dataset(),
        ),
        (None, Some(ds)) => (format!("Loaded: {} rows", ds.row_count()), ds),
        (None, None) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Load a CSV file to begin  (File → Load CSV…)");
            });
            return;
        }
    };

    ui.strong(title);
    ui.separator();

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(TableColumn::auto().at_least(60.0), dataset.column_count())
            .header(row_height + 4.0, |mut header| {
                for col in dataset.columns() {
                    header.col(|ui: &mut Ui| {
                        ui.strong(&col.name);
                    });
                }
            })
            .body(|body| {
                body.rows(row_height, dataset.row_count(), |mut row| {
                    let idx = row.index();
                    for cell in dataset.row(idx) {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell.to_string());
                        });
                    }
                });
            });
    });
}
