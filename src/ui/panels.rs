use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::rules::SearchMode;
use crate::error::RuleError;
use crate::state::{Session, StatusLevel};
use crate::ui::dialogs::{self, DialogResolver};

// ---------------------------------------------------------------------------
// Left side panel – columns, searches, output
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, session: &mut Session) {
    let columns = session.columns();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Column selection ----
            ui.heading("Columns");
            ui.separator();
            if columns.is_empty() {
                ui.label("No dataset loaded.");
            } else {
                ui.horizontal(|ui: &mut Ui| {
                    if ui.small_button("All").clicked() {
                        session.selection.select_all(&columns);
                    }
                    if ui.small_button("None").clicked() {
                        session.selection.clear();
                    }
                    ui.label(format!("{}/{} selected", session.selection.len(), columns.len()));
                });
                for col in &columns {
                    let mut checked = session.selection.is_selected(col);
                    if ui.checkbox(&mut checked, col).changed() {
                        session.selection.set(col, checked);
                    }
                }
            }
            ui.add_space(8.0);

            // ---- Search rules ----
            ui.heading("Searches");
            ui.separator();
            search_rows(ui, session, &columns);
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Add Search").clicked() {
                    session.rules.add_rule();
                }
                if ui.button("Remove Last Search").clicked() {
                    session.rules.remove_last_rule();
                }
            });
            ui.add_space(8.0);

            // ---- Output target ----
            ui.heading("Output");
            ui.separator();
            egui::Grid::new("output_grid")
                .num_columns(2)
                .show(ui, |ui: &mut Ui| {
                    ui.label("Output Folder:");
                    ui.horizontal(|ui: &mut Ui| {
                        let mut folder = session.output.folder.display().to_string();
                        if ui.text_edit_singleline(&mut folder).changed() {
                            session.output.folder = PathBuf::from(folder);
                        }
                        if ui.button("Browse").clicked() {
                            dialogs::output_folder_dialog(session);
                        }
                    });
                    ui.end_row();

                    ui.label("Output Filename:");
                    ui.text_edit_singleline(&mut session.output.filename);
                    ui.end_row();
                });
            ui.add_space(8.0);

            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Preview").clicked() {
                    let result = session.preview();
                    dialogs::report(session, result);
                }
                if ui.button(RichText::new("Apply Filter").strong()).clicked() {
                    let result = session.apply_and_export(&mut DialogResolver);
                    dialogs::report(session, result);
                }
            });
        });
}

/// One row per search rule: column, keywords, mode.
fn search_rows(ui: &mut Ui, session: &mut Session, columns: &[String]) {
    if session.rules.is_empty() {
        ui.weak("No searches: every row is kept.");
    }
    for idx in 0..session.rules.len() {
        let rule = session.rules.rules()[idx].clone();

        ui.horizontal(|ui: &mut Ui| {
            ui.label(format!("Search {}:", idx + 1));

            egui::ComboBox::from_id_salt(("search_column", idx))
                .selected_text(rule.column.as_deref().unwrap_or(""))
                .width(110.0)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in columns {
                        let current = rule.column.as_deref() == Some(col.as_str());
                        if ui.selectable_label(current, col).clicked() {
                            log_rule_edit(session.rules.set_rule_column(idx, col));
                        }
                    }
                });

            let mut keywords = rule.keyword_text.clone();
            let edit = egui::TextEdit::singleline(&mut keywords)
                .hint_text("keyword, keyword")
                .desired_width(120.0);
            if ui.add(edit).changed() {
                log_rule_edit(session.rules.set_rule_keywords(idx, &keywords));
            }

            egui::ComboBox::from_id_salt(("search_mode", idx))
                .selected_text(rule.mode.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for mode in SearchMode::ALL {
                        if ui.selectable_label(rule.mode == mode, mode.label()).clicked() {
                            log_rule_edit(session.rules.set_rule_mode(idx, mode));
                        }
                    }
                });
        });
    }
}

fn log_rule_edit(result: Result<(), RuleError>) {
    if let Err(e) = result {
        log::warn!("ignoring search edit: {e}");
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, session: &mut Session) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Load CSV…").clicked() {
                dialogs::open_csv_dialog(session);
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        if let Some(ds) = session.dataset() {
            let source = session
                .source_path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{source}: {} rows, {} columns",
                ds.row_count(),
                ds.column_count()
            ));
        }
    });
}

// ---------------------------------------------------------------------------
// Status bar
// ---------------------------------------------------------------------------

pub fn status_bar(ui: &mut Ui, session: &Session) {
    let status = &session.status;
    let text = RichText::new(&status.text);
    let text = match status.level {
        StatusLevel::Info => text,
        StatusLevel::Warning => text.color(Color32::from_rgb(230, 160, 30)),
        StatusLevel::Error => text.color(Color32::RED),
    };
    ui.label(text);
}
