use eframe::egui;

use crate::config::AppConfig;
use crate::state::Session;
use crate::ui::{panels, preview};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SanitiserApp {
    pub session: Session,
    config: AppConfig,
}

impl SanitiserApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            session: Session::default(),
            config,
        }
    }
}

impl eframe::App for SanitiserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.session);
        });

        // ---- Bottom panel: status line ----
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            panels::status_bar(ui, &self.session);
        });

        // ---- Left side panel: columns, searches, output ----
        egui::SidePanel::left("control_panel")
            .default_width(self.config.side_panel_width)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.session);
            });

        // ---- Central panel: data table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            preview::data_table(ui, &self.session, self.config.row_height);
        });
    }
}
