use eframe::egui;

/// Compile-time defaults for the desktop window. Nothing is persisted.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: &'static str,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
    pub side_panel_width: f32,
    /// Row height of the preview table.
    pub row_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "CSV Filter Tool",
            inner_size: [1100.0, 750.0],
            min_inner_size: [600.0, 400.0],
            side_panel_width: 340.0,
            row_height: 18.0,
        }
    }
}

impl AppConfig {
    pub fn native_options(&self) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(self.title)
                .with_inner_size(self.inner_size)
                .with_min_inner_size(self.min_inner_size),
            ..Default::default()
        }
    }
}
