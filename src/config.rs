use eframe::egui;

// ---------------------------------------------------------------------------
// Application configuration (compile-time defaults)
// ---------------------------------------------------------------------------

/// Window and layout settings. Log verbosity comes from `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Default width of the navigation side panel.
    pub nav_panel_width: f32,
    /// Filter controls per row on the dashboard.
    pub filter_grid_columns: usize,
    /// Maximum height of the raw-data grid before it scrolls.
    pub grid_height: f32,
    pub grid_row_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_size: [1200.0, 800.0],
            min_window_size: [600.0, 400.0],
            nav_panel_width: 240.0,
            filter_grid_columns: 3,
            grid_height: 400.0,
            grid_row_height: 18.0,
        }
    }
}

impl AppConfig {
    pub fn native_options(&self) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(self.window_size)
                .with_min_inner_size(self.min_window_size)
                .with_drag_and_drop(true),
            ..Default::default()
        }
    }
}
