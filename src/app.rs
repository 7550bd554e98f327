use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct BenchViewerApp {
    pub state: AppState,
}

impl BenchViewerApp {
    /// Start with `path` already loaded, if given.
    pub fn with_initial_file(path: Option<std::path::PathBuf>) -> Self {
        let mut app = Self::default();
        if let Some(path) = path {
            panels::open_path(&mut app.state, &path);
        }
        app
    }
}

impl eframe::App for BenchViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: region filters ----
        egui::SidePanel::left("region_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: filtered servers ----
        if self.state.show_table && self.state.dataset.is_some() {
            egui::TopBottomPanel::bottom("server_table")
                .resizable(true)
                .default_height(200.0)
                .show(ctx, |ui| {
                    table::server_table(ui, &self.state);
                });
        }

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::metric_charts(ui, &self.state);
        });
    }
}
