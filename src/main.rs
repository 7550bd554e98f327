mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::BenchViewerApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional positional argument: file to open on start.
    let initial_file = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "DNS Bench Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(BenchViewerApp::with_initial_file(initial_file)))),
    )
}
