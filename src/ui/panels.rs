use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::region::REGION_GROUPS;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – region filter widgets
// ---------------------------------------------------------------------------

/// Render the left region filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Regions");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // Clone what we need so we can mutate state inside the loop.
    let regions: Vec<String> = state.available_regions().iter().cloned().collect();
    if regions.is_empty() {
        ui.label("No servers with a region and a positive score.");
        return;
    }

    ui.strong("Presets");
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for group in REGION_GROUPS {
            if ui.button(group.display_name).clicked() {
                state.apply_group(group);
            }
        }
    });
    ui.separator();

    let n_selected = regions.iter().filter(|r| state.is_selected(r)).count();
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(format!("{n_selected}/{} selected", regions.len()));
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.clear_all();
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for region in &regions {
                let mut checked = state.is_selected(region);
                let text = RichText::new(region).color(state.color_map.color_for(region));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_region(region, checked);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let has_data = state.dataset.is_some();
            if ui
                .add_enabled(has_data, egui::Button::new("Export series…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
            if ui.add_enabled(has_data, egui::Button::new("Close")).clicked() {
                state.close_dataset();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} servers loaded, {} shown",
                ds.len(),
                state.visible_indices().len()
            ));
            if state.series().is_empty() {
                ui.weak("No data for the selected regions");
            }
        }

        ui.separator();

        if ui.selectable_label(state.show_table, "Server table").clicked() {
            state.show_table = !state.show_table;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open benchmark results")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        open_path(state, &path);
    }
}

/// Load `path` into `state`, keeping the current dataset on failure.
pub fn open_path(state: &mut AppState, path: &Path) {
    match crate::data::loader::load_file(path) {
        Ok(dataset) => {
            log::info!("Loaded {} servers from {}", dataset.len(), path.display());
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart series")
        .add_filter("JSON", &["json"])
        .set_file_name("series.json")
        .save_file();

    if let Some(path) = file {
        match crate::data::export::write_series(&path, state.series()) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export series: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
