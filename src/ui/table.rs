use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Server table (bottom panel)
// ---------------------------------------------------------------------------

const HEADERS: [&str; 6] = ["Server", "Region", "Score", "Latency (ms)", "Success (%)", "QPS"];

/// Tabulate the servers that pass the region filter, in dataset order.
pub fn server_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let rows = state.visible_indices();
    if rows.is_empty() {
        ui.label("No servers match the selected regions.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(160.0))
        .column(Column::auto().at_least(70.0))
        .columns(Column::auto().at_least(80.0), 4)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let Some(entry) = dataset.entry(rows[row.index()]) else {
                    return;
                };
                let r = &entry.record;
                row.col(|ui: &mut Ui| {
                    ui.label(&entry.id);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(RichText::new(&r.geocode).color(state.color_map.color_for(&r.geocode)));
                });
                for value in [
                    r.score.total,
                    r.latency_stats.mean_ms,
                    r.score.success_rate,
                    r.queries_per_second,
                ] {
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{value:.1}"));
                    });
                }
            });
        });
}
