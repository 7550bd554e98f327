use eframe::egui::{self, Color32, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::data::series::{MetricKind, Series};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Metric bar charts (central panel)
// ---------------------------------------------------------------------------

/// Render the four metric charts as a 2×2 grid.
pub fn metric_charts(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a benchmark file to compare servers  (File → Open…)");
        });
        return;
    }

    let spacing = ui.spacing().item_spacing.y;
    let chart_height = ((ui.available_height() - 2.0 * spacing) / 2.0).max(120.0);

    for row in MetricKind::ALL.chunks(2) {
        ui.columns(row.len(), |cols: &mut [Ui]| {
            for (col, &kind) in cols.iter_mut().zip(row) {
                metric_chart(col, state, kind, chart_height);
            }
        });
    }
}

fn metric_chart(ui: &mut Ui, state: &AppState, kind: MetricKind, height: f32) {
    let series = state.series().get(kind);
    ui.strong(format!("{} ({})", kind.title(), kind.unit()));

    if series.is_empty() {
        ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.weak("No data");
            });
        });
        return;
    }

    let chart = BarChart::new(bars(state, series))
        .name(kind.title())
        .color(Color32::LIGHT_BLUE);
    let labels = series.labels.clone();

    Plot::new(("metric_chart", kind.key()))
        .height(height)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .y_axis_label(kind.unit())
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

/// One bar per server at x = position in the series, coloured by region.
fn bars(state: &AppState, series: &Series) -> Vec<Bar> {
    series
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let region = state
                .dataset
                .as_ref()
                .and_then(|ds| ds.get(label))
                .map(|r| r.geocode.as_str())
                .unwrap_or_default();
            Bar::new(i as f64, value)
                .name(format!("{label} [{region}]"))
                .fill(state.color_map.color_for(region))
                .width(0.7)
        })
        .collect()
}
