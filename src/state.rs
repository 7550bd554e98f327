use std::collections::BTreeSet;

use crate::color::ColorMap;
use crate::data::filter::{entries_at, filtered_indices};
use crate::data::model::Dataset;
use crate::data::region::{RegionCatalog, RegionGroup};
use crate::data::selection::Selection;
use crate::data::series::{build_series, ChartSeries};

// ---------------------------------------------------------------------------
// Derived view
// ---------------------------------------------------------------------------

/// Everything computed from (dataset, selection).
#[derive(Debug, Clone, Default)]
pub struct ChartView {
    /// Dataset indices of servers passing the region filter.
    pub visible_indices: Vec<usize>,
    pub series: ChartSeries,
}

impl ChartView {
    fn compute(dataset: &Dataset, selection: &Selection) -> Self {
        let visible_indices = filtered_indices(dataset, selection);
        let series = build_series(&entries_at(dataset, &visible_indices));
        ChartView {
            visible_indices,
            series,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<Dataset>,

    /// Bumped whenever `dataset` is replaced.
    revision: u64,

    /// Regions offered by the current dataset.
    catalog: RegionCatalog,

    selection: Selection,

    /// Cached pipeline output and the inputs it was computed from.
    view: ChartView,
    view_key: Option<(u64, Selection)>,

    /// Colour per available region.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether the server table is shown under the charts.
    pub show_table: bool,
}

impl Default for AppState {
    fn default() -> Self {
        let mut state = Self {
            dataset: None,
            revision: 0,
            catalog: RegionCatalog::default(),
            selection: Selection::none(),
            view: ChartView::default(),
            view_key: None,
            color_map: ColorMap::default(),
            status_message: None,
            show_table: true,
        };
        state.refresh();
        state
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: rebuild the catalog, reset the
    /// selection to every geocode present, and recompute the charts.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.install(Some(dataset));
        self.status_message = None;
    }

    /// Drop the current dataset.
    pub fn close_dataset(&mut self) {
        self.install(None);
    }

    fn install(&mut self, dataset: Option<Dataset>) {
        self.revision += 1;
        let empty = Dataset::default();
        let ds = dataset.as_ref().unwrap_or(&empty);

        self.catalog = RegionCatalog::from_dataset(ds);
        self.selection = if ds.is_empty() {
            Selection::none()
        } else {
            Selection::initial(ds)
        };
        self.color_map = ColorMap::new(self.catalog.regions());
        self.dataset = dataset;
        self.refresh();
    }

    /// Recompute the view if the dataset or selection changed since the
    /// last pass.
    fn refresh(&mut self) {
        if self
            .view_key
            .as_ref()
            .is_some_and(|(rev, sel)| *rev == self.revision && *sel == self.selection)
        {
            return;
        }
        self.view = match &self.dataset {
            Some(ds) => ChartView::compute(ds, &self.selection),
            None => ChartView::default(),
        };
        log::debug!(
            "Recomputed view: {} of {} regions selected, {} servers visible",
            self.selection.len(),
            self.catalog.len(),
            self.view.visible_indices.len()
        );
        self.view_key = Some((self.revision, self.selection.clone()));
    }

    fn replace_selection(&mut self, selection: Selection) {
        self.selection = selection;
        self.refresh();
    }

    /// Include or exclude a single region.
    pub fn toggle_region(&mut self, region: &str, included: bool) {
        let next = self.selection.toggled(region, included);
        self.replace_selection(next);
    }

    /// Select every available region.
    pub fn select_all(&mut self) {
        let next = Selection::all(&self.catalog);
        self.replace_selection(next);
    }

    /// Deselect everything.
    pub fn clear_all(&mut self) {
        self.replace_selection(Selection::none());
    }

    /// Replace the selection with the regions a preset matches.
    pub fn apply_group(&mut self, group: &RegionGroup) {
        let next = Selection::from_group(group, &self.catalog);
        self.replace_selection(next);
    }

    pub fn available_regions(&self) -> &BTreeSet<String> {
        self.catalog.regions()
    }

    pub fn selected_regions(&self) -> &BTreeSet<String> {
        self.selection.regions()
    }

    pub fn is_selected(&self, region: &str) -> bool {
        self.selection.contains(region)
    }

    pub fn series(&self) -> &ChartSeries {
        &self.view.series
    }

    pub fn visible_indices(&self) -> &[usize] {
        &self.view.visible_indices
    }
}
