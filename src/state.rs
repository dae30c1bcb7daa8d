use std::sync::Arc;

use crate::color::ColorAssigner;
use crate::data::aggregate::{region_summary, time_summary, MonthTotal, RegionTotal};
use crate::data::filter::{filter, Dimension, Selection};
use crate::data::loader::DataUnavailable;
use crate::data::model::ObservationTable;
use crate::map::{build_layer, MapLayer};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state of one session, independent of rendering.
pub struct AppState {
    /// Loaded table (None if the load failed).
    pub dataset: Option<Arc<ObservationTable>>,

    /// Current region / plastic type selections.
    pub selection: Selection,

    /// Indices of observations passing the current selection (cached).
    pub visible_indices: Vec<usize>,
    pub visible_weight_kg: f64,

    pub region_summary: Vec<RegionTotal>,
    pub time_summary: Vec<MonthTotal>,
    pub map_layer: MapLayer,

    /// Colour memo for this session.
    pub colors: ColorAssigner,

    /// Set when the map should jump back to its configured view.
    pub reset_map_view: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(colors: ColorAssigner) -> Self {
        Self {
            dataset: None,
            selection: Selection::default(),
            visible_indices: Vec::new(),
            visible_weight_kg: 0.0,
            region_summary: Vec::new(),
            time_summary: Vec::new(),
            map_layer: MapLayer::default(),
            colors,
            reset_map_view: true,
            status_message: None,
        }
    }

    /// State for the outcome of the one startup load.
    pub fn from_load(
        loaded: Result<Arc<ObservationTable>, DataUnavailable>,
        colors: ColorAssigner,
    ) -> Self {
        let mut state = Self::new(colors);
        match loaded {
            Ok(table) => state.set_dataset(table),
            Err(e) => {
                log::error!("Failed to load data: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
        state
    }

    /// Ingest the loaded table with everything selected.
    pub fn set_dataset(&mut self, table: Arc<ObservationTable>) {
        self.selection = Selection::all(&table);
        self.dataset = Some(table);
        self.status_message = None;
        self.refilter();
    }

    /// Re-run filter → aggregators → map layer for the current selection.
    pub fn refilter(&mut self) {
        let Some(table) = self.dataset.clone() else {
            return;
        };
        let view = filter(&table, &self.selection);
        self.colors.assign(view.distinct_types());

        self.region_summary = region_summary(&view);
        self.time_summary = time_summary(&view);
        self.map_layer = build_layer(&view, &self.colors);
        self.visible_indices = view.indices().to_vec();
        self.visible_weight_kg = view.total_weight();

        if view.is_empty() {
            log::debug!("Selection matches none of {} observations", table.len());
        } else {
            log::debug!(
                "Selection matches {} of {} observations across {} regions and {} months",
                view.len(),
                table.len(),
                self.region_summary.len(),
                self.time_summary.len()
            );
        }
    }

    /// Tick or untick a single value.
    pub fn set_selected(&mut self, dim: Dimension, value: &str, selected: bool) {
        let set = self.selection.get_mut(dim);
        let changed = if selected {
            set.insert(value.to_string())
        } else {
            set.remove(value)
        };
        if changed {
            self.refilter();
        }
    }

    /// Select every observed value of a dimension.
    pub fn select_all(&mut self, dim: Dimension) {
        if let Some(table) = &self.dataset {
            *self.selection.get_mut(dim) = dim.options(table).clone();
            self.refilter();
        }
    }

    /// Deselect every value of a dimension.
    pub fn select_none(&mut self, dim: Dimension) {
        self.selection.get_mut(dim).clear();
        self.refilter();
    }
}
