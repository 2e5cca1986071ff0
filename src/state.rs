use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::bindings::{ColumnFilter, GRID_COLUMNS};
use crate::config::DashboardConfig;
use crate::data::loader::load_file;
use crate::data::model::Dataset;
use crate::session::{DashboardSession, MassBounds};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Active session (None until a dataset is loaded).
    pub session: Option<DashboardSession>,

    /// Raw text of the per-column grid filters, parallel to `GRID_COLUMNS`.
    pub grid_filter_text: Vec<String>,

    /// Grid sort: (column index, descending).
    pub grid_sort: Option<(usize, bool)>,

    /// Slider bound overrides from configuration.
    pub mass_slider_min: Option<f64>,
    pub mass_slider_max: Option<f64>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: None,
            grid_filter_text: vec![String::new(); GRID_COLUMNS.len()],
            grid_sort: None,
            mass_slider_min: None,
            mass_slider_max: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// State for a configuration; loads the configured dataset, if any.
    /// A configured dataset that fails to load is a startup error.
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        let mut state = AppState {
            mass_slider_min: config.mass_slider_min,
            mass_slider_max: config.mass_slider_max,
            ..Default::default()
        };
        if let Some(path) = &config.dataset_path {
            state.set_dataset(load_file(path)?);
        }
        Ok(state)
    }

    /// Ingest a newly loaded dataset and start a fresh session on it.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let bounds =
            MassBounds::for_dataset(&dataset, self.mass_slider_min, self.mass_slider_max);
        self.session = Some(DashboardSession::with_bounds(Arc::new(dataset), bounds));
        self.grid_filter_text = vec![String::new(); GRID_COLUMNS.len()];
        self.grid_sort = None;
        self.status_message = None;
    }

    /// Load a file chosen in the UI. On failure the current dataset stays.
    pub fn open_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Clicking a column header sorts ascending, then descending, then off.
    pub fn cycle_grid_sort(&mut self, column: usize) {
        self.grid_sort = match self.grid_sort {
            Some((c, false)) if c == column => Some((column, true)),
            Some((c, true)) if c == column => None,
            _ => Some((column, false)),
        };
    }

    /// Parse the grid filter boxes. Unparseable filters are inactive and
    /// their message is returned alongside.
    pub fn grid_filters(&self) -> (Vec<ColumnFilter>, Vec<Option<String>>) {
        self.grid_filter_text
            .iter()
            .map(|text| match ColumnFilter::parse(text) {
                Ok(filter) => (filter, None),
                Err(e) => (ColumnFilter::Any, Some(e.to_string())),
            })
            .unzip()
    }

    /// A grid filter box was edited. Text that does not parse is logged and
    /// its message returned; the filter stays inactive until fixed.
    pub fn grid_filter_edited(&self, column: usize) -> Option<String> {
        let text = self.grid_filter_text.get(column)?;
        match ColumnFilter::parse(text) {
            Ok(_) => None,
            Err(e) => {
                let name = GRID_COLUMNS.get(column).map_or("?", |c| c.name());
                log::warn!("Ignoring grid filter on {name}: {e}");
                Some(e.to_string())
            }
        }
    }
}
