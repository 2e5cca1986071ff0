use std::collections::BTreeSet;
use std::sync::Arc;

use crate::bindings::{self, ChartSpec, GridData};
use crate::color::ColorMap;
use crate::data::filter::{FilterStamp, FilterState, FilteredView};
use crate::data::model::{Column, Dataset};
use crate::reactive::{CacheStatus, Memo};

// ---------------------------------------------------------------------------
// Slider bounds
// ---------------------------------------------------------------------------

/// Step the default slider bounds are rounded to, in grams.
const MASS_STEP: f64 = 100.0;

/// The slider range never shrinks below this, in grams.
const DEFAULT_MASS_RANGE: (f64, f64) = (2000.0, 6000.0);

/// Range of the body-mass slider. Threshold writes are clamped into it.
/// Always ordered with both ends finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassBounds {
    min: f64,
    max: f64,
}

impl MassBounds {
    /// Bounds between two values given in either order. A non-finite end
    /// collapses onto the other one.
    pub fn new(a: f64, b: f64) -> Self {
        let (a, b) = match (a.is_finite(), b.is_finite()) {
            (true, true) => (a, b),
            (true, false) => (a, a),
            (false, true) => (b, b),
            (false, false) => (0.0, 0.0),
        };
        MassBounds {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Default range for a dataset: at least 2000–6000 g, widened to the
    /// observed masses. The upper end always lies strictly above the heaviest
    /// penguin so that every row can pass the `<` threshold. Configured
    /// overrides replace either end as given.
    pub fn for_dataset(dataset: &Dataset, min: Option<f64>, max: Option<f64>) -> Self {
        let (default_lo, default_hi) = DEFAULT_MASS_RANGE;
        let (lo, hi) = match dataset.body_mass_range {
            Some((lo, hi)) => (
                ((lo / MASS_STEP).floor() * MASS_STEP).min(default_lo),
                ((hi / MASS_STEP).floor() * MASS_STEP + MASS_STEP).max(default_hi),
            ),
            None => DEFAULT_MASS_RANGE,
        };
        MassBounds::new(min.unwrap_or(lo), max.unwrap_or(hi))
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// DashboardSession
// ---------------------------------------------------------------------------

/// Cache status of every derived value, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheReport {
    pub filtered_view: CacheStatus,
    pub row_count: CacheStatus,
    pub bill_length: CacheStatus,
    pub bill_depth: CacheStatus,
    pub grid: CacheStatus,
}

/// How many times each derived value has been computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecomputeCounts {
    pub filtered_view: u64,
    pub row_count: u64,
    pub bill_length: u64,
    pub bill_depth: u64,
    pub grid: u64,
    pub chart: u64,
}

/// One user's view of the dashboard: filter inputs plus lazily cached
/// derived values. The dataset is shared read-only between sessions.
///
/// The filtered view is cached per [`FilterStamp`]; each display binding is
/// cached per filtered-view version, so all bindings read in one cycle are
/// projections of the same snapshot.
#[derive(Debug)]
pub struct DashboardSession {
    dataset: Arc<Dataset>,
    colors: ColorMap,
    bounds: MassBounds,
    initial_threshold: f64,
    filters: FilterState,
    view: Memo<FilterStamp, FilteredView>,
    count: Memo<u64, usize>,
    bill_length: Memo<u64, String>,
    bill_depth: Memo<u64, String>,
    grid: Memo<u64, GridData>,
    chart: Memo<(), ChartSpec>,
}

impl DashboardSession {
    /// Start a session with every species selected and the threshold at the
    /// largest observed body mass.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let bounds = MassBounds::for_dataset(&dataset, None, None);
        Self::with_bounds(dataset, bounds)
    }

    /// Like [`DashboardSession::new`] with explicit slider bounds. The initial
    /// threshold is clamped into them.
    pub fn with_bounds(dataset: Arc<Dataset>, bounds: MassBounds) -> Self {
        let mut filters = FilterState::for_dataset(&dataset);
        let initial_threshold = bounds.clamp(filters.mass_threshold());
        filters.set_mass_threshold(initial_threshold);
        let colors = ColorMap::new(&dataset.species);
        Self {
            dataset,
            colors,
            bounds,
            initial_threshold,
            filters,
            view: Memo::new(),
            count: Memo::new(),
            bill_length: Memo::new(),
            bill_depth: Memo::new(),
            grid: Memo::new(),
            chart: Memo::new(),
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    pub fn bounds(&self) -> MassBounds {
        self.bounds
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filters
    }

    // -- Inbound: control changes --

    /// Threshold slider moved. Non-finite values are ignored.
    pub fn set_mass_threshold(&mut self, value: f64) {
        if !value.is_finite() {
            log::warn!("Ignoring non-finite mass threshold {value}");
            return;
        }
        let value = self.bounds.clamp(value);
        if self.filters.set_mass_threshold(value) {
            log::debug!("mass threshold → {value}");
        }
    }

    /// Species checkbox group changed.
    pub fn set_selected_species(&mut self, species: BTreeSet<String>) {
        if self.filters.set_selected_species(species) {
            log::debug!("selected species → {:?}", self.filters.selected_species());
        }
    }

    pub fn toggle_species(&mut self, species: &str) {
        if self.filters.toggle_species(species) {
            log::debug!("selected species → {:?}", self.filters.selected_species());
        }
    }

    pub fn select_all_species(&mut self) {
        self.set_selected_species(self.dataset.species.clone());
    }

    pub fn select_no_species(&mut self) {
        self.set_selected_species(BTreeSet::new());
    }

    /// Back to the initial filter values.
    pub fn reset_filters(&mut self) {
        self.set_mass_threshold(self.initial_threshold);
        self.select_all_species();
    }

    // -- Outbound: display reads --

    /// The rows matching the current filters (recomputed only after a change).
    pub fn filtered_view(&mut self) -> Arc<FilteredView> {
        let dataset = &self.dataset;
        let filters = &self.filters;
        let before = self.view.recompute_count();
        let view = self.view.get(filters.stamp(), || {
            FilteredView::compute(Arc::clone(dataset), filters)
        });
        if self.view.recompute_count() != before {
            log::debug!(
                "filtered view recomputed (#{}): {} of {} rows",
                self.view.recompute_count(),
                view.len(),
                dataset.len()
            );
        }
        view
    }

    pub fn row_count(&mut self) -> usize {
        let view = self.filtered_view();
        *self
            .count
            .get(self.view.version(), || bindings::row_count(&view))
    }

    /// Average bill length, e.g. `"38.8 mm"`.
    pub fn bill_length_text(&mut self) -> String {
        let view = self.filtered_view();
        let text = self.bill_length.get(self.view.version(), || {
            bindings::mean_text(&view, Column::BillLengthMm)
        });
        text.as_ref().clone()
    }

    /// Average bill depth, e.g. `"18.3 mm"`.
    pub fn bill_depth_text(&mut self) -> String {
        let view = self.filtered_view();
        let text = self.bill_depth.get(self.view.version(), || {
            bindings::mean_text(&view, Column::BillDepthMm)
        });
        text.as_ref().clone()
    }

    /// Scatter plot over the full dataset; independent of the filters.
    pub fn chart(&mut self) -> Arc<ChartSpec> {
        let dataset = &self.dataset;
        let colors = &self.colors;
        self.chart.get((), || ChartSpec::bill_scatter(dataset, colors))
    }

    pub fn grid(&mut self) -> Arc<GridData> {
        let view = self.filtered_view();
        self.grid.get(self.view.version(), || GridData::from_view(&view))
    }

    /// Which derived values are currently valid. Computes nothing.
    pub fn cache_status(&self) -> CacheReport {
        let view_status = self.view.status(self.filters.stamp());
        let binding_status = |memo_status: CacheStatus| match view_status {
            CacheStatus::Fresh => memo_status,
            CacheStatus::Stale => CacheStatus::Stale,
        };
        let version = self.view.version();
        CacheReport {
            filtered_view: view_status,
            row_count: binding_status(self.count.status(version)),
            bill_length: binding_status(self.bill_length.status(version)),
            bill_depth: binding_status(self.bill_depth.status(version)),
            grid: binding_status(self.grid.status(version)),
        }
    }

    /// Computation counters of every derived value.
    pub fn recompute_counts(&self) -> RecomputeCounts {
        RecomputeCounts {
            filtered_view: self.view.recompute_count(),
            row_count: self.count.recompute_count(),
            bill_length: self.bill_length.recompute_count(),
            bill_depth: self.bill_depth.recompute_count(),
            grid: self.grid.recompute_count(),
            chart: self.chart.recompute_count(),
        }
    }
}
