use std::collections::BTreeSet;
use std::sync::Arc;

use super::model::{Column, Dataset, Penguin};
use crate::reactive::{Generation, Signal};

// ---------------------------------------------------------------------------
// Filter state: the two user-controlled inputs
// ---------------------------------------------------------------------------

/// Identifies one combination of filter values. Equal stamps mean equal
/// filter values, so a cache keyed by the stamp is valid exactly as long as
/// neither input has changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterStamp {
    pub mass_threshold: Generation,
    pub selected_species: Generation,
}

/// Body-mass upper bound and species selection, each change-tracked.
#[derive(Debug, Clone)]
pub struct FilterState {
    mass_threshold: Signal<f64>,
    selected_species: Signal<BTreeSet<String>>,
}

impl FilterState {
    pub fn new(mass_threshold: f64, selected_species: BTreeSet<String>) -> Self {
        Self {
            mass_threshold: Signal::new(mass_threshold),
            selected_species: Signal::new(selected_species),
        }
    }

    /// Initial state for a dataset: threshold at the largest observed body
    /// mass, every species selected.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        Self::new(dataset.max_body_mass(), dataset.species.clone())
    }

    pub fn mass_threshold(&self) -> f64 {
        *self.mass_threshold.get()
    }

    pub fn selected_species(&self) -> &BTreeSet<String> {
        self.selected_species.get()
    }

    pub fn stamp(&self) -> FilterStamp {
        FilterStamp {
            mass_threshold: self.mass_threshold.generation(),
            selected_species: self.selected_species.generation(),
        }
    }

    /// Returns whether the threshold actually changed.
    pub fn set_mass_threshold(&mut self, value: f64) -> bool {
        self.mass_threshold.set(value)
    }

    /// Returns whether the selection actually changed.
    pub fn set_selected_species(&mut self, species: BTreeSet<String>) -> bool {
        self.selected_species.set(species)
    }

    /// Flip a single species in or out of the selection.
    pub fn toggle_species(&mut self, species: &str) -> bool {
        self.selected_species.update(|selected| {
            if !selected.remove(species) {
                selected.insert(species.to_string());
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Whether a row passes both filters.
///
/// * species must be in `selected` (exact string match)
/// * body mass must be strictly below `mass_threshold`; a missing body mass
///   never passes
pub fn row_matches(row: &Penguin, mass_threshold: f64, selected: &BTreeSet<String>) -> bool {
    if !selected.contains(&row.species) {
        return false;
    }
    match row.measurement(Column::BodyMassG) {
        Some(mass) => mass < mass_threshold,
        None => false,
    }
}

/// Return indices of rows that pass the current filters, in dataset order.
pub fn filtered_indices(dataset: &Dataset, filters: &FilterState) -> Vec<usize> {
    let threshold = filters.mass_threshold();
    let selected = filters.selected_species();
    if selected.is_empty() {
        return Vec::new();
    }
    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row_matches(row, threshold, selected))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – the rows currently matching the filters
// ---------------------------------------------------------------------------

/// A snapshot of the rows matching one combination of filter values.
#[derive(Debug, Clone)]
pub struct FilteredView {
    dataset: Arc<Dataset>,
    indices: Vec<usize>,
}

impl FilteredView {
    pub fn compute(dataset: Arc<Dataset>, filters: &FilterState) -> Self {
        let indices = filtered_indices(&dataset, filters);
        Self { dataset, indices }
    }

    /// Indices into the full dataset.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn rows(&self) -> impl Iterator<Item = &Penguin> + '_ {
        self.indices.iter().map(|&i| &self.dataset.rows[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
