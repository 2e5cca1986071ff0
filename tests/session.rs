use std::collections::BTreeSet;
use std::sync::Arc;

use penguins_dashboard::data::model::{Dataset, Penguin};
use penguins_dashboard::reactive::CacheStatus;
use penguins_dashboard::bindings;
use penguins_dashboard::data::model::Column;
use penguins_dashboard::session::{DashboardSession, MassBounds, RecomputeCounts};

fn species(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn three_penguins() -> Arc<Dataset> {
    let mut adelie = Penguin::new("Adelie", Some(3000.0));
    adelie.bill_length_mm = Some(39.1);
    adelie.bill_depth_mm = Some(18.7);
    let mut gentoo = Penguin::new("Gentoo", Some(5000.0));
    gentoo.bill_length_mm = Some(46.1);
    gentoo.bill_depth_mm = Some(13.2);
    let mut chinstrap = Penguin::new("Chinstrap", Some(4000.0));
    chinstrap.bill_length_mm = Some(46.5);
    chinstrap.bill_depth_mm = Some(17.9);
    Arc::new(Dataset::from_rows(vec![adelie, gentoo, chinstrap]))
}

#[test]
fn initial_state_selects_everything_at_max_mass() {
    let ds = three_penguins();
    let mut s = DashboardSession::new(Arc::clone(&ds));
    assert_eq!(s.filter_state().mass_threshold(), 5000.0);
    assert_eq!(s.filter_state().selected_species(), &ds.species);
    // Strict inequality: the heaviest penguin sits exactly on the threshold.
    assert_eq!(s.row_count(), 2);
    // The slider can still reach past it.
    assert!(s.bounds().max() > ds.max_body_mass());
}

#[test]
fn two_species_below_4500_keeps_only_adelie() {
    let mut s = DashboardSession::new(three_penguins());
    s.set_selected_species(species(&["Adelie", "Gentoo"]));
    s.set_mass_threshold(4500.0);

    let view = s.filtered_view();
    let rows: Vec<_> = view.rows().map(|r| r.species.as_str()).collect();
    assert_eq!(rows, vec!["Adelie"]);
    assert_eq!(s.row_count(), 1);
    assert_eq!(s.bill_length_text(), "39.1 mm");

    assert_eq!(bindings::column_mean(&view, Column::BodyMassG), Some(3000.0));
}

#[test]
fn high_threshold_all_species_returns_whole_dataset() {
    let ds = three_penguins();
    let mut s = DashboardSession::new(Arc::clone(&ds));
    s.set_mass_threshold(6000.0);
    s.set_selected_species(species(&["Adelie", "Gentoo", "Chinstrap"]));
    assert_eq!(s.filter_state().mass_threshold(), 6000.0);
    assert_eq!(s.row_count(), 3);
    assert_eq!(s.filtered_view().indices(), &[0, 1, 2]);
    assert_eq!(s.grid().rows.len(), ds.len());
}

#[test]
fn empty_selection_gives_empty_view_and_nan_means() {
    let mut s = DashboardSession::new(three_penguins());
    s.select_no_species();
    assert_eq!(s.row_count(), 0);
    assert!(s.filtered_view().is_empty());
    assert_eq!(s.bill_length_text(), "nan mm");
    assert_eq!(s.bill_depth_text(), "nan mm");
    assert!(s.grid().rows.is_empty());
}

#[test]
fn writes_are_lazy_and_reads_are_cached() {
    let mut s = DashboardSession::new(three_penguins());
    let first = s.filtered_view();
    assert_eq!(s.cache_status().filtered_view, CacheStatus::Fresh);

    s.set_mass_threshold(4500.0);
    s.set_mass_threshold(4200.0);
    // Nothing recomputed yet, only marked stale.
    let status = s.cache_status();
    assert_eq!(status.filtered_view, CacheStatus::Stale);
    assert_eq!(status.row_count, CacheStatus::Stale);

    let second = s.filtered_view();
    let again = s.filtered_view();
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&second, &again));
}

#[test]
fn bindings_share_one_snapshot_per_cycle() {
    let mut s = DashboardSession::new(three_penguins());
    s.set_mass_threshold(4500.0);

    let count = s.row_count();
    let length = s.bill_length_text();
    let depth = s.bill_depth_text();
    let grid = s.grid();
    let view = s.filtered_view();

    assert_eq!(count, view.len());
    assert_eq!(grid.rows.len(), view.len());
    assert_eq!(length, "42.8 mm");
    assert_eq!(depth, "18.3 mm");

    let status = s.cache_status();
    assert_eq!(status.filtered_view, CacheStatus::Fresh);
    assert_eq!(status.row_count, CacheStatus::Fresh);
    assert_eq!(status.bill_length, CacheStatus::Fresh);
    assert_eq!(status.bill_depth, CacheStatus::Fresh);
    assert_eq!(status.grid, CacheStatus::Fresh);
}

#[test]
fn repeated_reads_are_identical() {
    let mut s = DashboardSession::new(three_penguins());
    s.toggle_species("Gentoo");
    assert_eq!(s.row_count(), s.row_count());
    assert_eq!(s.bill_length_text(), s.bill_length_text());
    let g1 = s.grid();
    let g2 = s.grid();
    assert!(Arc::ptr_eq(&g1, &g2));
}

#[test]
fn writing_an_unchanged_value_keeps_caches_fresh() {
    let mut s = DashboardSession::new(three_penguins());
    let before = s.filtered_view();
    let threshold = s.filter_state().mass_threshold();
    s.set_mass_threshold(threshold);
    s.select_all_species();
    assert_eq!(s.cache_status().filtered_view, CacheStatus::Fresh);
    assert!(Arc::ptr_eq(&before, &s.filtered_view()));
}

#[test]
fn chart_ignores_filters() {
    let mut s = DashboardSession::new(three_penguins());
    let before = s.chart();
    s.select_no_species();
    let after = s.chart();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(after.point_count(), 3);
    let labels: Vec<_> = after.series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Adelie", "Chinstrap", "Gentoo"]);
}

#[test]
fn threshold_is_clamped_and_non_finite_ignored() {
    let ds = three_penguins();
    let mut s = DashboardSession::new(ds);
    assert_eq!(s.bounds(), MassBounds::new(2000.0, 6000.0));
    s.set_mass_threshold(9000.0);
    assert_eq!(s.filter_state().mass_threshold(), 6000.0);
    assert_eq!(s.row_count(), 3);
    s.set_mass_threshold(f64::NAN);
    assert_eq!(s.filter_state().mass_threshold(), 6000.0);
    s.set_mass_threshold(100.0);
    assert_eq!(s.filter_state().mass_threshold(), 2000.0);
    assert_eq!(s.row_count(), 0);
}

#[test]
fn inverted_bounds_do_not_panic() {
    let ds = three_penguins();
    let mut s = DashboardSession::with_bounds(Arc::clone(&ds), MassBounds::new(6000.0, 2000.0));
    assert_eq!(s.filter_state().mass_threshold(), 5000.0);
    s.set_mass_threshold(7000.0);
    assert_eq!(s.row_count(), 3);
}

#[test]
fn writes_recompute_nothing_and_one_read_cycle_recomputes_once() {
    let mut s = DashboardSession::new(three_penguins());
    s.set_mass_threshold(4500.0);
    s.set_mass_threshold(4200.0);
    s.toggle_species("Gentoo");
    s.select_all_species();
    assert_eq!(s.recompute_counts(), RecomputeCounts::default());

    for _ in 0..2 {
        s.row_count();
        s.bill_length_text();
        s.bill_depth_text();
        s.grid();
    }
    let counts = s.recompute_counts();
    assert_eq!(counts.filtered_view, 1);
    assert_eq!(counts.row_count, 1);
    assert_eq!(counts.bill_length, 1);
    assert_eq!(counts.bill_depth, 1);
    assert_eq!(counts.grid, 1);
    assert_eq!(counts.chart, 0);

    s.set_mass_threshold(3500.0);
    s.row_count();
    s.grid();
    let counts = s.recompute_counts();
    assert_eq!(counts.filtered_view, 2);
    assert_eq!(counts.row_count, 2);
    assert_eq!(counts.grid, 2);
    // Not read since the write, so not recomputed.
    assert_eq!(counts.bill_length, 1);
}

#[test]
fn reset_restores_initial_filters() {
    let ds = three_penguins();
    let mut s = DashboardSession::new(Arc::clone(&ds));
    s.set_mass_threshold(3500.0);
    s.select_no_species();
    s.reset_filters();
    assert_eq!(s.filter_state().mass_threshold(), ds.max_body_mass());
    assert_eq!(s.filter_state().selected_species(), &ds.species);
}

#[test]
fn sessions_share_dataset_but_not_filters() {
    let ds = three_penguins();
    let mut a = DashboardSession::new(Arc::clone(&ds));
    let mut b = DashboardSession::new(Arc::clone(&ds));
    a.select_no_species();
    assert_eq!(a.row_count(), 0);
    assert_eq!(b.row_count(), 2);
    assert!(Arc::ptr_eq(a.dataset(), b.dataset()));
}

#[test]
fn rows_without_mass_are_never_shown() {
    let ds = Arc::new(Dataset::from_rows(vec![
        Penguin::new("Adelie", None),
        Penguin::new("Adelie", Some(3200.0)),
    ]));
    let mut s = DashboardSession::new(ds);
    s.set_mass_threshold(10_000.0);
    assert_eq!(s.filtered_view().indices(), &[1]);
}
