use std::collections::BTreeSet;
use std::sync::Arc;

use penguins_dashboard::bindings::{self, ChartSpec, ColumnFilter, GridData, GRID_COLUMNS};
use penguins_dashboard::color::ColorMap;
use penguins_dashboard::data::filter::{FilterState, FilteredView};
use penguins_dashboard::data::model::{CellValue, Column, Dataset, Penguin};
use proptest::prelude::*;

const LABELS: [&str; 4] = ["Adelie", "Chinstrap", "Gentoo", "Emperor"];

fn penguin(species: &str, mass: Option<f64>, bill: Option<f64>) -> Penguin {
    let mut p = Penguin::new(species, mass);
    p.island = "Dream".into();
    p.bill_length_mm = bill;
    p.bill_depth_mm = bill.map(|b| b / 2.0);
    p
}

fn penguin_strategy() -> impl Strategy<Value = Penguin> {
    (
        0usize..LABELS.len(),
        proptest::option::of(2000.0f64..7000.0),
        proptest::option::of(30.0f64..60.0),
    )
        .prop_map(|(i, mass, bill)| penguin(LABELS[i], mass, bill))
}

fn selection_strategy() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::sample::subsequence(LABELS.to_vec(), 0..=LABELS.len())
        .prop_map(|labels| labels.into_iter().map(String::from).collect::<BTreeSet<String>>())
}

proptest! {
    #[test]
    fn view_matches_naive_reference_filter(
        rows in proptest::collection::vec(penguin_strategy(), 0..60),
        selected in selection_strategy(),
        threshold in 1500.0f64..7500.0,
    ) {
        let ds = Arc::new(Dataset::from_rows(rows));
        let filters = FilterState::new(threshold, selected.clone());
        let view = FilteredView::compute(Arc::clone(&ds), &filters);

        let mut expected = Vec::new();
        for (i, row) in ds.rows.iter().enumerate() {
            let species_ok = selected.iter().any(|s| *s == row.species);
            let mass_ok = matches!(row.body_mass_g, Some(m) if m < threshold);
            if species_ok && mass_ok {
                expected.push(i);
            }
        }
        prop_assert_eq!(view.indices(), expected.as_slice());
        prop_assert!(view.indices().iter().all(|&i| i < ds.len()));
        prop_assert_eq!(bindings::row_count(&view), expected.len());
    }

    #[test]
    fn everything_selected_above_max_is_whole_dataset(
        rows in proptest::collection::vec(penguin_strategy(), 0..60),
    ) {
        let with_mass: Vec<Penguin> =
            rows.into_iter().filter(|p| p.body_mass_g.is_some()).collect();
        let ds = Arc::new(Dataset::from_rows(with_mass));
        let filters = FilterState::new(ds.max_body_mass() + 1.0, ds.species.clone());
        let view = FilteredView::compute(Arc::clone(&ds), &filters);
        prop_assert_eq!(view.len(), ds.len());
    }
}

fn small_view(threshold: f64) -> FilteredView {
    let ds = Arc::new(Dataset::from_rows(vec![
        penguin("Adelie", Some(3000.0), Some(40.0)),
        penguin("Adelie", Some(3100.0), None),
        penguin("Gentoo", Some(5000.0), Some(50.0)),
    ]));
    let mut filters = FilterState::for_dataset(&ds);
    filters.set_mass_threshold(threshold);
    FilteredView::compute(ds, &filters)
}

#[test]
fn mean_skips_missing_values() {
    let view = small_view(4000.0);
    assert_eq!(view.len(), 2);
    assert_eq!(bindings::column_mean(&view, Column::BillLengthMm), Some(40.0));
    assert_eq!(bindings::mean_text(&view, Column::BillDepthMm), "20.0 mm");
    assert_eq!(bindings::mean_text(&view, Column::BodyMassG), "3050.0 g");
}

#[test]
fn mean_of_only_missing_values_is_placeholder() {
    let ds = Arc::new(Dataset::from_rows(vec![penguin("Adelie", Some(3000.0), None)]));
    let view = FilteredView::compute(Arc::clone(&ds), &FilterState::new(9999.0, ds.species.clone()));
    assert_eq!(bindings::column_mean(&view, Column::BillLengthMm), None);
    assert_eq!(bindings::mean_text(&view, Column::BillLengthMm), "nan mm");
}

#[test]
fn grid_projects_five_columns_in_view_order() {
    let view = small_view(6000.0);
    let grid = GridData::from_view(&view);
    assert_eq!(grid.columns, GRID_COLUMNS.to_vec());
    assert!(grid.filters_enabled);
    assert_eq!(grid.rows.len(), 3);
    assert_eq!(
        grid.rows[1],
        vec![
            CellValue::Text("Adelie".into()),
            CellValue::Text("Dream".into()),
            CellValue::Missing,
            CellValue::Missing,
            CellValue::Float(3100.0),
        ]
    );
}

#[test]
fn grid_column_filters_combine() {
    let grid = GridData::from_view(&small_view(6000.0));
    let mut filters = vec![ColumnFilter::Any; grid.columns.len()];
    assert_eq!(grid.visible_rows(&filters), vec![0, 1, 2]);

    filters[0] = ColumnFilter::parse("adel").unwrap();
    assert_eq!(grid.visible_rows(&filters), vec![0, 1]);

    filters[2] = ColumnFilter::parse(">= 35").unwrap();
    assert_eq!(grid.visible_rows(&filters), vec![0]);
}

#[test]
fn chart_covers_full_dataset_grouped_by_species() {
    let ds = Dataset::from_rows(vec![
        penguin("Gentoo", Some(5000.0), Some(50.0)),
        penguin("Adelie", Some(3000.0), Some(40.0)),
        penguin("Adelie", None, Some(38.0)),
        penguin("Adelie", Some(3100.0), None),
    ]);
    let colors = ColorMap::new(&ds.species);
    let chart = ChartSpec::bill_scatter(&ds, &colors);
    assert_eq!(chart.x, Column::BillLengthMm);
    assert_eq!(chart.y, Column::BillDepthMm);
    assert_eq!(chart.color_by, Column::Species);
    assert_eq!(chart.series.len(), 2);
    assert_eq!(chart.series[0].label, "Adelie");
    assert_eq!(chart.series[0].points, vec![[40.0, 20.0], [38.0, 19.0]]);
    assert_eq!(chart.series[0].color, colors.color_for("Adelie"));
    assert_eq!(chart.point_count(), 3);
}

#[test]
fn grid_sorts_by_column() {
    let grid = GridData::from_view(&small_view(6000.0));
    let mut rows = vec![0, 1, 2];
    // bill_length_mm: 40.0, NA, 50.0
    grid.sort_rows(&mut rows, 2, false);
    assert_eq!(rows, vec![1, 0, 2]);
    grid.sort_rows(&mut rows, 2, true);
    assert_eq!(rows, vec![2, 0, 1]);
}
