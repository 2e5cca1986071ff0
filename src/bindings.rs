//! Display bindings: read-only projections of the filtered view (and, for
//! the chart, of the full dataset) that the UI renders.

use std::collections::BTreeMap;

use eframe::egui::Color32;
use thiserror::Error;

use crate::color::ColorMap;
use crate::data::filter::FilteredView;
use crate::data::model::{CellValue, Column, Dataset};

/// Columns shown in the data grid, in display order.
pub const GRID_COLUMNS: [Column; 5] = [
    Column::Species,
    Column::Island,
    Column::BillLengthMm,
    Column::BillDepthMm,
    Column::BodyMassG,
];

// ---------------------------------------------------------------------------
// Counts and means
// ---------------------------------------------------------------------------

pub fn row_count(view: &FilteredView) -> usize {
    view.len()
}

/// Arithmetic mean of `column` over the view, skipping missing values.
/// `None` when no row has a value.
pub fn column_mean(view: &FilteredView, column: Column) -> Option<f64> {
    let (sum, n) = view
        .rows()
        .filter_map(|row| row.measurement(column))
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Format a mean to one decimal with its unit. An undefined mean renders as
/// `nan`, e.g. `"nan mm"`.
pub fn format_mean(mean: Option<f64>, unit: &str) -> String {
    match mean {
        Some(v) => format!("{v:.1} {unit}"),
        None => format!("nan {unit}"),
    }
}

/// Mean of a measurement column, formatted with the column's unit.
pub fn mean_text(view: &FilteredView, column: Column) -> String {
    format_mean(column_mean(view, column), column.unit().unwrap_or(""))
        .trim_end()
        .to_string()
}

// ---------------------------------------------------------------------------
// Chart specification
// ---------------------------------------------------------------------------

/// Points of one colour group in the scatter plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub label: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

/// Scatter plot description: two numeric axes, colour by species.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x: Column,
    pub y: Column,
    pub color_by: Column,
    pub series: Vec<ScatterSeries>,
}

impl ChartSpec {
    /// Build the bill length / bill depth scatter over every row of the
    /// dataset. Rows missing either coordinate are left out.
    pub fn bill_scatter(dataset: &Dataset, colors: &ColorMap) -> Self {
        Self::scatter(
            "Bill length and depth",
            dataset,
            Column::BillLengthMm,
            Column::BillDepthMm,
            colors,
        )
    }

    pub fn scatter(title: &str, dataset: &Dataset, x: Column, y: Column, colors: &ColorMap) -> Self {
        let mut groups: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
        for row in &dataset.rows {
            if let (Some(px), Some(py)) = (row.measurement(x), row.measurement(y)) {
                groups.entry(row.species.as_str()).or_default().push([px, py]);
            }
        }

        let series = groups
            .into_iter()
            .map(|(label, points)| ScatterSeries {
                label: label.to_string(),
                color: colors.color_for(label),
                points,
            })
            .collect();

        ChartSpec {
            title: title.to_string(),
            x,
            y,
            color_by: Column::Species,
            series,
        }
    }

    /// Total number of plotted points.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Tabular projection of the filtered view onto [`GRID_COLUMNS`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridData {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<CellValue>>,
    /// Whether the UI should offer per-column filters.
    pub filters_enabled: bool,
}

impl GridData {
    pub fn from_view(view: &FilteredView) -> Self {
        let columns = GRID_COLUMNS.to_vec();
        let rows = view
            .rows()
            .map(|row| columns.iter().map(|&c| row.cell(c)).collect())
            .collect();
        GridData {
            columns,
            rows,
            filters_enabled: true,
        }
    }

    /// Indices of grid rows passing every column filter. `filters` is
    /// parallel to `columns`; missing entries mean "no filter".
    pub fn visible_rows(&self, filters: &[ColumnFilter]) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, cells)| {
                cells
                    .iter()
                    .zip(filters)
                    .all(|(cell, filter)| filter.matches(cell))
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Sort row indices by one column. Missing cells sort first when
    /// ascending; ties keep their view order.
    pub fn sort_rows(&self, rows: &mut [usize], column: usize, descending: bool) {
        rows.sort_by(|&a, &b| {
            let ord = self.rows[a][column].cmp(&self.rows[b][column]);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Grid column filters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterParseError {
    #[error("expected a number after '{op}', got '{text}'")]
    NotANumber { op: &'static str, text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

/// A per-column grid filter typed into the column header.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ColumnFilter {
    #[default]
    Any,
    /// Numeric comparison against the cell value; missing cells never match.
    Compare(Comparison, f64),
    /// Case-insensitive substring of the displayed cell (stored lowercase).
    Contains(String),
}

impl ColumnFilter {
    /// Parse filter text: empty → no filter; `<`, `<=`, `>`, `>=`, `=`
    /// followed by a number → numeric comparison; anything else → substring.
    pub fn parse(text: &str) -> Result<Self, FilterParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(ColumnFilter::Any);
        }

        const OPS: [(&str, Comparison); 5] = [
            ("<=", Comparison::Le),
            (">=", Comparison::Ge),
            ("<", Comparison::Lt),
            (">", Comparison::Gt),
            ("=", Comparison::Eq),
        ];
        for (op, cmp) in OPS {
            if let Some(rest) = text.strip_prefix(op) {
                let rest = rest.trim();
                return rest
                    .parse::<f64>()
                    .map(|v| ColumnFilter::Compare(cmp, v))
                    .map_err(|_| FilterParseError::NotANumber {
                        op,
                        text: rest.to_string(),
                    });
            }
        }

        Ok(ColumnFilter::Contains(text.to_lowercase()))
    }

    pub fn matches(&self, cell: &CellValue) -> bool {
        match self {
            ColumnFilter::Any => true,
            ColumnFilter::Compare(cmp, rhs) => match cell.as_f64() {
                Some(v) => match cmp {
                    Comparison::Lt => v < *rhs,
                    Comparison::Le => v <= *rhs,
                    Comparison::Gt => v > *rhs,
                    Comparison::Ge => v >= *rhs,
                    Comparison::Eq => (v - rhs).abs() < 1e-9,
                },
                None => false,
            },
            ColumnFilter::Contains(needle) => cell.to_string().to_lowercase().contains(needle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_mean_uses_one_decimal() {
        assert_eq!(format_mean(Some(3000.0), "g"), "3000.0 g");
        assert_eq!(format_mean(Some(38.849), "mm"), "38.8 mm");
        assert_eq!(format_mean(None, "mm"), "nan mm");
    }

    #[test]
    fn parse_filters() {
        assert_eq!(ColumnFilter::parse("  ").unwrap(), ColumnFilter::Any);
        assert_eq!(
            ColumnFilter::parse(">= 40").unwrap(),
            ColumnFilter::Compare(Comparison::Ge, 40.0)
        );
        assert_eq!(
            ColumnFilter::parse("<3500").unwrap(),
            ColumnFilter::Compare(Comparison::Lt, 3500.0)
        );
        assert_eq!(
            ColumnFilter::parse("Dream").unwrap(),
            ColumnFilter::Contains("dream".into())
        );
        assert_eq!(
            ColumnFilter::parse("> tall"),
            Err(FilterParseError::NotANumber {
                op: ">",
                text: "tall".into()
            })
        );
    }

    #[test]
    fn filters_match_cells() {
        let big = ColumnFilter::Compare(Comparison::Gt, 40.0);
        assert!(big.matches(&CellValue::Float(41.0)));
        assert!(!big.matches(&CellValue::Float(40.0)));
        assert!(!big.matches(&CellValue::Missing));

        let text = ColumnFilter::parse("gen").unwrap();
        assert!(text.matches(&CellValue::Text("Gentoo".into())));
        assert!(!text.matches(&CellValue::Text("Adelie".into())));
    }
}
