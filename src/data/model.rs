use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column – the named columns of the penguin table
// ---------------------------------------------------------------------------

/// One named column of the penguin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Species,
    Island,
    BillLengthMm,
    BillDepthMm,
    FlipperLengthMm,
    BodyMassG,
    Sex,
    Year,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Species,
        Column::Island,
        Column::BillLengthMm,
        Column::BillDepthMm,
        Column::FlipperLengthMm,
        Column::BodyMassG,
        Column::Sex,
        Column::Year,
    ];

    /// Canonical column name as it appears in data files.
    pub fn name(self) -> &'static str {
        match self {
            Column::Species => "species",
            Column::Island => "island",
            Column::BillLengthMm => "bill_length_mm",
            Column::BillDepthMm => "bill_depth_mm",
            Column::FlipperLengthMm => "flipper_length_mm",
            Column::BodyMassG => "body_mass_g",
            Column::Sex => "sex",
            Column::Year => "year",
        }
    }

    /// Look a column up by its canonical name.
    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Unit suffix used when a measurement of this column is displayed.
    pub fn unit(self) -> Option<&'static str> {
        match self {
            Column::BillLengthMm | Column::BillDepthMm | Column::FlipperLengthMm => Some("mm"),
            Column::BodyMassG => Some("g"),
            _ => None,
        }
    }

    /// Whether the column holds numbers (filters compare numerically).
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Column::BillLengthMm
                | Column::BillDepthMm
                | Column::FlipperLengthMm
                | Column::BodyMassG
                | Column::Year
        )
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// CellValue – a single cell of the grid
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell, as shown in the data grid.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Float(f64),
    Integer(i64),
    Missing,
}

// -- Manual Eq/Ord so grid rows can be sorted --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Missing => 0,
                Integer(_) | Float(_) => 1,
                Text(_) => 2,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Text(a), Text(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            // Mixed Integer/Float: by value, then Integer before Float.
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a
                    .total_cmp(&b)
                    .then_with(|| matches!(self, Float(_)).cmp(&matches!(other, Float(_)))),
                _ => std::cmp::Ordering::Equal,
            },
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Float(v) => write!(f, "{v:.1}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Missing => write!(f, "NA"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64` for numeric comparisons.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl From<Option<f64>> for CellValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(CellValue::Missing, CellValue::Float)
    }
}

// ---------------------------------------------------------------------------
// Penguin – one row of the table
// ---------------------------------------------------------------------------

/// A single observed penguin. Measurements may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Penguin {
    pub species: String,
    pub island: String,
    #[serde(default)]
    pub bill_length_mm: Option<f64>,
    #[serde(default)]
    pub bill_depth_mm: Option<f64>,
    #[serde(default)]
    pub flipper_length_mm: Option<f64>,
    #[serde(default)]
    pub body_mass_g: Option<f64>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub year: Option<i64>,
}

impl Penguin {
    /// Shorthand for a row carrying only species and body mass.
    pub fn new(species: &str, body_mass_g: Option<f64>) -> Self {
        Penguin {
            species: species.to_string(),
            island: String::new(),
            bill_length_mm: None,
            bill_depth_mm: None,
            flipper_length_mm: None,
            body_mass_g,
            sex: None,
            year: None,
        }
    }

    /// Numeric value of a measurement column, `None` when missing or not numeric.
    pub fn measurement(&self, column: Column) -> Option<f64> {
        let value = match column {
            Column::BillLengthMm => self.bill_length_mm,
            Column::BillDepthMm => self.bill_depth_mm,
            Column::FlipperLengthMm => self.flipper_length_mm,
            Column::BodyMassG => self.body_mass_g,
            Column::Year => self.year.map(|y| y as f64),
            Column::Species | Column::Island | Column::Sex => None,
        };
        value.filter(|v| !v.is_nan())
    }

    /// The row's value for any column, as a grid cell.
    pub fn cell(&self, column: Column) -> CellValue {
        match column {
            Column::Species => CellValue::Text(self.species.clone()),
            Column::Island => CellValue::Text(self.island.clone()),
            Column::Sex => self
                .sex
                .clone()
                .map_or(CellValue::Missing, CellValue::Text),
            Column::Year => self.year.map_or(CellValue::Missing, CellValue::Integer),
            other => self.measurement(other).into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full, immutable table with pre-computed indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// All rows.
    pub rows: Vec<Penguin>,
    /// Sorted set of distinct species labels.
    pub species: BTreeSet<String>,
    /// Observed (min, max) body mass, `None` if no row has one.
    pub body_mass_range: Option<(f64, f64)>,
}

impl Dataset {
    /// Build indices from the loaded rows.
    pub fn from_rows(rows: Vec<Penguin>) -> Self {
        let species: BTreeSet<String> = rows.iter().map(|r| r.species.clone()).collect();
        let body_mass_range = rows
            .iter()
            .filter_map(|r| r.measurement(Column::BodyMassG))
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            });

        Dataset {
            rows,
            species,
            body_mass_range,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Largest observed body mass, or `0.0` for a table without any.
    pub fn max_body_mass(&self) -> f64 {
        self.body_mass_range.map_or(0.0, |(_, hi)| hi)
    }
}
