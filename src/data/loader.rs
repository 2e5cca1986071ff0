use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{Column, Dataset, Penguin};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the penguin table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the canonical column names, `NA` for missing
/// * `.json`    – `[{ "species": "Adelie", "body_mass_g": 3750, ... }, ...]`
/// * `.parquet` – one column per field (recommended for large tables)
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} penguins ({} species: {:?}) from {}",
        dataset.len(),
        dataset.species.len(),
        dataset.species,
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names (any order, extra columns are
/// ignored). `species` and `island` are required; `NA`, `NaN` or an empty
/// cell marks a missing value.
fn load_csv(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse CSV text from any reader.
pub fn read_csv<R: std::io::Read>(input: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let position = |column: Column| headers.iter().position(|h| h == column.name());
    let species_idx = position(Column::Species).context("CSV missing 'species' column")?;
    let island_idx = position(Column::Island).context("CSV missing 'island' column")?;
    let bill_length_idx = position(Column::BillLengthMm);
    let bill_depth_idx = position(Column::BillDepthMm);
    let flipper_idx = position(Column::FlipperLengthMm);
    let mass_idx = position(Column::BodyMassG);
    let sex_idx = position(Column::Sex);
    let year_idx = position(Column::Year);

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("").trim();
        let number = |idx: Option<usize>, column: Column| {
            parse_optional_f64(cell(idx))
                .with_context(|| format!("CSV row {row_no}, column '{column}'"))
        };

        let species = cell(Some(species_idx));
        if is_missing(species) {
            log::warn!("CSV row {row_no}: missing species, row skipped");
            continue;
        }

        rows.push(Penguin {
            species: species.to_string(),
            island: cell(Some(island_idx)).to_string(),
            bill_length_mm: number(bill_length_idx, Column::BillLengthMm)?,
            bill_depth_mm: number(bill_depth_idx, Column::BillDepthMm)?,
            flipper_length_mm: number(flipper_idx, Column::FlipperLengthMm)?,
            body_mass_g: number(mass_idx, Column::BodyMassG)?,
            sex: Some(cell(sex_idx))
                .filter(|s| !is_missing(s))
                .map(str::to_string),
            year: parse_optional_i64(cell(year_idx))
                .with_context(|| format!("CSV row {row_no}, column 'year'"))?,
        });
    }

    Ok(Dataset::from_rows(rows))
}

fn is_missing(s: &str) -> bool {
    s.is_empty() || s.eq_ignore_ascii_case("na") || s.eq_ignore_ascii_case("nan")
}

fn parse_optional_f64(s: &str) -> Result<Option<f64>> {
    if is_missing(s) {
        return Ok(None);
    }
    let v = s
        .parse::<f64>()
        .with_context(|| format!("'{s}' is not a number"))?;
    Ok(Some(v).filter(|v| !v.is_nan()))
}

fn parse_optional_i64(s: &str) -> Result<Option<i64>> {
    if is_missing(s) {
        return Ok(None);
    }
    let v = s
        .parse::<i64>()
        .with_context(|| format!("'{s}' is not an integer"))?;
    Ok(Some(v))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "species": "Adelie", "island": "Torgersen", "bill_length_mm": 39.1,
///     "bill_depth_mm": 18.7, "flipper_length_mm": 181, "body_mass_g": 3750,
///     "sex": "male", "year": 2007 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    read_json(&text)
}

/// Parse JSON records text.
pub fn read_json(text: &str) -> Result<Dataset> {
    let rows: Vec<Penguin> = serde_json::from_str(text).context("parsing JSON records")?;
    Ok(Dataset::from_rows(rows))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per field.
///
/// Numeric columns may be Float64/Float32/Int64/Int32 (pandas writes integer
/// columns without missing values as Int64). Nulls and NaN become missing.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let column = |c: Column| schema.index_of(c.name()).ok().map(|i| batch.column(i));

        let species_col =
            column(Column::Species).context("Parquet file missing 'species' column")?;
        let island_col = column(Column::Island).context("Parquet file missing 'island' column")?;
        let bill_length_col = column(Column::BillLengthMm);
        let bill_depth_col = column(Column::BillDepthMm);
        let flipper_col = column(Column::FlipperLengthMm);
        let mass_col = column(Column::BodyMassG);
        let sex_col = column(Column::Sex);
        let year_col = column(Column::Year);

        let number = |col: Option<&Arc<dyn Array>>, row: usize, c: Column| -> Result<Option<f64>> {
            match col {
                Some(col) => extract_f64(col, row).with_context(|| format!("Row {row}: '{c}'")),
                None => Ok(None),
            }
        };

        for row in 0..batch.num_rows() {
            let Some(species) = extract_string(species_col, row)
                .with_context(|| format!("Row {row}: 'species'"))?
            else {
                log::warn!("Parquet row {row}: missing species, row skipped");
                continue;
            };

            rows.push(Penguin {
                species,
                island: extract_string(island_col, row)
                    .with_context(|| format!("Row {row}: 'island'"))?
                    .unwrap_or_default(),
                bill_length_mm: number(bill_length_col, row, Column::BillLengthMm)?,
                bill_depth_mm: number(bill_depth_col, row, Column::BillDepthMm)?,
                flipper_length_mm: number(flipper_col, row, Column::FlipperLengthMm)?,
                body_mass_g: number(mass_col, row, Column::BodyMassG)?,
                sex: match sex_col {
                    Some(col) => {
                        extract_string(col, row).with_context(|| format!("Row {row}: 'sex'"))?
                    }
                    None => None,
                },
                year: match year_col {
                    Some(col) => number(Some(col), row, Column::Year)?.map(|y| y as i64),
                    None => None,
                },
            });
        }
    }

    Ok(Dataset::from_rows(rows))
}

// -- Parquet / Arrow helpers --

/// Extract a string cell from a Utf8 or LargeUtf8 column.
fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .context("expected StringArray")?
            .value(row),
        DataType::LargeUtf8 => col
            .as_any()
            .downcast_ref::<LargeStringArray>()
            .context("expected LargeStringArray")?
            .value(row),
        other => bail!("Expected Utf8 column, got {other:?}"),
    };
    Ok(Some(value.to_string()))
}

/// Extract a numeric cell as `f64`; null and NaN map to `None`.
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .context("expected Float64Array")?
            .value(row),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .context("expected Float32Array")?
            .value(row) as f64,
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row) as f64,
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .value(row) as f64,
        other => bail!("Expected numeric column, got {other:?}"),
    };
    Ok(Some(value).filter(|v| !v.is_nan()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_numbers_accept_na_markers() {
        assert_eq!(parse_optional_f64("NA").unwrap(), None);
        assert_eq!(parse_optional_f64("").unwrap(), None);
        assert_eq!(parse_optional_f64("nan").unwrap(), None);
        assert_eq!(parse_optional_f64("39.1").unwrap(), Some(39.1));
        assert!(parse_optional_f64("heavy").is_err());
        assert_eq!(parse_optional_i64("2007").unwrap(), Some(2007));
    }
}
