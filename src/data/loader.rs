use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{
    RawListing, COMPANY, EXPERIENCE, JOB_POST_HISTORY, LOCATION, RATINGS, RAW_COLUMNS, REVIEWS,
    SALARY, SKILLS, TITLE,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load raw job listings from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the listing columns (the scraped export)
/// * `.json`    – `[{ "Company": ..., "Ratings": 4.1, ... }, ...]`
/// * `.parquet` – string columns plus a numeric `Ratings` column
///
/// Columns other than the nine listing columns (`Unnamed: 0`, `URL`, ...)
/// are dropped.
pub fn load_file(path: &Path) -> Result<Vec<RawListing>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!("Loaded {} raw listings from {}", rows.len(), path.display());
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Row assembly shared by all formats
// ---------------------------------------------------------------------------

/// Cell values of one row keyed by listing column; ratings kept separately.
#[derive(Default)]
struct RowBuilder {
    text: BTreeMap<&'static str, String>,
    ratings: Option<f64>,
}

impl RowBuilder {
    fn set_text(&mut self, column: &'static str, value: String) {
        self.text.insert(column, value);
    }

    fn build(mut self) -> RawListing {
        let mut take = |col: &str| self.text.remove(col).unwrap_or_default();
        RawListing {
            company: take(COMPANY),
            location: take(LOCATION),
            reviews: take(REVIEWS),
            title: take(TITLE),
            skills: take(SKILLS),
            experience: take(EXPERIENCE),
            job_post_history: take(JOB_POST_HISTORY),
            salary: take(SALARY),
            ratings: self.ratings,
        }
    }
}

/// Map a header to its listing column, `None` for housekeeping columns.
fn listing_column(header: &str) -> Option<&'static str> {
    RAW_COLUMNS.iter().copied().find(|c| *c == header.trim())
}

fn require_columns<'a>(present: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let present: Vec<&str> = present.into_iter().map(str::trim).collect();
    let missing: Vec<&str> = RAW_COLUMNS
        .iter()
        .copied()
        .filter(|c| !present.contains(c))
        .collect();
    if !missing.is_empty() {
        bail!("missing required columns: {}", missing.join(", "));
    }
    let dropped: Vec<&str> = present
        .iter()
        .copied()
        .filter(|h| listing_column(h).is_none())
        .collect();
    if !dropped.is_empty() {
        log::debug!("Dropping housekeeping columns {dropped:?}");
    }
    Ok(())
}

fn parse_rating(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<RawListing>> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Read listings from CSV text with a header row.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawListing>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    require_columns(headers.iter().map(String::as_str))?;

    let columns: Vec<Option<&'static str>> = headers.iter().map(|h| listing_column(h)).collect();
    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let mut row = RowBuilder::default();

        for (col_idx, value) in record.iter().enumerate() {
            match columns.get(col_idx).copied().flatten() {
                Some(RATINGS) => row.ratings = parse_rating(value),
                Some(col) => row.set_text(col, value.to_string()),
                None => {}
            }
        }
        rows.push(row.build());
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Vec<RawListing>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

/// Parse records-oriented JSON (`df.to_json(orient='records')`).
pub fn parse_json(text: &str) -> Result<Vec<RawListing>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        if i == 0 {
            require_columns(obj.keys().map(String::as_str))?;
        }

        let mut row = RowBuilder::default();
        for (key, val) in obj {
            match listing_column(key) {
                Some(RATINGS) => row.ratings = json_to_rating(val),
                Some(col) => row.set_text(col, json_to_text(val)),
                None => {}
            }
        }
        rows.push(row.build());
    }

    Ok(rows)
}

fn json_to_rating(val: &JsonValue) -> Option<f64> {
    match val {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => parse_rating(s),
        _ => None,
    }
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
fn load_parquet(path: &Path) -> Result<Vec<RawListing>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        require_columns(schema.fields().iter().map(|f| f.name().as_str()))?;

        let cols: Vec<(usize, &'static str)> = schema
            .fields()
            .iter()
            .enumerate()
            .filter_map(|(i, f)| listing_column(f.name()).map(|c| (i, c)))
            .collect();

        for row_idx in 0..batch.num_rows() {
            let mut row = RowBuilder::default();
            for &(col_idx, col) in &cols {
                let array = batch.column(col_idx);
                if col == RATINGS {
                    row.ratings = extract_f64(array, row_idx)
                        .with_context(|| format!("Row {row_idx}: failed to read '{col}'"))?;
                } else {
                    row.set_text(col, extract_text(array, row_idx));
                }
            }
            rows.push(row.build());
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

/// Read a numeric cell; strings are parsed, nulls are missing.
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Utf8 | DataType::LargeUtf8 => return Ok(parse_rating(&extract_text(col, row))),
        other => bail!("expected a numeric column, got {other:?}"),
    };
    Ok(value.filter(|v| v.is_finite()))
}

/// Read any scalar cell as text; nulls become empty strings.
fn extract_text(col: &Arc<dyn Array>, row: usize) -> String {
    if col.is_null(row) {
        return String::new();
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|s| s.value(row).to_string())
            .unwrap_or_default(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Boolean => col
            .as_any()
            .downcast_ref::<BooleanArray>()
            .map(|a| a.value(row).to_string())
            .unwrap_or_default(),
        _ => arrow::util::display::array_value_to_string(&**col, row).unwrap_or_default(),
    }
}
