use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use super::model::{CellValue, Column, DType, Table};

/// Timestamp layouts recognised when inferring a temporal column.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Cell contents read as missing in every column, besides the empty string.
const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Errors and summary
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing CSV: {0}")]
    Parse(#[from] csv::Error),
    #[error("No columns to parse from file")]
    NoColumns,
}

/// Dimensions of a freshly loaded table, shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub rows: usize,
    pub columns: usize,
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully loaded data with {} rows and {} columns",
            self.rows, self.columns
        )
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a table from an optional reader.
///
/// * `None` input → `Ok(None)`: nothing uploaded yet, not an error.
/// * Well-formed CSV → the whole table and its summary.
/// * Anything else → `Err`; no partially filled table escapes.
pub fn load<R: Read>(input: Option<R>) -> Result<Option<(Table, LoadSummary)>, LoadError> {
    let Some(reader) = input else {
        return Ok(None);
    };
    let table = read_csv(reader)?;
    let summary = LoadSummary {
        rows: table.n_rows(),
        columns: table.n_cols(),
    };
    Ok(Some((table, summary)))
}

/// Load a table from a CSV file on disk.
pub fn load_file(path: &Path) -> Result<(Table, LoadSummary), LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load(Some(file))?.ok_or(LoadError::NoColumns)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Header row with column names, then rows of exactly the header's width.
/// Column types are inferred once all cells are read.
fn read_csv<R: Read>(input: R) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(input);

    let raw_headers = reader.headers()?.clone();
    if raw_headers.is_empty() {
        return Err(LoadError::NoColumns);
    }
    let headers = normalize_headers(raw_headers.iter());

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for result in reader.records() {
        let record = result?;
        for (col, value) in cells.iter_mut().zip(record.iter()) {
            col.push(value.to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| build_column(name, &raw))
        .collect();
    Ok(Table::new(columns))
}

/// Blank headers become `Unnamed: <i>`; repeats get a `.1`, `.2`, … suffix.
fn normalize_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    raw.enumerate()
        .map(|(i, h)| {
            let base = if h.trim().is_empty() {
                format!("Unnamed: {i}")
            } else {
                h.to_string()
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

fn build_column(name: String, raw: &[String]) -> Column {
    let dtype = infer_dtype(raw);
    let values = raw.iter().map(|s| parse_cell(s, dtype)).collect();
    Column {
        name,
        dtype,
        values,
    }
}

fn is_missing(raw: &str) -> bool {
    raw.is_empty() || NA_VALUES.contains(&raw)
}

/// Pick the narrowest type every present cell parses as.
fn infer_dtype(raw: &[String]) -> DType {
    let mut present = raw
        .iter()
        .filter(|s| !is_missing(s.as_str()))
        .map(|s| s.trim())
        .peekable();
    if present.peek().is_none() {
        return DType::Text;
    }
    let present: Vec<&str> = present.collect();

    if present.iter().all(|s| s.parse::<i64>().is_ok()) {
        DType::Integer
    } else if present.iter().all(|s| s.parse::<f64>().is_ok()) {
        DType::Float
    } else if present.iter().all(|s| parse_bool(s).is_some()) {
        DType::Bool
    } else if present.iter().all(|s| parse_timestamp(s).is_some()) {
        DType::Timestamp
    } else {
        DType::Text
    }
}

/// Missing markers become `Null`; other cells keep their text when the type does not parse.
fn parse_cell(raw: &str, dtype: DType) -> CellValue {
    if is_missing(raw) {
        return CellValue::Null;
    }
    let s = raw.trim();
    let parsed = match dtype {
        DType::Integer => s.parse().ok().map(CellValue::Integer),
        DType::Float => s.parse().ok().map(CellValue::Float),
        DType::Bool => parse_bool(s).map(CellValue::Bool),
        DType::Timestamp => parse_timestamp(s).map(CellValue::Timestamp),
        DType::Text => None,
    };
    parsed.unwrap_or_else(|| CellValue::Text(raw.to_string()))
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
