use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

// ---------------------------------------------------------------------------
// CellValue – a single cell in a column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a CSV column can be inferred as.
/// Selections live in `BTreeSet`s downstream, so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Timestamp(NaiveDateTime),
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use CellValue::*;
        let (da, db) = (self.kind_rank(), other.kind_rank());
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (Timestamp(a), Timestamp(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Timestamp(t) => t.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "<null>"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Timestamp(t) if t.time() == NaiveTime::MIN => {
                write!(f, "{}", t.date())
            }
            CellValue::Timestamp(t) => write!(f, "{t}"),
        }
    }
}

impl CellValue {
    /// Rank of the variant; values of different variants order by this first.
    fn kind_rank(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Bool(_) => 1,
            CellValue::Integer(_) => 2,
            CellValue::Float(_) => 3,
            CellValue::Text(_) => 4,
            CellValue::Timestamp(_) => 5,
        }
    }

    /// Whether two values are of the same variant, i.e. natively comparable.
    pub fn same_kind(&self, other: &CellValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Null, or a float NaN; neither counts as an observed value.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Interpret the value as an `f64` for range filtering.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Calendar date of a timestamp cell.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Timestamp(t) => Some(t.date()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// DType – the declared type of a whole column
// ---------------------------------------------------------------------------

/// Column type inferred at load time from the column's non-empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    Integer,
    Float,
    Bool,
    Timestamp,
    Text,
}

impl DType {
    pub fn is_numeric(self) -> bool {
        matches!(self, DType::Integer | DType::Float | DType::Bool)
    }

    pub fn is_temporal(self) -> bool {
        self == DType::Timestamp
    }

    /// Name used in the `df.info()`-style dataset description.
    pub fn info_name(self) -> &'static str {
        match self {
            DType::Integer => "int64",
            DType::Float => "float64",
            DType::Bool => "bool",
            DType::Timestamp => "datetime64[ns]",
            DType::Text => "object",
        }
    }
}

// ---------------------------------------------------------------------------
// Column / Table
// ---------------------------------------------------------------------------

/// One named, homogeneously typed column.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub dtype: DType,
    pub values: Vec<CellValue>,
}

impl Column {
    /// Number of distinct non-missing values (the cardinality used for classification).
    pub fn distinct_count(&self) -> usize {
        self.values
            .iter()
            .filter(|v| !v.is_missing())
            .collect::<std::collections::BTreeSet<_>>()
            .len()
    }

    pub fn non_null_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_missing()).count()
    }
}

/// The loaded dataset. Immutable once built; filtering only derives row indices.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table from columns that all have the same length.
    pub fn new(columns: Vec<Column>) -> Self {
        let n_rows = columns.first().map_or(0, |c| c.values.len());
        debug_assert!(columns.iter().all(|c| c.values.len() == n_rows));
        Table { columns, n_rows }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0 || self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Text description in the shape of pandas' `df.info()`, meant to be pasted into a prompt.
    pub fn info(&self) -> String {
        let n = self.n_rows;
        let mut out = String::new();
        if n == 0 {
            out.push_str("RangeIndex: 0 entries\n");
        } else {
            out.push_str(&format!("RangeIndex: {n} entries, 0 to {}\n", n - 1));
        }
        out.push_str(&format!("Data columns (total {} columns):\n", self.n_cols()));

        let name_width = self
            .columns
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Column".len());
        out.push_str(&format!(
            " #   {:<name_width$}  Non-Null Count  Dtype\n",
            "Column"
        ));
        out.push_str(&format!(
            "---  {:<name_width$}  --------------  -----\n",
            "------"
        ));
        for (i, col) in self.columns.iter().enumerate() {
            let non_null = format!("{} non-null", col.non_null_count());
            out.push_str(&format!(
                " {i:<3} {:<name_width$}  {non_null:<14}  {}\n",
                col.name,
                col.dtype.info_name()
            ));
        }
        out
    }
}
