use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::model::{CellValue, Column, DType};

/// Numeric columns with fewer distinct values than this are filtered as categories.
pub const CATEGORICAL_THRESHOLD: usize = 20;

/// Which filter control a column gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Categorical,
    Temporal,
    Continuous,
}

/// Classify from declared type and non-null cardinality.
///
/// Every `(dtype, distinct)` pair maps to exactly one classification.
pub fn classify(dtype: DType, distinct: usize) -> Classification {
    if dtype.is_temporal() {
        Classification::Temporal
    } else if !dtype.is_numeric() || distinct < CATEGORICAL_THRESHOLD {
        Classification::Categorical
    } else {
        Classification::Continuous
    }
}

pub fn classify_column(column: &Column) -> Classification {
    classify(column.dtype, column.distinct_count())
}

// ---------------------------------------------------------------------------
// Option ordering for categorical controls
// ---------------------------------------------------------------------------

/// How the options of a categorical control are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOrdering {
    /// Every option is of one variant, so the values' own order applies.
    Native,
    /// Mixed variants: order by display text.
    Lexical,
}

impl ValueOrdering {
    pub fn for_values<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> Self {
        let mut iter = values.into_iter();
        let Some(first) = iter.next() else {
            return ValueOrdering::Native;
        };
        if iter.all(|v| v.same_kind(first)) {
            ValueOrdering::Native
        } else {
            ValueOrdering::Lexical
        }
    }

    pub fn compare(self, a: &CellValue, b: &CellValue) -> Ordering {
        match self {
            ValueOrdering::Native => a.cmp(b),
            ValueOrdering::Lexical => a.to_string().cmp(&b.to_string()),
        }
    }
}

/// Distinct values of a column in control order, with `<null>` last when present.
///
/// The comparator is chosen from the non-null values only.
pub fn sorted_options(column: &Column) -> Vec<CellValue> {
    let distinct: BTreeSet<&CellValue> = column.values.iter().filter(|v| !v.is_null()).collect();
    let ordering = ValueOrdering::for_values(distinct.iter().copied());
    let mut options: Vec<CellValue> = distinct.into_iter().cloned().collect();
    if ordering == ValueOrdering::Lexical {
        options.sort_by(|a, b| ordering.compare(a, b));
    }
    if column.values.iter().any(CellValue::is_null) {
        options.push(CellValue::Null);
    }
    options
}
