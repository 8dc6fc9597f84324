use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::classify::{Classification, classify_column, sorted_options};
use super::model::{CellValue, Column, Table};

// ---------------------------------------------------------------------------
// Filter controls: one per column, chosen by classification
// ---------------------------------------------------------------------------

/// The predicate state behind one column's filter widget.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    /// Multi-select. An empty selection means "no filter".
    Categorical {
        options: Vec<CellValue>,
        selected: BTreeSet<CellValue>,
    },
    /// Inclusive calendar-date range inside the observed `bounds`.
    Temporal {
        bounds: (NaiveDate, NaiveDate),
        range: (NaiveDate, NaiveDate),
    },
    /// Inclusive numeric range inside the observed `bounds`.
    Continuous {
        bounds: (f64, f64),
        range: (f64, f64),
        step: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnControl {
    pub column: String,
    pub kind: ControlKind,
}

/// Controls for every column of the table, in column order.
pub type FilterState = Vec<ColumnControl>;

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("filter refers to column '{0}' which is not in the table")]
    UnknownColumn(String),
}

impl ColumnControl {
    /// Build the default (pass-through) control for a column.
    pub fn for_column(column: &Column) -> Self {
        let kind = match classify_column(column) {
            Classification::Temporal => temporal_bounds(column)
                .map(|bounds| ControlKind::Temporal {
                    bounds,
                    range: bounds,
                }),
            Classification::Continuous => numeric_bounds(column).map(|bounds| {
                ControlKind::Continuous {
                    bounds,
                    range: bounds,
                    step: (bounds.1 - bounds.0) / 100.0,
                }
            }),
            Classification::Categorical => None,
        }
        .unwrap_or_else(|| ControlKind::Categorical {
            options: sorted_options(column),
            selected: BTreeSet::new(),
        });

        ColumnControl {
            column: column.name.clone(),
            kind,
        }
    }

    /// Whether this control currently restricts any rows.
    pub fn is_active(&self) -> bool {
        match &self.kind {
            ControlKind::Categorical { selected, .. } => !selected.is_empty(),
            ControlKind::Temporal { bounds, range } => range != bounds,
            ControlKind::Continuous { bounds, range, .. } => range != bounds,
        }
    }

    /// Does a cell pass this control?
    ///
    /// A range at its full default extent passes everything, nulls included.
    /// A narrowed range rejects nulls.
    pub fn matches(&self, value: &CellValue) -> bool {
        if !self.is_active() {
            return true;
        }
        match &self.kind {
            ControlKind::Categorical { selected, .. } => selected.contains(value),
            ControlKind::Temporal { range, .. } => value
                .as_date()
                .is_some_and(|d| range.0 <= d && d <= range.1),
            ControlKind::Continuous { range, .. } => value
                .as_f64()
                .is_some_and(|v| range.0 <= v && v <= range.1),
        }
    }

    /// Return the control to its pass-through default.
    pub fn reset(&mut self) {
        match &mut self.kind {
            ControlKind::Categorical { selected, .. } => selected.clear(),
            ControlKind::Temporal { bounds, range } => *range = *bounds,
            ControlKind::Continuous { bounds, range, .. } => *range = *bounds,
        }
    }

    /// Set a date range, clamped into the bounds and reordered so start <= end.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        if let ControlKind::Temporal { bounds, range } = &mut self.kind {
            let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
            *range = (lo.clamp(bounds.0, bounds.1), hi.clamp(bounds.0, bounds.1));
        }
    }

    /// Set a numeric range, clamped into the bounds and reordered so low <= high.
    ///
    /// Slider stepping can leave an endpoint a few ULPs short of a bound; anything
    /// within half a step of a bound lands exactly on it.
    pub fn set_numeric_range(&mut self, low: f64, high: f64) {
        if let ControlKind::Continuous {
            bounds,
            range,
            step,
        } = &mut self.kind
        {
            let (lo, hi) = if low <= high { (low, high) } else { (high, low) };
            let snap = |v: f64| {
                let v = v.clamp(bounds.0, bounds.1);
                if (v - bounds.0).abs() <= *step / 2.0 {
                    bounds.0
                } else if (bounds.1 - v).abs() <= *step / 2.0 {
                    bounds.1
                } else {
                    v
                }
            };
            *range = (snap(lo), snap(hi));
        }
    }
}

fn temporal_bounds(column: &Column) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = column.values.iter().filter_map(CellValue::as_date);
    let first = dates.next()?;
    Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}

fn numeric_bounds(column: &Column) -> Option<(f64, f64)> {
    let mut nums = column
        .values
        .iter()
        .filter_map(CellValue::as_f64)
        .filter(|v| !v.is_nan());
    let first = nums.next()?;
    Some(nums.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Initialise a [`FilterState`] with every control at its pass-through default.
pub fn init_filter_state(table: &Table) -> FilterState {
    table.columns.iter().map(ColumnControl::for_column).collect()
}

/// Row indices passing the combined (AND) predicate of all controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub visible: Vec<usize>,
    pub total: usize,
}

impl FilterOutcome {
    /// Informational line, present only when some rows were filtered out.
    pub fn summary(&self) -> Option<String> {
        (self.visible.len() < self.total).then(|| {
            format!(
                "Filtered data: {} rows (from {} total)",
                self.visible.len(),
                self.total
            )
        })
    }
}

/// Apply every control to the table.
///
/// An absent or empty table performs no filtering and yields `Ok(None)`.
pub fn apply_filters(
    table: Option<&Table>,
    filters: &FilterState,
) -> Result<Option<FilterOutcome>, FilterError> {
    let Some(table) = table.filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    let active: Vec<(&Column, &ColumnControl)> = filters
        .iter()
        .filter(|c| c.is_active())
        .map(|c| {
            table
                .column(&c.column)
                .map(|col| (col, c))
                .ok_or_else(|| FilterError::UnknownColumn(c.column.clone()))
        })
        .collect::<Result<_, _>>()?;

    let visible = (0..table.n_rows())
        .filter(|&row| {
            active
                .iter()
                .all(|(col, control)| control.matches(&col.values[row]))
        })
        .collect();

    Ok(Some(FilterOutcome {
        visible,
        total: table.n_rows(),
    }))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::data::model::DType;

    fn year_table() -> Table {
        Table::new(vec![
            Column {
                name: "Year".into(),
                dtype: DType::Integer,
                values: [2019, 2019, 2020, 2021, 2021, 2021]
                    .into_iter()
                    .map(CellValue::Integer)
                    .collect(),
            },
            Column {
                name: "Make".into(),
                dtype: DType::Text,
                values: ["Ford", "Audi", "Ford", "Audi", "Ford", "Kia"]
                    .into_iter()
                    .map(|s| CellValue::Text(s.into()))
                    .collect(),
            },
        ])
    }

    fn price_table() -> Table {
        let mut values: Vec<CellValue> = (0..30).map(|i| CellValue::Float(i as f64 * 1.5)).collect();
        values.push(CellValue::Null);
        Table::new(vec![Column {
            name: "Price".into(),
            dtype: DType::Float,
            values,
        }])
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn select(filters: &mut FilterState, column: &str, values: &[CellValue]) {
        let control = filters.iter_mut().find(|c| c.column == column).unwrap();
        match &mut control.kind {
            ControlKind::Categorical { selected, .. } => selected.extend(values.iter().cloned()),
            other => panic!("expected categorical control, got {other:?}"),
        }
    }

    #[test]
    fn selecting_a_year_keeps_matching_rows() {
        let table = year_table();
        let mut filters = init_filter_state(&table);
        select(&mut filters, "Year", &[CellValue::Integer(2021)]);

        let outcome = apply_filters(Some(&table), &filters).unwrap().unwrap();
        assert_eq!(outcome.visible, vec![3, 4, 5]);
        assert_eq!(
            outcome.summary().as_deref(),
            Some("Filtered data: 3 rows (from 6 total)")
        );
    }

    #[test]
    fn empty_selection_is_pass_through() {
        let table = year_table();
        let filters = init_filter_state(&table);
        let outcome = apply_filters(Some(&table), &filters).unwrap().unwrap();
        assert_eq!(outcome.visible.len(), table.n_rows());
        assert_eq!(outcome.summary(), None);
    }

    #[test]
    fn controls_combine_with_and() {
        let table = year_table();
        let mut filters = init_filter_state(&table);
        select(&mut filters, "Year", &[CellValue::Integer(2021)]);
        select(&mut filters, "Make", &[CellValue::Text("Ford".into())]);
        let outcome = apply_filters(Some(&table), &filters).unwrap().unwrap();
        assert_eq!(outcome.visible, vec![4]);
    }

    #[test]
    fn continuous_control_defaults_to_observed_extent() {
        let table = price_table();
        let filters = init_filter_state(&table);
        match &filters[0].kind {
            ControlKind::Continuous {
                bounds,
                range,
                step,
            } => {
                assert_eq!(*bounds, (0.0, 43.5));
                assert_eq!(range, bounds);
                assert!((step - 0.435).abs() < 1e-12);
            }
            other => panic!("expected continuous control, got {other:?}"),
        }
        let outcome = apply_filters(Some(&table), &filters).unwrap().unwrap();
        assert_eq!(outcome.visible.len(), table.n_rows());
    }

    #[test]
    fn narrowed_range_is_inclusive_and_drops_nulls() {
        let table = price_table();
        let mut filters = init_filter_state(&table);
        filters[0].set_numeric_range(4.5, 1.5);
        let outcome = apply_filters(Some(&table), &filters).unwrap().unwrap();
        assert_eq!(outcome.visible, vec![1, 2, 3]);
    }

    #[test]
    fn temporal_range_is_inclusive_by_date() {
        let stamps = [date(2021, 1, 1), date(2021, 2, 1), date(2021, 3, 1)];
        let table = Table::new(vec![Column {
            name: "Date".into(),
            dtype: DType::Timestamp,
            values: stamps
                .iter()
                .map(|d| CellValue::Timestamp(d.and_time(NaiveTime::MIN)))
                .chain([CellValue::Timestamp(
                    date(2021, 3, 1).and_hms_opt(18, 0, 0).unwrap(),
                )])
                .collect(),
        }]);
        let mut filters = init_filter_state(&table);
        assert_eq!(
            filters[0].kind,
            ControlKind::Temporal {
                bounds: (date(2021, 1, 1), date(2021, 3, 1)),
                range: (date(2021, 1, 1), date(2021, 3, 1)),
            }
        );

        filters[0].set_date_range(date(2021, 2, 1), date(2021, 3, 1));
        let outcome = apply_filters(Some(&table), &filters).unwrap().unwrap();
        assert_eq!(outcome.visible, vec![1, 2, 3]);

        filters[0].reset();
        assert!(!filters[0].is_active());
    }

    #[test]
    fn slider_end_positions_snap_onto_bounds() {
        let mut values: Vec<CellValue> = (0..24)
            .map(|i| CellValue::Float(15168.43 + i as f64 * 1000.0))
            .collect();
        values.push(CellValue::Float(44547.87));
        values.push(CellValue::Null);
        let table = Table::new(vec![Column {
            name: "Price".into(),
            dtype: DType::Float,
            values,
        }]);
        let mut filters = init_filter_state(&table);
        let (min, max, step) = match filters[0].kind {
            ControlKind::Continuous { bounds, step, .. } => (bounds.0, bounds.1, step),
            ref other => panic!("expected continuous control, got {other:?}"),
        };

        // Where a stepped slider lands when dragged to either end.
        let stepped = |v: f64| min + ((v - min) / step).round() * step;
        filters[0].set_numeric_range(stepped(min), stepped(max) - 1e-9);
        assert_eq!(
            filters[0].kind,
            ControlKind::Continuous {
                bounds: (min, max),
                range: (min, max),
                step,
            }
        );
        assert!(!filters[0].is_active());

        filters[0].set_numeric_range(min + 2.0 * step, stepped(max) - 1e-9);
        let outcome = apply_filters(Some(&table), &filters).unwrap().unwrap();
        assert!(outcome.visible.contains(&24));
        assert!(!outcome.visible.contains(&25));
    }

    #[test]
    fn set_range_clamps_into_bounds() {
        let table = price_table();
        let mut filters = init_filter_state(&table);
        filters[0].set_numeric_range(-10.0, 1000.0);
        assert!(!filters[0].is_active());
    }

    #[test]
    fn absent_or_empty_table_is_not_filtered() {
        assert_eq!(apply_filters(None, &Vec::new()).unwrap(), None);
        let empty = Table::new(vec![Column {
            name: "a".into(),
            dtype: DType::Text,
            values: Vec::new(),
        }]);
        let filters = init_filter_state(&empty);
        assert_eq!(apply_filters(Some(&empty), &filters).unwrap(), None);
    }

    #[test]
    fn stale_control_is_reported() {
        let table = year_table();
        let mut filters = init_filter_state(&table);
        filters.push(ColumnControl {
            column: "Dealership".into(),
            kind: ControlKind::Categorical {
                options: vec![CellValue::Text("North".into())],
                selected: [CellValue::Text("North".into())].into_iter().collect(),
            },
        });
        let err = apply_filters(Some(&table), &filters).unwrap_err();
        assert!(matches!(err, FilterError::UnknownColumn(c) if c == "Dealership"));
    }
}
