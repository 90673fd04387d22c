//! Severity ordering shared by the formatter and the merger.
//!
//! Rows are ranked by the numeric reading of one column, highest first.
//! Rows without a numeric severity rank below every scored row and keep their
//! relative order.

use std::cmp::Ordering;

use scansheet_common::model::{Record, Value};

/// A severity cell that could not be read as a number.
///
/// The row is kept and ranked last; this is never fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercionWarning {
    /// Position of the row before sorting.
    pub row: usize,
    pub value: String,
}

/// Non-blank cells of `column` that do not parse as numbers.
pub fn coercion_warnings(rows: &[Record], column: &str) -> Vec<CoercionWarning> {
    rows.iter()
        .enumerate()
        .filter_map(|(row, record)| {
            let value = record.get(column);
            if value.is_blank() || value.as_number().is_some() {
                return None;
            }
            Some(CoercionWarning {
                row,
                value: value.to_string(),
            })
        })
        .collect()
}

/// Rewrites every cell of `column` as a number, or null when it is not one.
pub fn coerce_column(rows: &mut [Record], column: &str) -> Vec<CoercionWarning> {
    let warnings = coercion_warnings(rows, column);
    for record in rows.iter_mut() {
        let number = record.get(column).as_number();
        record.set(column, Value::from(number));
    }
    warnings
}

/// Stable descending sort on the numeric reading of `column`, unscored rows last.
pub fn sort_descending(rows: &mut Vec<Record>, column: &str) {
    let mut keyed: Vec<(Option<f64>, Record)> = rows
        .drain(..)
        .map(|record| (record.get(column).as_number(), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| rank(*a, *b));
    rows.extend(keyed.into_iter().map(|(_, record)| record));
}

fn rank(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
