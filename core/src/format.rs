//! The **table formatter**.
//!
//! Narrows extracted records to the fixed report columns and orders them by
//! severity.

use scansheet_common::error::{Error, Result};
use scansheet_common::model::{Record, Table};
use tracing::{debug, warn};

use crate::severity::{self, CoercionWarning};

#[derive(Debug, Clone)]
pub struct Formatted {
    pub table: Table,
    pub warnings: Vec<CoercionWarning>,
}

/// Projects `table` onto `columns` and sorts it by `severity`, highest first.
///
/// Fails when `severity` is not among the requested columns or no record
/// carries it at all; both mean the source is not a scan report this tool
/// understands.
pub fn format_report(table: Table, columns: &[String], severity: &str) -> Result<Formatted> {
    let carried = table.has_column(severity) && table.rows().iter().any(|r| r.contains(severity));
    if !carried || !columns.iter().any(|c| c == severity) {
        return Err(Error::SchemaProjection {
            column: severity.to_string(),
        });
    }

    let mut table = project(table, columns);
    let warnings = severity::coercion_warnings(table.rows(), severity);
    for warning in &warnings {
        debug!(row = warning.row, value = %warning.value, "non-numeric severity");
    }
    if !warnings.is_empty() {
        warn!(
            "{} {severity} values are not numeric and were ranked last",
            warnings.len()
        );
    }

    severity::sort_descending(table.rows_mut(), severity);
    Ok(Formatted { table, warnings })
}

/// Keeps exactly `columns`, in that order. Absent cells become null.
pub fn project(table: Table, columns: &[String]) -> Table {
    let rows = table
        .into_rows()
        .into_iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| (column.clone(), record.get(column).clone()))
                .collect::<Record>()
        })
        .collect();
    Table::with_rows(columns.to_vec(), rows)
}
