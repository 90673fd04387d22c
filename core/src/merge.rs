//! The **multi-source merger**.
//!
//! Stacks tables produced by earlier runs, drops repeated findings and ranks
//! the result by severity. Missing columns switch individual steps off instead
//! of failing the merge.

use std::collections::HashSet;

use scansheet_common::columns::{HOST, SEVERITY, VULN_ID};
use scansheet_common::model::{Record, Table, Value};
use tracing::{debug, info, warn};

use crate::severity::{self, CoercionWarning};

/// How far a merge step can run given the columns at hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Supported,
    /// The step is possible only in part, or not at all, because some of the
    /// data it needs is missing or unusable.
    Degraded,
    Absent,
}

impl Capability {
    /// Whether the step runs at all.
    pub fn is_usable(self, partial_ok: bool) -> bool {
        match self {
            Capability::Supported => true,
            Capability::Degraded => partial_ok,
            Capability::Absent => false,
        }
    }
}

/// Deduplication needs both halves of the identity key.
pub fn dedup_capability(table: &Table) -> Capability {
    match (table.has_column(VULN_ID), table.has_column(HOST)) {
        (true, true) => Capability::Supported,
        (false, false) => Capability::Absent,
        _ => Capability::Degraded,
    }
}

/// Sorting needs the severity column; non-numeric cells degrade it.
pub fn severity_capability(table: &Table) -> Capability {
    if !table.has_column(SEVERITY) {
        return Capability::Absent;
    }
    if severity::coercion_warnings(table.rows(), SEVERITY).is_empty() {
        Capability::Supported
    } else {
        Capability::Degraded
    }
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub table: Table,
    /// Rows dropped because an earlier row had the same identity key.
    pub duplicates: usize,
    pub warnings: Vec<CoercionWarning>,
    pub dedup: Capability,
    pub severity: Capability,
}

/// Merges `tables` in iteration order.
///
/// The first row seen for an identity key wins, so the order of `tables`
/// decides which duplicate survives.
pub fn merge<I>(tables: I) -> MergeOutcome
where
    I: IntoIterator<Item = Table>,
{
    let mut table = Table::concat(tables);
    debug!(rows = table.len(), columns = table.columns().len(), "sources stacked");

    let dedup = dedup_capability(&table);
    let duplicates = if dedup.is_usable(false) {
        deduplicate(table.rows_mut())
    } else {
        info!("'{VULN_ID}' and '{HOST}' are not both present, keeping duplicate rows");
        0
    };

    let severity = severity_capability(&table);
    let warnings = if severity.is_usable(true) {
        let warnings = severity::coerce_column(table.rows_mut(), SEVERITY);
        if !warnings.is_empty() {
            warn!(
                "{} {SEVERITY} values are not numeric and were cleared",
                warnings.len()
            );
        }
        severity::sort_descending(table.rows_mut(), SEVERITY);
        warnings
    } else {
        info!("'{SEVERITY}' is not present, keeping source order");
        Vec::new()
    };

    MergeOutcome {
        table,
        duplicates,
        warnings,
        dedup,
        severity,
    }
}

/// Identity key of a row. Two empty cells count as equal.
fn identity(record: &Record) -> (Option<String>, Option<String>) {
    let key = |value: &Value| (!value.is_null()).then(|| value.to_string());
    (key(record.get(VULN_ID)), key(record.get(HOST)))
}

fn deduplicate(rows: &mut Vec<Record>) -> usize {
    let before = rows.len();
    let mut seen = HashSet::new();
    rows.retain(|record| seen.insert(identity(record)));

    let removed = before - rows.len();
    debug!(removed, "duplicate findings dropped");
    removed
}
