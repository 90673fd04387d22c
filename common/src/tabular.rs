//! Boundaries between the engine and the files it reads or produces.
//!
//! The pipelines only ever talk to these traits; concrete formats live in the
//! `scansheet-formats` crate.

use std::path::Path;

use crate::error::Result;
use crate::model::Table;

/// Something that can load a previously produced table.
///
/// Implementations must be shareable across threads, the merge pipeline
/// reads its sources in parallel.
pub trait TableSource: Send + Sync {
    fn read_table(&self, path: &Path) -> Result<Table>;
}

/// Something that can persist a table.
pub trait TableSink {
    /// Writes one header row followed by one row per record.
    ///
    /// Either the whole table becomes visible at `path` or nothing does.
    fn write_table(&self, table: &Table, path: &Path) -> Result<()>;
}
