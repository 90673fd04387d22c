//! # Pipelines
//!
//! The two entry points of the engine. Both end in a [`TableSink`]; neither
//! knows which file format sits behind it.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use scansheet_common::columns::{self, SEVERITY};
use scansheet_common::config::Config;
use scansheet_common::error::{Error, Result};
use scansheet_common::model::Table;
use scansheet_common::tabular::{TableSink, TableSource};
use tracing::{debug, warn};

use crate::document;
use crate::extract::{self, ExtractSummary};
use crate::format;
use crate::merge::{self, Capability};
use crate::schema::ColumnUniverse;

#[derive(Debug, Clone)]
pub struct ConvertReport {
    pub extract: ExtractSummary,
    pub rows: usize,
    /// Severity cells that were not numeric and were ranked last.
    pub coerced: usize,
}

/// Converts the scan report at `input` into a severity-ordered table at `output`.
pub fn convert(
    input: &Path,
    output: &Path,
    sink: &dyn TableSink,
    cfg: &Config,
) -> Result<ConvertReport> {
    let document = document::load(input)?;

    let universe = ColumnUniverse::discover(&document);
    debug!(columns = universe.len(), "column universe discovered");

    let extraction = extract::extract(&document, &universe);
    drop(document);

    let columns = columns::report_columns(cfg.include_host);
    let formatted = format::format_report(extraction.table, &columns, SEVERITY)?;

    sink.write_table(&formatted.table, output)?;

    Ok(ConvertReport {
        extract: extraction.summary,
        rows: formatted.table.len(),
        coerced: formatted.warnings.len(),
    })
}

/// A merge input that could not be used.
#[derive(Debug)]
pub struct SkippedSource {
    pub path: PathBuf,
    pub error: Error,
}

#[derive(Debug)]
pub struct MergeReport {
    /// Sources that made it into the merge.
    pub sources: usize,
    pub skipped: Vec<SkippedSource>,
    pub rows: usize,
    pub duplicates: usize,
    pub coerced: usize,
    pub dedup: Capability,
    pub severity: Capability,
}

/// Reads every source, in parallel, keeping the order of `paths`.
///
/// Sources that fail to load are logged and returned separately; they never
/// abort the batch.
pub fn load_sources(
    paths: &[PathBuf],
    source: &dyn TableSource,
) -> (Vec<Table>, Vec<SkippedSource>) {
    let loaded: Vec<(&PathBuf, Result<Table>)> = paths
        .par_iter()
        .map(|path| (path, source.read_table(path)))
        .collect();

    let mut tables = Vec::with_capacity(loaded.len());
    let mut skipped = Vec::new();
    for (path, result) in loaded {
        match result {
            Ok(table) => {
                debug!(path = %path.display(), rows = table.len(), "source loaded");
                tables.push(table);
            }
            Err(error) => {
                warn!("{error}; skipping it");
                skipped.push(SkippedSource {
                    path: path.clone(),
                    error,
                });
            }
        }
    }
    (tables, skipped)
}

/// Merges the tables at `inputs` into one deduplicated table at `output`.
///
/// Only a failure to write `output` is fatal.
pub fn merge(
    inputs: &[PathBuf],
    output: &Path,
    source: &dyn TableSource,
    sink: &dyn TableSink,
) -> Result<MergeReport> {
    let (tables, skipped) = load_sources(inputs, source);
    let sources = tables.len();

    let outcome = merge::merge(tables);
    sink.write_table(&outcome.table, output)?;

    Ok(MergeReport {
        sources,
        skipped,
        rows: outcome.table.len(),
        duplicates: outcome.duplicates,
        coerced: outcome.warnings.len(),
        dedup: outcome.dedup,
        severity: outcome.severity,
    })
}
