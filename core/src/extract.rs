//! The **record extractor**.
//!
//! Second extraction pass. Every host contributes a base record holding the
//! first value of each discovered field, then every finding anchor below the
//! host yields one record: the base overlaid with the anchor's sibling fields.

use std::collections::HashSet;

use scansheet_common::columns::{FINDING_ANCHOR, HOST, HOST_NAME_ATTR, UNKNOWN_HOST};
use scansheet_common::model::{Record, Table, Value};
use tracing::debug;

use crate::document::{Document, Node};
use crate::schema::ColumnUniverse;

/// Counters describing one extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub hosts: usize,
    /// Hosts that carried no finding anchor and therefore produced no record.
    pub hosts_without_findings: usize,
    pub records: usize,
    pub columns: usize,
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub table: Table,
    pub summary: ExtractSummary,
}

/// Flattens every finding of `document` into one record.
///
/// The table's columns are [`HOST`] followed by `universe` in ascending order.
pub fn extract(document: &Document, universe: &ColumnUniverse) -> Extraction {
    let columns: Vec<String> = std::iter::once(HOST)
        .chain(universe.iter().filter(|name| *name != HOST))
        .map(String::from)
        .collect();

    let mut table = Table::new(columns);
    let mut summary = ExtractSummary {
        columns: table.columns().len(),
        ..ExtractSummary::default()
    };

    for host in document.hosts() {
        summary.hosts += 1;

        let mut scopes = Vec::new();
        finding_scopes(host, &mut scopes);
        if scopes.is_empty() {
            summary.hosts_without_findings += 1;
            debug!(host = host_name(host), "host has no scored findings");
            continue;
        }

        let base = host_record(host, universe);
        for scope in scopes {
            table.push(overlay(&base, scope));
        }
    }

    summary.records = table.len();
    debug!(?summary, "records extracted");
    Extraction { table, summary }
}

fn host_name(host: &Node) -> &str {
    host.attr(HOST_NAME_ATTR).unwrap_or(UNKNOWN_HOST)
}

/// Base record of a host: the first value of every field below it.
///
/// Later occurrences of a tag are ignored here; only finding overlays can
/// replace a base value.
fn host_record(host: &Node, universe: &ColumnUniverse) -> Record {
    let mut record: Record = universe.iter().map(|name| (name, Value::Null)).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    for node in host.descendants() {
        if seen.insert(node.tag.as_str()) {
            record.set(node.tag.as_str(), node.text());
        }
    }

    record.set(HOST, host_name(host));
    record
}

/// Collects the parent of every anchor below `node`, in document order.
///
/// A scope holding several anchors is listed once per anchor.
fn finding_scopes<'a>(node: &'a Node, scopes: &mut Vec<&'a Node>) {
    for child in &node.children {
        if child.tag == FINDING_ANCHOR {
            scopes.push(node);
        }
        finding_scopes(child, scopes);
    }
}

/// Copies `base` and overwrites it with the direct children of `scope`.
fn overlay(base: &Record, scope: &Node) -> Record {
    let mut record = base.clone();
    for field in &scope.children {
        record.set(field.tag.as_str(), field.text());
    }
    record
}
