#![cfg(test)]
use scansheet_common::columns::{HOST, SEVERITY, VULN_ID};
use scansheet_common::model::Value;
use scansheet_common::tabular::TableSource;
use scansheet_core::merge::Capability;
use scansheet_core::pipeline;
use scansheet_formats::FileTables;
use tempfile::tempdir;

use crate::support::{column, write_table};

const COLUMNS: [&str; 3] = [VULN_ID, HOST, SEVERITY];

#[test]
fn merge_drops_duplicates_across_files() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let a = dir.path().join("a.xlsx");
    let b = dir.path().join("b.csv");
    write_table(&a, &COLUMNS, &[&["CVE-1", "Host1", "5"]]);
    write_table(&b, &COLUMNS, &[&["CVE-1", "Host1", "9"], &["CVE-2", "Host2", "7"]]);
    let output = dir.path().join("merged.xlsx");

    let tables = FileTables::striped();
    let report = pipeline::merge(&[a, b], &output, &tables, &tables)?;

    assert_eq!(report.sources, 2);
    assert_eq!(report.rows, 2);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.dedup, Capability::Supported);

    let merged = tables.read_table(&output)?;
    assert_eq!(column(&merged, VULN_ID), ["CVE-2", "CVE-1"]);
    assert_eq!(merged.rows()[0].get(SEVERITY), &Value::Number(7.0));
    assert_eq!(merged.rows()[1].get(SEVERITY), &Value::Number(5.0));
    Ok(())
}

#[test]
fn missing_sources_are_skipped() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let a = dir.path().join("a.csv");
    write_table(&a, &COLUMNS, &[&["CVE-1", "h", "3"]]);
    let output = dir.path().join("merged.csv");

    let tables = FileTables::new();
    let report = pipeline::merge(
        &[dir.path().join("ghost.xlsx"), a],
        &output,
        &tables,
        &tables,
    )?;

    assert_eq!(report.sources, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.rows, 1);
    assert!(output.exists());
    Ok(())
}

#[test]
fn unscored_rows_sort_last() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let a = dir.path().join("a.csv");
    write_table(
        &a,
        &COLUMNS,
        &[&["CVE-1", "h", "N/A"], &["CVE-2", "h", "4.3"], &["CVE-3", "h", "8.1"]],
    );
    let output = dir.path().join("merged.csv");

    let tables = FileTables::new();
    let report = pipeline::merge(&[a], &output, &tables, &tables)?;

    assert_eq!(report.coerced, 1);
    assert_eq!(report.severity, Capability::Degraded);

    let merged = tables.read_table(&output)?;
    assert_eq!(column(&merged, VULN_ID), ["CVE-3", "CVE-2", "CVE-1"]);
    assert_eq!(column(&merged, SEVERITY), ["8.1", "4.3", ""]);
    Ok(())
}

#[test]
fn merging_output_again_changes_nothing() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let a = dir.path().join("a.csv");
    write_table(
        &a,
        &COLUMNS,
        &[&["CVE-1", "h", "2"], &["CVE-2", "h", "6"], &["CVE-2", "h", "6"]],
    );
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    let tables = FileTables::new();
    pipeline::merge(&[a], &first, &tables, &tables)?;
    let again = pipeline::merge(&[first.clone(), first.clone()], &second, &tables, &tables)?;

    assert_eq!(again.duplicates, 2);
    assert_eq!(tables.read_table(&first)?, tables.read_table(&second)?);
    Ok(())
}

#[test]
fn tables_without_known_columns_are_stacked() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let a = dir.path().join("a.csv");
    let b = dir.path().join("b.csv");
    write_table(&a, &["port"], &[&["22"]]);
    write_table(&b, &["service"], &[&["ssh"]]);
    let output = dir.path().join("merged.csv");

    let tables = FileTables::new();
    let report = pipeline::merge(&[a, b], &output, &tables, &tables)?;

    assert_eq!(report.dedup, Capability::Absent);
    assert_eq!(report.severity, Capability::Absent);

    let merged = tables.read_table(&output)?;
    assert_eq!(merged.columns(), ["port", "service"]);
    assert_eq!(column(&merged, "service"), ["", "ssh"]);
    Ok(())
}
