#![cfg(test)]
use scansheet_common::columns::{self, HOST, SEVERITY, VULN_ID};
use scansheet_common::config::Config;
use scansheet_common::error::Error;
use scansheet_common::tabular::TableSource;
use scansheet_core::pipeline;
use scansheet_formats::FileTables;
use tempfile::tempdir;

use crate::support::{column, write_file, REPORT};

#[test]
fn convert_ranks_findings_by_severity() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let input = write_file(dir.path(), "scan.nessus", REPORT);
    let output = dir.path().join("report.xlsx");

    let report = pipeline::convert(&input, &output, &FileTables::striped(), &Config::default())?;

    assert_eq!(report.rows, 2);
    assert_eq!(report.extract.hosts, 1);
    assert_eq!(report.coerced, 0);

    let table = FileTables::new().read_table(&output)?;
    assert_eq!(table.columns(), columns::report_columns(false).as_slice());
    assert_eq!(column(&table, SEVERITY), ["9.8", "7.5"]);
    assert_eq!(column(&table, VULN_ID), ["CVE-2023-0002", "CVE-2023-0001"]);
    assert_eq!(column(&table, "risk_factor"), ["Critical", "High"]);
    Ok(())
}

#[test]
fn convert_can_keep_the_host_column() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let input = write_file(dir.path(), "scan.nessus", REPORT);
    let output = dir.path().join("report.csv");
    let cfg = Config {
        include_host: true,
        ..Config::default()
    };

    pipeline::convert(&input, &output, &FileTables::new(), &cfg)?;

    let table = FileTables::new().read_table(&output)?;
    assert_eq!(table.columns()[0], HOST);
    assert_eq!(column(&table, HOST), ["10.0.0.5", "10.0.0.5"]);
    Ok(())
}

#[test]
fn malformed_report_is_a_parse_error_and_writes_nothing() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let input = write_file(dir.path(), "broken.nessus", "<NessusClientData_v2><Report>");
    let output = dir.path().join("report.xlsx");

    let err = pipeline::convert(&input, &output, &FileTables::new(), &Config::default())
        .unwrap_err();

    assert!(matches!(err, Error::DocumentParse { .. }), "{err:?}");
    assert!(!output.exists());
    Ok(())
}

#[test]
fn report_without_cvss3_cannot_be_projected() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let input = write_file(
        dir.path(),
        "old.nessus",
        "<r><ReportHost name='h'><ReportItem><cvss_base_score>4.0</cvss_base_score>\
         <cve>CVE-1</cve></ReportItem></ReportHost></r>",
    );
    let output = dir.path().join("report.csv");

    let err = pipeline::convert(&input, &output, &FileTables::new(), &Config::default())
        .unwrap_err();

    assert!(matches!(err, Error::SchemaProjection { ref column } if column == SEVERITY));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn missing_report_is_source_not_found() {
    let dir = tempdir().unwrap();
    let err = pipeline::convert(
        &dir.path().join("nope.nessus"),
        &dir.path().join("out.csv"),
        &FileTables::new(),
        &Config::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::SourceNotFound { .. }));
}
