#![cfg(test)]
use std::fs;
use std::path::{Path, PathBuf};

use scansheet_common::model::{Record, Table};
use scansheet_common::tabular::TableSink;
use scansheet_formats::FileTables;

pub const REPORT: &str = r#"<?xml version="1.0" ?>
<NessusClientData_v2>
  <Report name="weekly">
    <ReportHost name="10.0.0.5">
      <HostProperties>
        <tag name="host-ip">10.0.0.5</tag>
      </HostProperties>
      <ReportItem port="443" pluginID="1001">
        <cvss_base_score>5.0</cvss_base_score>
        <cvss3_base_score>7.5</cvss3_base_score>
        <cve>CVE-2023-0001</cve>
        <risk_factor>High</risk_factor>
        <synopsis>Weak cipher suites.</synopsis>
      </ReportItem>
      <ReportItem port="22" pluginID="1002">
        <cvss_base_score>10.0</cvss_base_score>
        <cvss3_base_score>9.8</cvss3_base_score>
        <cve>CVE-2023-0002</cve>
        <risk_factor>Critical</risk_factor>
        <synopsis>Remote code execution.</synopsis>
      </ReportItem>
      <ReportItem port="0" pluginID="19506">
        <plugin_output>Scan information</plugin_output>
      </ReportItem>
    </ReportHost>
  </Report>
</NessusClientData_v2>
"#;

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("fixture written");
    path
}

/// Builds a table from string cells and writes it with the file sink.
pub fn write_table(path: &Path, columns: &[&str], rows: &[&[&str]]) {
    let rows = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .zip(row.iter())
                .filter(|(_, v)| !v.is_empty())
                .map(|(k, v)| (*k, *v))
                .collect::<Record>()
        })
        .collect();
    let table = Table::with_rows(columns.iter().map(|c| c.to_string()).collect(), rows);
    FileTables::new()
        .write_table(&table, path)
        .expect("fixture table written");
}

pub fn column(table: &Table, name: &str) -> Vec<String> {
    table.rows().iter().map(|r| r.get(name).to_string()).collect()
}
