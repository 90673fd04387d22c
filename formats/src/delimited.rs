//! Comma-separated tables.

use std::path::Path;

use scansheet_common::error::{Error, Result};
use scansheet_common::model::{Record, Table, Value};

use crate::atomic::{self, BoxError};
use crate::header_names;

pub fn write(table: &Table, path: &Path) -> Result<()> {
    atomic::write_atomically(path, |file| {
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(table.columns())?;
        for record in table.rows() {
            writer.write_record(table.row_values(record).map(Value::to_string))?;
        }
        writer.flush()?;
        Ok::<(), BoxError>(())
    })
}

/// Reads a CSV file whose first line holds the column names.
///
/// Every non-empty cell is read as text; empty cells are null.
pub fn read(path: &Path) -> Result<Table> {
    let source_read = |e: csv::Error| Error::SourceRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(source_read)?;

    let raw = reader.headers().map_err(source_read)?.clone();
    let columns = header_names(
        raw.iter()
            .enumerate()
            .map(|(i, h)| if i == 0 { h.trim_start_matches('\u{feff}') } else { h })
            .map(String::from),
    );

    let mut table = Table::new(columns);
    for row in reader.records() {
        let row = row.map_err(source_read)?;
        let record: Record = table
            .columns()
            .iter()
            .zip(row.iter())
            .map(|(column, cell)| {
                let value = match cell {
                    "" => Value::Null,
                    text => Value::text(text),
                };
                (column.as_str(), value)
            })
            .collect();
        table.push(record);
    }
    Ok(table)
}
