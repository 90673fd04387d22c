//! Excel workbooks.
//!
//! Written with `rust_xlsxwriter` into a single `Sheet1` worksheet, read back
//! with `calamine` from the first worksheet of the file.

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook, Worksheet, XlsxError};
use scansheet_common::error::{Error, Result};
use scansheet_common::model::{Record, Table, Value};
use tracing::warn;

use crate::atomic::{self, BoxError};
use crate::header_names;

const SHEET_NAME: &str = "Sheet1";
/// Longest string Excel accepts in one cell.
const MAX_CELL_CHARS: usize = 32_767;

const HEADER_FILL: u32 = 0xB0C4DE;
const EVEN_FILL: u32 = 0xFFFFFF;
const ODD_FILL: u32 = 0xDDEBF7;

/// Header fill plus alternating row fills.
///
/// Purely cosmetic: a striped workbook holds the same cells as a plain one.
#[derive(Debug, Clone)]
pub struct Striping {
    header: Format,
    even: Format,
    odd: Format,
}

impl Striping {
    fn fill(rgb: u32) -> Format {
        Format::new()
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(rgb))
    }

    /// Format of the data row at `index`, counted from zero below the header.
    fn row(&self, index: usize) -> &Format {
        if index % 2 == 0 { &self.even } else { &self.odd }
    }
}

impl Default for Striping {
    fn default() -> Self {
        Self {
            header: Self::fill(HEADER_FILL),
            even: Self::fill(EVEN_FILL),
            odd: Self::fill(ODD_FILL),
        }
    }
}

pub fn write(table: &Table, path: &Path, striping: Option<&Striping>) -> Result<()> {
    let buffer = render(table, striping).map_err(|e| Error::sink_write(path, e))?;
    atomic::write_atomically(path, |file| {
        file.write_all(&buffer)?;
        Ok::<(), BoxError>(())
    })
}

fn render(table: &Table, striping: Option<&Striping>) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header = striping.map(|s| &s.header);
    for (col, name) in table.columns().iter().enumerate() {
        write_text(sheet, 0, column_number(col)?, name, header)?;
    }

    for (index, record) in table.rows().iter().enumerate() {
        let row = u32::try_from(index + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        let format = striping.map(|s| s.row(index));
        for (col, value) in table.row_values(record).enumerate() {
            write_cell(sheet, row, column_number(col)?, value, format)?;
        }
    }

    workbook.save_to_buffer()
}

fn column_number(index: usize) -> std::result::Result<u16, XlsxError> {
    u16::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Value,
    format: Option<&Format>,
) -> std::result::Result<(), XlsxError> {
    match (value, format) {
        (Value::Null, None) => {}
        (Value::Null, Some(format)) => {
            sheet.write_blank(row, col, format)?;
        }
        (Value::Text(text), format) => write_text(sheet, row, col, text, format)?,
        (Value::Number(number), None) => {
            sheet.write_number(row, col, *number)?;
        }
        (Value::Number(number), Some(format)) => {
            sheet.write_number_with_format(row, col, *number, format)?;
        }
    }
    Ok(())
}

fn write_text(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    text: &str,
    format: Option<&Format>,
) -> std::result::Result<(), XlsxError> {
    let text = fit_cell(text, row, col);
    match format {
        Some(format) => sheet.write_string_with_format(row, col, text.as_ref(), format)?,
        None => sheet.write_string(row, col, text.as_ref())?,
    };
    Ok(())
}

/// Cuts `text` down to what one cell can hold.
///
/// `row` and `col` are sheet coordinates, only used to report the cut.
fn fit_cell(text: &str, row: u32, col: u16) -> Cow<'_, str> {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            warn!(
                row,
                column = col,
                chars = text.chars().count(),
                "cell text exceeds {MAX_CELL_CHARS} characters and was truncated"
            );
            Cow::Owned(text[..cut].to_string())
        }
        None => Cow::Borrowed(text),
    }
}

/// Reads the first worksheet of the workbook at `path`.
///
/// The first row names the columns. Rows without any value are dropped.
pub fn read(path: &Path) -> Result<Table> {
    let source_read = |reason: String| Error::SourceRead {
        path: path.to_path_buf(),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| source_read(e.to_string()))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| source_read(e.to_string()))?,
        None => return Ok(Table::default()),
    };

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::default());
    };

    let columns = header_names(header.iter().map(|cell| match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }));
    let mut table = Table::new(columns);

    for row in rows {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        let record: Record = table
            .columns()
            .iter()
            .zip(row)
            .map(|(column, cell)| (column.as_str(), cell_value(cell)))
            .collect();
        table.push(record);
    }
    Ok(table)
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::Int(number) => Value::Number(*number as f64),
        Data::Float(number) => Value::Number(*number),
        Data::String(text) if text.is_empty() => Value::Null,
        Data::String(text) => Value::text(text.as_str()),
        other => Value::text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_alternate_fills() {
        let striping = Striping::default();
        assert_eq!(striping.row(0), &striping.even);
        assert_eq!(striping.row(1), &striping.odd);
        assert_eq!(striping.row(2), &striping.even);
    }

    #[test]
    fn long_text_is_cut_to_cell_limit() {
        let long = "é".repeat(MAX_CELL_CHARS + 10);
        assert_eq!(fit_cell(&long, 1, 0).chars().count(), MAX_CELL_CHARS);
        assert!(matches!(fit_cell("short", 1, 0), Cow::Borrowed("short")));
    }

    #[test]
    fn oversized_cells_are_written_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.xlsx");
        let mut record = Record::new();
        record.set("plugin_output", "x".repeat(MAX_CELL_CHARS + 500));
        let table = Table::with_rows(vec!["plugin_output".into()], vec![record]);

        write(&table, &path, None).unwrap();
        let back = read(&path).unwrap();

        let cell = back.rows()[0].get("plugin_output").to_string();
        assert_eq!(cell.len(), MAX_CELL_CHARS);
    }

    #[test]
    fn reads_back_numbers_text_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.xlsx");
        let mut first = Record::new();
        first.set("cve", "CVE-1");
        first.set("score", Value::Number(9.8));
        let mut second = Record::new();
        second.set("cve", "CVE-2");
        second.set("score", "N/A");
        let table = Table::with_rows(vec!["cve".into(), "score".into()], vec![first, second]);

        write(&table, &path, None).unwrap();
        let back = read(&path).unwrap();

        assert_eq!(back.columns(), ["cve", "score"]);
        assert_eq!(back.len(), 2);
        assert_eq!(back.rows()[0].get("score"), &Value::Number(9.8));
        assert_eq!(back.rows()[1].get("score"), &Value::text("N/A"));
    }

    #[test]
    fn unreadable_workbook_is_a_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();

        assert!(matches!(read(&path), Err(Error::SourceRead { .. })));
    }
}
