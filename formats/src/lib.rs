//! # Scansheet Formats
//!
//! File-backed implementations of the table ports. The format is picked from
//! the file extension: `.xlsx` workbooks and `.csv` files are understood.

pub mod atomic;
pub mod delimited;
pub mod workbook;

use std::path::Path;

use scansheet_common::error::{Error, Result};
use scansheet_common::model::Table;
use scansheet_common::tabular::{TableSink, TableSource};

use crate::workbook::Striping;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Xlsx,
    Csv,
}

impl TableFormat {
    /// Recognises the format of `path` from its extension, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("xlsx") => Ok(TableFormat::Xlsx),
            Some("csv") => Ok(TableFormat::Csv),
            _ => Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Reads and writes tables on disk, dispatching on the file extension.
#[derive(Debug, Default)]
pub struct FileTables {
    striping: Option<Striping>,
}

impl FileTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paints header and alternating row fills on workbook output.
    pub fn striped() -> Self {
        Self {
            striping: Some(Striping::default()),
        }
    }
}

impl TableSource for FileTables {
    fn read_table(&self, path: &Path) -> Result<Table> {
        if !path.exists() {
            return Err(Error::SourceNotFound {
                path: path.to_path_buf(),
            });
        }

        match TableFormat::from_path(path)? {
            TableFormat::Xlsx => workbook::read(path),
            TableFormat::Csv => delimited::read(path),
        }
    }
}

impl TableSink for FileTables {
    fn write_table(&self, table: &Table, path: &Path) -> Result<()> {
        match TableFormat::from_path(path)? {
            TableFormat::Xlsx => workbook::write(table, path, self.striping.as_ref()),
            TableFormat::Csv => delimited::write(table, path),
        }
    }
}

/// Turns a raw header row into unique column names.
///
/// Blank headers become `Unnamed: <index>` and repeated names get a `.1`,
/// `.2`, ... suffix, the way spreadsheet tooling usually labels them.
pub(crate) fn header_names<I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut names: Vec<String> = Vec::new();
    for (index, name) in raw.into_iter().enumerate() {
        let name = match name.trim() {
            "" => format!("Unnamed: {index}"),
            trimmed => trimmed.to_string(),
        };

        let mut candidate = name.clone();
        let mut suffix = 1;
        while names.contains(&candidate) {
            candidate = format!("{name}.{suffix}");
            suffix += 1;
        }
        names.push(candidate);
    }
    names
}
