use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the extraction and merge pipelines.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{} does not exist", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("{} is not a well-formed document (byte {position}): {reason}", path.display())]
    DocumentParse {
        path: PathBuf,
        position: u64,
        reason: String,
    },

    #[error("column '{column}' is absent from every extracted record")]
    SchemaProjection { column: String },

    #[error("{} has no supported table format (expected .xlsx or .csv)", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("unable to read {}: {reason}", path.display())]
    SourceRead { path: PathBuf, reason: String },

    #[error("unable to write {}: {source}", path.display())]
    SinkWrite {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    pub fn sink_write<E>(path: impl Into<PathBuf>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::SinkWrite {
            path: path.into(),
            source: source.into(),
        }
    }
}
