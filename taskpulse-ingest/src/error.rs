use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a load. There is never a partial result.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("opening {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reading CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column {column:?} (or {export_name:?})")]
    MissingColumn {
        column: &'static str,
        export_name: &'static str,
    },

    /// A timestamp cell that is blank or cannot be parsed.
    #[error("malformed {column} on line {line}: {value:?} ({reason})")]
    MalformedInput {
        line: u64,
        column: &'static str,
        value: String,
        reason: String,
    },
}

pub type IngestResult<T> = Result<T, IngestError>;
