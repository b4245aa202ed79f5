use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the data set. All of them are fatal: a load
/// either yields every row or nothing.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected {expected} columns, found {found}")]
    Schema {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: cannot split coordinates {value:?} into latitude and longitude")]
    CoordinateParse { line: u64, value: String },

    #[error("line {line}: unknown region {value:?}")]
    UnknownRegion { line: u64, value: String },
}

pub type Result<T> = std::result::Result<T, LoadError>;
