use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchlistError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid instruments file {path}: {source}")]
    InvalidInstruments {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot derive a source id from file name: {0}")]
    InvalidFileName(PathBuf),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl WatchlistError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WatchlistError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, WatchlistError>;
