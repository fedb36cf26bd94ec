//! CLI error handling

use std::path::PathBuf;

use domain_rating::RatingError;
use thiserror::Error;

/// Errors that stop a rating run
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Rating failed: {0}")]
    Rating(#[from] RatingError),

    #[error("Cannot serialize rated document: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Read {
            path: path.into(),
            source,
        }
    }
}
