use std::path::PathBuf;

use thiserror::Error;

/// Failure to load the dataset catalog. Fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read dataset catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset catalog is not a JSON object of name to path: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("dataset {name:?} has a non-string path")]
    InvalidPath { name: String },
}

/// Failure to fetch one DONKI category. Always recovered by the aggregator.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}
