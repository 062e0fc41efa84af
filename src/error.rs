//! Error types for the library. The binaries wrap these in `anyhow`.

use reqwest::StatusCode;
use thiserror::Error;

/// Why a country lookup did not produce a record.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("country name is empty")]
    EmptyName,
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("fetch failed with HTTP {0}")]
    Status(StatusCode),
    #[error("decode json: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unexpected response shape: {0}")]
    Shape(String),
    #[error("fetch worker panicked: {0}")]
    Panicked(String),
}

impl FetchError {
    /// `true` when the API answered 404, i.e. it knows no country by that name.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status(s) if *s == StatusCode::NOT_FOUND)
    }
}

/// Failures of the persistent key-value storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("encode storage value: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("storage file {path} is not a JSON object of strings")]
    Corrupt { path: String },
}
