use std::path::PathBuf;

use thiserror::Error;

/// Failures the schedule engine can surface.
///
/// Anything raised before the first schedule is on screen is terminal for the
/// session; cache write failures are reported and otherwise ignored.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("{key} environment variable not set")]
    MissingCredential { key: String },

    #[error("request failed: {detail}")]
    Request { detail: String },

    #[error("API request failed: HTTP status {status}, response: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode json response: {source}")]
    Decode { source: serde_json::Error },

    #[error("cache file does not exist at {path}")]
    CacheMissing { path: PathBuf },

    #[error("failed to read cache file {path}: {source}")]
    CacheRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse cache file {path}: {source}")]
    CacheParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to create cache directory {path}: {source}")]
    CacheDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize schedule cache: {source}")]
    CacheSerialize { source: serde_json::Error },

    #[error("failed to write cache file {path}: {source}")]
    CacheWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

impl ScheduleError {
    pub fn missing_credential(key: impl Into<String>) -> Self {
        Self::MissingCredential { key: key.into() }
    }

    pub fn request(detail: impl Into<String>) -> Self {
        Self::Request {
            detail: detail.into(),
        }
    }

    /// Config and fetch failures end the session; cache failures never do.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential { .. }
                | Self::Request { .. }
                | Self::Status { .. }
                | Self::Decode { .. }
        )
    }
}
