use thiserror::Error;

use crate::constants::INTERNAL_ERROR_STATUS;

/// Errors produced by a remote document-store implementation.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("document not found")]
    NotFound,

    #[error("remote call failed ({status}): {message}")]
    Status { status: u16, message: String },
}

/// Errors surfaced by the data-access layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A remote call failed. Every transport-level cause maps to the same
    /// fixed status classification; the original cause rides along as the
    /// source.
    #[error("fetch failed ({status})")]
    FetchFailed {
        status: u16,
        #[source]
        source: RemoteError,
    },

    #[error("document not found")]
    NotFound,

    #[error("failed to decode document: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn fetch(source: RemoteError) -> Self {
        CoreError::FetchFailed {
            status: INTERNAL_ERROR_STATUS,
            source,
        }
    }

    /// Like `fetch`, but preserves not-found as its own variant for
    /// get-by-id lookups.
    pub(crate) fn from_remote(source: RemoteError) -> Self {
        match source {
            RemoteError::NotFound => CoreError::NotFound,
            other => CoreError::fetch(other),
        }
    }
}
