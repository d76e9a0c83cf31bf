//! ==============================================================================
//! error.rs - fetch failure taxonomy
//! ==============================================================================
//!
//! purpose:
//!     names the three ways a tick can fail so the status line can say which
//!     one happened. everything above the fetch layer uses anyhow.
//!
//! ==============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// transport failure, timeout, or body read error
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// the endpoint answered with a non-2xx status
    #[error("endpoint returned HTTP {status}")]
    Status { status: u16 },

    /// the body is not a json array of readings
    #[error("response is not a reading list: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// short tag for the status line
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Request { .. } => "network",
            FetchError::Status { .. } => "http",
            FetchError::Decode(_) => "decode",
        }
    }
}
