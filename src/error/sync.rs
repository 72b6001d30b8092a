//! Remote synchronisation errors.

use thiserror::Error;

use crate::traits::HttpError;

/// Any failure of a single fetch or push round trip.
///
/// Transport failures, non-2xx statuses and undecodable payloads all end up
/// here so callers only ever handle one kind.
#[derive(Debug, Clone, Error)]
pub enum SyncError {
    /// The request never produced a response.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: HttpError,
    },

    /// The server answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The response body was not a seatbelt record.
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The request body could not be serialised.
    #[error("could not encode request: {0}")]
    Encode(String),

    /// A queued push was dropped before it produced a result.
    #[error("push abandoned before completion")]
    Abandoned,
}

impl SyncError {
    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
