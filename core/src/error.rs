//! Error types for the Bemfa topic client.
//!
//! # Design
//! Transport problems come in two shapes: the broker answered with a
//! non-2xx status (`HttpStatus`, raw status and body kept for debugging) or
//! the request never completed (`Transport`). Both count as transport
//! errors for callers. A response that arrived but cannot be decoded lands
//! in `ResponseFormat`.

use thiserror::Error;

/// Errors surfaced by the read path and carried by failed write outcomes.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The broker returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The request could not be sent or the response could not be read.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body is not the JSON envelope the broker promises.
    #[error("malformed response: {0}")]
    ResponseFormat(String),
}

impl ApiError {
    /// True for failures at the HTTP layer, as opposed to decoding failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::HttpStatus { .. } | ApiError::Transport(_))
    }
}
