//! Domain errors for the DigiLens proxy.

use thiserror::Error;

/// Errors surfaced by the upstream Unsplash client.
///
/// The HTTP layer collapses all of these into a fixed-shape 500 response;
/// the sub-kinds exist so that logs can tell an unreachable upstream apart
/// from a rejected key or a malformed body.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request never completed (DNS, connect, transport failure).
    #[error("upstream request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Upstream answered with a non-success status code.
    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not the JSON we expected.
    #[error("failed to decode upstream response: {0}")]
    Decode(String),
}

/// Convenience alias for fallible upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
