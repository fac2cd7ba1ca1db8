//! Typed fragments of Unsplash responses.
//!
//! Collection and photo payloads pass through the proxy verbatim as
//! `serde_json::Value`; only the download-registration response is
//! decoded, to pull out the tracked URL.

use serde::Deserialize;

/// Response of `GET /photos/{id}/download`.
#[derive(Debug, Deserialize)]
pub struct DownloadResponse {
    /// Direct URL of the photo file.
    pub url: String,
}
