//! Unsplash HTTP client.
//!
//! Wraps the three Unsplash endpoints the proxy fronts. The access key is
//! injected as the `client_id` query parameter on every request, which is
//! how Unsplash authenticates public (read-only) applications.

use reqwest::Client;
use serde_json::Value;

use crate::domain::errors::{UpstreamError, UpstreamResult};
use crate::domain::models::UnsplashConfig;

use super::models::DownloadResponse;

/// Default base URL for the Unsplash API.
const UNSPLASH_API_BASE: &str = "https://api.unsplash.com";

/// Default account whose collections are proxied.
const DEFAULT_USERNAME: &str = "digilens";

/// Default page size for list endpoints (Unsplash caps this at 30).
const DEFAULT_PER_PAGE: u32 = 30;

/// Configuration for the Unsplash client.
#[derive(Debug, Clone)]
pub struct UnsplashClientConfig {
    /// Access key sent as `client_id`.
    pub access_key: String,
    /// Account whose collections are listed.
    pub username: String,
    /// Base URL, overridable so tests can point at a mock server.
    pub base_url: String,
    /// Page size for list endpoints.
    pub per_page: u32,
}

impl Default for UnsplashClientConfig {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            username: DEFAULT_USERNAME.to_string(),
            base_url: UNSPLASH_API_BASE.to_string(),
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl From<&UnsplashConfig> for UnsplashClientConfig {
    fn from(cfg: &UnsplashConfig) -> Self {
        Self {
            access_key: cfg.access_key.clone(),
            username: cfg.username.clone(),
            base_url: cfg.base_url.clone(),
            per_page: cfg.per_page,
        }
    }
}

/// HTTP client for the Unsplash API.
///
/// A single failed attempt is surfaced immediately as [`UpstreamError`];
/// there are no retries and no circuit breaking.
#[derive(Debug, Clone)]
pub struct UnsplashClient {
    /// The underlying HTTP client.
    http: Client,
    config: UnsplashClientConfig,
}

impl UnsplashClient {
    /// Create a new client with the given access key and defaults otherwise.
    pub fn new(access_key: String) -> Self {
        Self::with_config(UnsplashClientConfig {
            access_key,
            ..Default::default()
        })
    }

    /// Create a new client with custom configuration.
    pub fn with_config(config: UnsplashClientConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Issue a GET and decode the body as JSON.
    async fn get_json(&self, url: &str) -> UpstreamResult<Value> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(UpstreamError::Request)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))
    }

    /// List the account's collections.
    ///
    /// `GET /users/{username}/collections?per_page={n}&client_id={key}`
    pub async fn list_collections(&self) -> UpstreamResult<Value> {
        let url = format!(
            "{}/users/{}/collections?per_page={}&client_id={}",
            self.config.base_url, self.config.username, self.config.per_page, self.config.access_key
        );
        self.get_json(&url).await
    }

    /// List the photos of a collection.
    ///
    /// `GET /collections/{id}/photos?per_page={n}&client_id={key}`
    pub async fn list_photos(&self, collection_id: &str) -> UpstreamResult<Value> {
        let url = format!(
            "{}/collections/{}/photos?per_page={}&client_id={}",
            self.config.base_url, collection_id, self.config.per_page, self.config.access_key
        );
        self.get_json(&url).await
    }

    /// Register a download event for a photo and return the tracked URL.
    ///
    /// Unsplash counts each call as a download, so callers must not cache
    /// the result.
    pub async fn track_download(&self, photo_id: &str) -> UpstreamResult<String> {
        let url = format!(
            "{}/photos/{}/download?client_id={}",
            self.config.base_url, photo_id, self.config.access_key
        );
        let data = self.get_json(&url).await?;

        let resp: DownloadResponse = serde_json::from_value(data)
            .map_err(|e| UpstreamError::Decode(format!("download response: {e}")))?;
        Ok(resp.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn test_client(base_url: String) -> UnsplashClient {
        UnsplashClient::with_config(UnsplashClientConfig {
            access_key: "test-key".to_string(),
            base_url,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_list_collections_builds_credentialed_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/digilens/collections")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("per_page".into(), "30".into()),
                Matcher::UrlEncoded("client_id".into(), "test-key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": "c1", "title": "Surfaces"}]"#)
            .create_async()
            .await;

        let client = test_client(server.url());
        let data = client.list_collections().await.expect("fetch failed");

        assert_eq!(data[0]["id"], "c1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_photos_targets_collection() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/collections/42/photos")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("per_page".into(), "30".into()),
                Matcher::UrlEncoded("client_id".into(), "test-key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": "p1"}, {"id": "p2"}]"#)
            .create_async()
            .await;

        let client = test_client(server.url());
        let data = client.list_photos("42").await.expect("fetch failed");

        assert_eq!(data.as_array().map(Vec::len), Some(2));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_maps_to_status_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/digilens/collections")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"errors": ["OAuth error"]}"#)
            .create_async()
            .await;

        let client = test_client(server.url());
        let err = client.list_collections().await.unwrap_err();

        assert!(matches!(
            err,
            UpstreamError::Status(status) if status == reqwest::StatusCode::FORBIDDEN
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/collections/42/photos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let client = test_client(server.url());
        let err = client.list_photos("42").await.unwrap_err();

        assert!(matches!(err, UpstreamError::Decode(_)));
    }

    #[tokio::test]
    async fn test_track_download_extracts_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/photos/7/download")
            .match_query(Matcher::UrlEncoded("client_id".into(), "test-key".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"url": "https://x/y"}"#)
            .create_async()
            .await;

        let client = test_client(server.url());
        let url = client.track_download("7").await.expect("fetch failed");

        assert_eq!(url, "https://x/y");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_track_download_missing_url_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/photos/7/download")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"id": "7"}"#)
            .create_async()
            .await;

        let client = test_client(server.url());
        let err = client.track_download("7").await.unwrap_err();

        assert!(matches!(err, UpstreamError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_maps_to_request_error() {
        // Nothing listens on this port.
        let client = test_client("http://127.0.0.1:1".to_string());
        let err = client.list_collections().await.unwrap_err();

        assert!(matches!(err, UpstreamError::Request(_)));
    }
}
