//! Cache-or-fetch orchestration in front of the Unsplash client.
//!
//! Handlers call this service instead of the client so that caching policy
//! lives in one place: collection and photo lists are cached, download
//! registration is not.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::domain::errors::UpstreamResult;
use crate::infrastructure::unsplash::UnsplashClient;

use super::cache::CacheStore;

/// Proxy service coordinating the cache and the upstream client.
///
/// Cloning is cheap: the client shares its connection pool and the cache
/// is behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CollectionProxyService {
    client: UnsplashClient,
    cache: Arc<CacheStore>,
}

impl CollectionProxyService {
    /// Create a new service over the given client and cache.
    pub fn new(client: UnsplashClient, cache: Arc<CacheStore>) -> Self {
        Self { client, cache }
    }

    /// The collection list, from cache when fresh.
    ///
    /// Concurrent misses for the same key may each fetch upstream; the last
    /// write wins and both callers get a consistent payload.
    pub async fn collections(&self) -> UpstreamResult<Value> {
        if let Some(cached) = self.cache.collections() {
            debug!("collections served from cache");
            return Ok(cached);
        }

        let data = self.client.list_collections().await?;
        self.cache.put_collections(data.clone());
        debug!("collections fetched from upstream");
        Ok(data)
    }

    /// The photo list of a collection, from cache when fresh.
    pub async fn photos(&self, collection_id: &str) -> UpstreamResult<Value> {
        if let Some(cached) = self.cache.photos(collection_id) {
            debug!(collection_id, "photos served from cache");
            return Ok(cached);
        }

        let data = self.client.list_photos(collection_id).await?;
        self.cache.put_photos(collection_id, data.clone());
        debug!(collection_id, "photos fetched from upstream");
        Ok(data)
    }

    /// Register a download and return the tracked URL.
    ///
    /// Never cached: Unsplash counts every call as a download event.
    pub async fn download_url(&self, photo_id: &str) -> UpstreamResult<String> {
        self.client.track_download(photo_id).await
    }
}
