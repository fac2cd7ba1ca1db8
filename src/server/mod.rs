//! HTTP surface of the DigiLens proxy.
//!
//! Three GET data routes plus a root health route. Collection and photo
//! responses pass through verbatim; any upstream failure collapses to a
//! fixed-shape 500 body with a route-specific message.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::models::ServerConfig;
use crate::services::CollectionProxyService;

/// Acknowledgement string served on the root route.
const ROOT_ACK: &str = "DigiLens Unsplash Collection Server Running";

/// Error message for the collections route.
const COLLECTIONS_ERROR: &str = "Failed to fetch DigiLens collections";

/// Error message for the photos route.
const PHOTOS_ERROR: &str = "Failed to fetch photos for this collection";

/// Error message for the download route.
const DOWNLOAD_ERROR: &str = "Failed to register download";

/// Configuration for the proxy HTTP server.
#[derive(Debug, Clone)]
pub struct ProxyHttpConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to allow cross-origin requests from any origin.
    pub enable_cors: bool,
}

impl Default for ProxyHttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
            enable_cors: true,
        }
    }
}

impl From<&ServerConfig> for ProxyHttpConfig {
    fn from(cfg: &ServerConfig) -> Self {
        Self {
            host: cfg.host.clone(),
            port: cfg.port,
            enable_cors: cfg.enable_cors,
        }
    }
}

/// Error body: exactly one `error` key, per the public contract.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ErrorBody {
    fn response(message: &str) -> (StatusCode, Json<ErrorBody>) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: message.to_string(),
            }),
        )
    }
}

/// Success body of the download route.
#[derive(Debug, Serialize)]
struct DownloadBody {
    success: bool,
    url: String,
}

/// Shared state for the proxy HTTP server.
struct AppState {
    service: CollectionProxyService,
}

/// Proxy HTTP server.
pub struct ProxyHttpServer {
    config: ProxyHttpConfig,
    service: CollectionProxyService,
}

impl ProxyHttpServer {
    /// Create a new server over the given service.
    pub fn new(service: CollectionProxyService, config: ProxyHttpConfig) -> Self {
        Self { config, service }
    }

    /// Build the router.
    ///
    /// Public so tests can drive the routes without binding a socket.
    pub fn router(&self) -> Router {
        let state = Arc::new(AppState {
            service: self.service.clone(),
        });

        let app = Router::new()
            .route("/", get(root))
            .route("/api/digilens/collections", get(get_collections))
            .route(
                "/api/digilens/collections/{id}/photos",
                get(get_collection_photos),
            )
            .route("/api/digilens/download/{id}", get(register_download))
            .with_state(state);

        if self.config.enable_cors {
            app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(TraceLayer::new_for_http())
        } else {
            app.layer(TraceLayer::new_for_http())
        }
    }

    /// Bind and serve until the process is stopped.
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .context("Invalid listen address")?;
        let router = self.router();

        tracing::info!("DigiLens proxy listening on {}", addr);

        let listener = TcpListener::bind(addr)
            .await
            .context("Failed to bind listener")?;
        axum::serve(listener, router)
            .await
            .context("Server terminated")?;
        Ok(())
    }

    /// Serve with a shutdown signal, for embedding in tests or supervisors.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .context("Invalid listen address")?;
        let router = self.router();

        tracing::info!("DigiLens proxy listening on {}", addr);

        let listener = TcpListener::bind(addr)
            .await
            .context("Failed to bind listener")?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("Server terminated")?;
        Ok(())
    }
}

// Handler functions

async fn root() -> &'static str {
    ROOT_ACK
}

async fn get_collections(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, (StatusCode, Json<ErrorBody>)> {
    match state.service.collections().await {
        Ok(data) => Ok(Json(data)),
        Err(err) => {
            tracing::warn!(error = %err, "collections fetch failed");
            Err(ErrorBody::response(COLLECTIONS_ERROR))
        }
    }
}

async fn get_collection_photos(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<ErrorBody>)> {
    match state.service.photos(&id).await {
        Ok(data) => Ok(Json(data)),
        Err(err) => {
            tracing::warn!(error = %err, collection_id = %id, "photos fetch failed");
            Err(ErrorBody::response(PHOTOS_ERROR))
        }
    }
}

async fn register_download(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DownloadBody>, (StatusCode, Json<ErrorBody>)> {
    match state.service.download_url(&id).await {
        Ok(url) => Ok(Json(DownloadBody { success: true, url })),
        Err(err) => {
            tracing::warn!(error = %err, photo_id = %id, "download registration failed");
            Err(ErrorBody::response(DOWNLOAD_ERROR))
        }
    }
}
