//! DigiLens Collection Proxy
//!
//! A small HTTP proxy in front of the Unsplash photo-collection API. It
//! exposes three read endpoints for the DigiLens collections and caches
//! upstream responses for a fixed interval so that browser clients do not
//! burn through the Unsplash rate limit.
//!
//! # Architecture
//!
//! The crate is layered the same way as our other services:
//!
//! - **Domain Layer** (`domain`): error taxonomy and configuration model
//! - **Service Layer** (`services`): the response cache and the
//!   cache-or-fetch orchestration
//! - **Infrastructure Layer** (`infrastructure`): the Unsplash HTTP client
//!   and configuration loading
//! - **Server Layer** (`server`): the axum HTTP surface
//!
//! # Example
//!
//! ```ignore
//! use digilens_proxy::{CacheStore, CollectionProxyService, ProxyHttpServer, UnsplashClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Wire the cache, client and server, then serve
//!     Ok(())
//! }
//! ```

pub mod domain;
pub mod infrastructure;
pub mod server;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{UpstreamError, UpstreamResult};
pub use domain::models::{CacheConfig, Config, LoggingConfig, ServerConfig, UnsplashConfig};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::unsplash::{UnsplashClient, UnsplashClientConfig};
pub use server::{ProxyHttpConfig, ProxyHttpServer};
pub use services::{CacheStore, CollectionProxyService};
