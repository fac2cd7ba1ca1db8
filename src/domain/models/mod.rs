//! Domain models for the DigiLens proxy.

pub mod config;

pub use config::{CacheConfig, Config, LoggingConfig, ServerConfig, UnsplashConfig};
