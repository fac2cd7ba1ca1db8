use serde::{Deserialize, Serialize};

/// Main configuration structure for the proxy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Unsplash configuration
    #[serde(default)]
    pub unsplash: UnsplashConfig,

    /// Response cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to allow cross-origin requests from any origin
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8787
}

const fn default_enable_cors() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_enable_cors(),
        }
    }
}

/// Upstream Unsplash configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UnsplashConfig {
    /// Access key passed to Unsplash as the `client_id` query parameter.
    ///
    /// An empty key does not prevent startup; requests then fail upstream
    /// and surface as 500 responses.
    #[serde(default)]
    pub access_key: String,

    /// Unsplash account whose collections are proxied
    #[serde(default = "default_username")]
    pub username: String,

    /// Base URL of the Unsplash API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Page size requested from list endpoints (Unsplash caps this at 30)
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_username() -> String {
    "digilens".to_string()
}

fn default_base_url() -> String {
    "https://api.unsplash.com".to_string()
}

const fn default_per_page() -> u32 {
    30
}

impl Default for UnsplashConfig {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            username: default_username(),
            base_url: default_base_url(),
            per_page: default_per_page(),
        }
    }
}

/// Response cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheConfig {
    /// Freshness window in seconds for cached upstream payloads
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

const fn default_ttl_secs() -> u64 {
    600
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
