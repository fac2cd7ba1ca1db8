use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Bind host cannot be empty")]
    EmptyHost,

    #[error("Unsplash username cannot be empty")]
    EmptyUsername,

    #[error("Unsplash base URL cannot be empty")]
    EmptyBaseUrl,

    #[error("Invalid per_page: {0}. Must be between 1 and 30")]
    InvalidPerPage(u32),

    #[error("Invalid cache ttl_secs: {0}. Must be positive")]
    InvalidCacheTtl(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. digilens.yaml (project config, optional)
    /// 3. Environment variables (DIGILENS_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            // 1. Start with programmatic defaults
            .merge(Serialized::defaults(Config::default()))
            // 2. Merge project config (optional)
            .merge(Yaml::file("digilens.yaml"))
            // 3. Merge environment variables (highest priority)
            .merge(Env::prefixed("DIGILENS_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.server.host.is_empty() {
            return Err(ConfigError::EmptyHost);
        }

        if config.unsplash.username.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }

        if config.unsplash.base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        if config.unsplash.per_page == 0 || config.unsplash.per_page > 30 {
            return Err(ConfigError::InvalidPerPage(config.unsplash.per_page));
        }

        if config.cache.ttl_secs == 0 {
            return Err(ConfigError::InvalidCacheTtl(config.cache.ttl_secs));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.server.port, 8787);
        assert_eq!(config.cache.ttl_secs, 600);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
server:
  host: 0.0.0.0
  port: 3000
  enable_cors: false
unsplash:
  access_key: test-key
  per_page: 10
cache:
  ttl_secs: 60
logging:
  level: debug
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(!config.server.enable_cors);
        assert_eq!(config.unsplash.access_key, "test-key");
        assert_eq!(config.unsplash.per_page, 10);
        assert_eq!(config.unsplash.username, "digilens");
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.logging.level, "debug");

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = Config::default();
        config.server.host = String::new();

        let result = ConfigLoader::validate(&config);
        assert!(matches!(result.unwrap_err(), ConfigError::EmptyHost));
    }

    #[test]
    fn test_validate_empty_username() {
        let mut config = Config::default();
        config.unsplash.username = String::new();

        let result = ConfigLoader::validate(&config);
        assert!(matches!(result.unwrap_err(), ConfigError::EmptyUsername));
    }

    #[test]
    fn test_validate_per_page_bounds() {
        let mut config = Config::default();
        config.unsplash.per_page = 0;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidPerPage(0)
        ));

        config.unsplash.per_page = 31;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidPerPage(31)
        ));

        config.unsplash.per_page = 30;
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_zero_ttl() {
        let mut config = Config::default();
        config.cache.ttl_secs = 0;

        let result = ConfigLoader::validate(&config);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidCacheTtl(0)
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();

        let result = ConfigLoader::validate(&config);
        match result.unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "verbose"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_env_override() {
        temp_env::with_vars(
            [
                ("DIGILENS_SERVER__PORT", Some("9000")),
                ("DIGILENS_UNSPLASH__ACCESS_KEY", Some("env-key")),
                ("DIGILENS_CACHE__TTL_SECS", Some("120")),
            ],
            || {
                let config = ConfigLoader::load().expect("Load should succeed");
                assert_eq!(config.server.port, 9000);
                assert_eq!(config.unsplash.access_key, "env-key");
                assert_eq!(config.cache.ttl_secs, 120);
                // Untouched values keep their defaults
                assert_eq!(config.server.host, "127.0.0.1");
            },
        );
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  port: 4000\nunsplash:\n  access_key: file-key"
        )
        .unwrap();
        file.flush().unwrap();

        let config = ConfigLoader::load_from_file(file.path()).expect("Load should succeed");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.unsplash.access_key, "file-key");
        assert_eq!(config.unsplash.username, "digilens", "Defaults should persist");
    }
}
