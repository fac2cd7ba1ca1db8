//! DigiLens proxy entry point.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use digilens_proxy::infrastructure::unsplash::{UnsplashClient, UnsplashClientConfig};
use digilens_proxy::server::{ProxyHttpConfig, ProxyHttpServer};
use digilens_proxy::services::{CacheStore, CollectionProxyService};
use digilens_proxy::ConfigLoader;

/// Caching HTTP proxy in front of the Unsplash photo-collection API.
#[derive(Debug, Parser)]
#[command(name = "digilens-proxy", version, about)]
struct Cli {
    /// Path to a YAML config file (defaults to digilens.yaml in the
    /// working directory, merged with DIGILENS_* environment variables)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the configured listen port
    #[arg(long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if config.unsplash.access_key.is_empty() {
        tracing::warn!(
            "Unsplash access key is not configured; upstream requests will be rejected"
        );
    }

    let cache = Arc::new(CacheStore::with_ttl(Duration::from_secs(
        config.cache.ttl_secs,
    )));
    let client = UnsplashClient::with_config(UnsplashClientConfig::from(&config.unsplash));
    let service = CollectionProxyService::new(client, cache);

    let server = ProxyHttpServer::new(service, ProxyHttpConfig::from(&config.server));
    server.serve().await
}
