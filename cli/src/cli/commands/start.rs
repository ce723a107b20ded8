use std::path::PathBuf;

use product_proxy_core::config::load_config;
use product_proxy_core::proxy::{BackendClient, ProxyServer};

pub async fn run(
    config_path: Option<PathBuf>,
    port_override: Option<u16>,
    backend_override: Option<String>,
) -> anyhow::Result<()> {
    // Load configuration
    let mut config = load_config(config_path)?;

    // Apply CLI overrides if provided
    if let Some(port) = port_override {
        config.server.port = port;
    }
    config.backend.apply_url_override(backend_override);

    tracing::info!("Starting Product Proxy...");
    tracing::info!("  Port: {}", config.server.port);
    tracing::info!("  Host: {}", config.server.host);
    tracing::info!("  Backend: {}", config.backend.url);

    let backend = BackendClient::new(config.backend.url.clone(), config.backend.request_timeout())?;

    // Create and start server
    let server = ProxyServer::new(config.server.host.clone(), config.server.port, backend);

    tracing::info!("Proxy server starting on http://{}:{}", config.server.host, config.server.port);
    tracing::info!("Press Ctrl+C to stop");

    // Run server (blocks until shutdown)
    server.run().await?;

    Ok(())
}
