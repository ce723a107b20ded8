use std::path::PathBuf;

use product_proxy_core::config::{
    default_config_path, load_config, BACKEND_URL_ENV, LEGACY_BACKEND_URL_ENV,
};

pub async fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path.clone())?;

    println!("Product Proxy Status");
    println!("====================");
    println!();
    println!("Configuration:");
    match config_path {
        Some(path) => println!("  Config file: {:?}", path),
        None => println!("  Config file: {:?}", default_config_path()),
    }
    println!();
    println!("Server settings:");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);
    println!();
    println!("Backend:");
    println!("  Origin: {}", config.backend.url);
    let from_env = [BACKEND_URL_ENV, LEGACY_BACKEND_URL_ENV]
        .into_iter()
        .find(|name| std::env::var(name).map(|v| !v.trim().is_empty()).unwrap_or(false));
    if let Some(name) = from_env {
        println!("  (set by {})", name);
    }
    match config.backend.request_timeout {
        Some(secs) => println!("  Request timeout: {}s", secs),
        None => println!("  Request timeout: transport default"),
    }

    // Check if server is reachable
    println!();
    let url = format!("http://{}:{}/healthz", config.server.host, config.server.port);
    match reqwest::get(&url).await {
        Ok(resp) if resp.status().is_success() => {
            println!("Server: RUNNING ✓");
        }
        _ => {
            println!("Server: NOT RUNNING");
        }
    }

    Ok(())
}
