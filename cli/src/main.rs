use clap::Parser;

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Level for our own crates comes from config; RUST_LOG still wins per target
    let level = product_proxy_core::config::load_config(cli.config.clone())
        .map(|c| c.logging.level)
        .unwrap_or_else(|_| "info".to_string());

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("product_proxy={}", level).parse()?)
                .add_directive(format!("product_proxy_core={}", level).parse()?)
                .add_directive("tower_http=debug".parse()?)
        )
        .init();

    match cli.command {
        Commands::Start { port, backend_url } => {
            cli::commands::start::run(cli.config, port, backend_url).await?;
        }
        Commands::Status => {
            cli::commands::status::run(cli.config).await?;
        }
    }

    Ok(())
}
