pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "product-proxy")]
#[command(author, version, about = "Product Proxy CLI - forward product deletions to the backend service")]
pub struct Cli {
    /// Path to config file (checked in order: local config.toml, ~/.config/product-proxy/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the proxy server
    Start {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Backend origin (overrides config and BACKEND_URL)
        #[arg(short, long)]
        backend_url: Option<String>,
    },

    /// Show proxy status
    Status,
}
