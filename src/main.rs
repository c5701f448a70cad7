//! Wordgame - Unified CLI
//!
//! Runs the HTTP game server or prints the board layout.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use wordgame::{GameRegistry, RegistrySettings, ServerConfig, server};
use wordgame_tiles::Board;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            seed,
        } => run_server(config, host, port, seed).await,
        Command::Board => {
            println!("{}", Board::standard().display());
            Ok(())
        }
    }
}

/// Run the HTTP game server
#[instrument(skip_all)]
async fn run_server(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    seed: Option<u64>,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = match &config_path {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if seed.is_some() {
        config = config.with_seed(seed);
    }

    info!(
        addr = %config.bind_addr(),
        queue_capacity = config.queue_capacity(),
        seeded = config.seed().is_some(),
        "Starting wordgame server"
    );

    let registry = GameRegistry::new(RegistrySettings::from(&config));
    server::serve(&config, registry).await
}
