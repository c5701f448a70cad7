//! Command-line interface for wordgame.

use clap::{Parser, Subcommand};

/// Wordgame - concurrent multiplayer word-game server
#[derive(Parser, Debug)]
#[command(name = "wordgame")]
#[command(about = "Session server for turn-based word games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Seed for reproducible tile shuffles
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the board layout
    Board,
}
