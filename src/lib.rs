//! Wordgame library - concurrent sessions for turn-based word games
//!
//! Many games run side by side, each seating two to four players. Every
//! started game is owned by exactly one controller task, so its board, tile
//! supply and hands are only ever mutated one request at a time.
//!
//! # Architecture
//!
//! - **Registry**: directory of games keyed by id ([`GameRegistry`])
//! - **Game**: join/start lifecycle guarded by a per-game lock ([`GameInstance`])
//! - **Controller**: the per-game task serving queries and plays in FIFO order
//! - **Server**: JSON-over-HTTP API ([`server::router`])
//!
//! # Example
//!
//! ```no_run
//! use wordgame::{GameRegistry, PlayAction};
//!
//! # async fn example() -> Result<(), wordgame::GameError> {
//! let registry = GameRegistry::default();
//! let game_id = registry.create_game().await;
//! let alice = registry.join_game(game_id, "Alice").await?;
//! registry.join_game(game_id, "Bob").await?;
//! registry.start_game(game_id).await?;
//!
//! let state = registry.query_state(game_id, *alice.player_id()).await?;
//! let swap = PlayAction::swap(*alice.player_id(), state.hand()[..2].to_vec());
//! let state = registry.submit_play(game_id, swap).await?;
//! assert!(state.error().is_none());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod error;
mod game;
mod play;
mod player;
mod protocol;
mod registry;
mod table;

pub mod server;

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Errors
pub use error::{ErrorKind, GameError, PlayError};

// Crate-level exports - Games and players
pub use game::{GameId, GameInstance, MAX_PLAYERS, MIN_PLAYERS};
pub use player::{PlayerId, PlayerSummary};

// Crate-level exports - Protocol
pub use protocol::{GameState, GameSummary, JoinReceipt, PlayAction};

// Crate-level exports - Registry
pub use registry::{GameRegistry, RegistrySettings};
