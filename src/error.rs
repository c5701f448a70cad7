//! Error types for game lifecycle and turn validation.

use crate::game::GameId;
use crate::player::PlayerId;
use serde::{Deserialize, Serialize};
use wordgame_tiles::{Tile, TileError};

/// Broad category of a [`GameError`], used to pick a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The game or player does not exist.
    NotFound,
    /// The request is valid but the game is in the wrong phase for it.
    Conflict,
    /// The request itself is malformed for the current state.
    Validation,
    /// The server could not serve the request.
    Internal,
}

/// Errors from the registry, joins, starts and controller requests.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// No game is registered under the id.
    #[display("No existing game with id {game_id}")]
    GameNotFound {
        /// Requested game.
        game_id: GameId,
    },

    /// The player id is not seated in the game.
    #[display("No player with id {player_id} in this game")]
    PlayerNotFound {
        /// Requested player.
        player_id: PlayerId,
    },

    /// The game is already active.
    #[display("Game has already started")]
    AlreadyStarted,

    /// The game already seats the maximum number of players.
    #[display("Maximum players reached for game ({max})")]
    GameFull {
        /// Seat limit.
        max: usize,
    },

    /// Start was requested with too few players.
    #[display("At least {min} players needed to start game, have {count}")]
    NotEnoughPlayers {
        /// Players required.
        min: usize,
        /// Players seated.
        count: usize,
    },

    /// State or play was requested before the game started.
    #[display("Game has not started")]
    NotStarted,

    /// A join supplied an empty display name.
    #[display("Player name must not be blank")]
    BlankName,

    /// The tile supply could not cover a deal.
    #[display("Tile supply error: {source}")]
    Supply {
        /// Underlying supply error.
        source: TileError,
    },

    /// The game's controller is no longer accepting requests.
    #[display("Controller for game {game_id} has stopped")]
    ControllerStopped {
        /// Game whose controller stopped.
        game_id: GameId,
    },
}

impl GameError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::GameNotFound { .. } | GameError::PlayerNotFound { .. } => {
                ErrorKind::NotFound
            }
            GameError::AlreadyStarted
            | GameError::GameFull { .. }
            | GameError::NotEnoughPlayers { .. }
            | GameError::NotStarted => ErrorKind::Conflict,
            GameError::BlankName => ErrorKind::Validation,
            GameError::Supply { .. } | GameError::ControllerStopped { .. } => ErrorKind::Internal,
        }
    }
}

impl From<TileError> for GameError {
    fn from(source: TileError) -> Self {
        GameError::Supply { source }
    }
}

/// Reasons a play is rejected by the turn validator.
///
/// A rejected play never mutates the game; the error travels back to the
/// player inside the returned state.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::Error,
)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayError {
    /// Another seat holds the turn.
    #[display("Playing out of turn. Expected player {expected}, not {seat}")]
    OutOfTurn {
        /// Seat whose turn it is.
        expected: usize,
        /// Seat that tried to play.
        seat: usize,
    },

    /// More tiles were named than a hand can hold.
    #[display("Cannot play more than {max} tiles, got {count}")]
    TooManyTiles {
        /// Tiles named.
        count: usize,
        /// Hand size.
        max: usize,
    },

    /// A named tile is not in the player's hand.
    #[display("Tile {tile} is not in hand")]
    TileNotInHand {
        /// Missing tile.
        tile: Tile,
    },

    /// The supply holds fewer tiles than the swap needs.
    #[display("Not enough tiles available for swap: requested {requested}, {available} left")]
    NotEnoughTiles {
        /// Tiles to swap.
        requested: usize,
        /// Tiles left in the supply.
        available: usize,
    },

    /// Only swaps are accepted.
    #[display("Word placement is not supported")]
    PlacementUnsupported,
}
