//! Request and response envelopes exchanged with a game.

use crate::error::PlayError;
use crate::game::GameId;
use crate::player::{PlayerId, PlayerSummary};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use wordgame_tiles::{Board, Coordinate, Tile};

/// A turn submitted by a player.
///
/// Only swaps are executed. The placement fields are carried so a word-play
/// action can share the same turn-validated path later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct PlayAction {
    /// Player taking the turn.
    pub player_id: PlayerId,
    /// Tiles to swap out (or to place).
    pub tiles: Vec<Tile>,
    /// True to exchange `tiles` with the supply.
    #[serde(default = "default_swap")]
    pub swap: bool,
    /// First square of a placed word.
    #[new(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Coordinate>,
    /// Last square of a placed word.
    #[new(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Coordinate>,
    /// Letters chosen for blank tiles in a placed word.
    #[new(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blanks: Vec<Tile>,
}

fn default_swap() -> bool {
    true
}

impl PlayAction {
    /// A swap of the given tiles.
    pub fn swap(player_id: PlayerId, tiles: Vec<Tile>) -> Self {
        Self::new(player_id, tiles, true)
    }
}

/// Snapshot of a game as seen by one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameState {
    game_id: GameId,
    /// Players in seat order, hands hidden.
    players: Vec<PlayerSummary>,
    board: Board,
    /// Seat whose turn it is.
    current_turn_seat: usize,
    turn_counter: usize,
    supply_remaining: usize,
    /// The requesting player's own tiles.
    hand: Vec<Tile>,
    /// Why the request that produced this snapshot was rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<PlayError>,
}

impl GameState {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        game_id: GameId,
        players: Vec<PlayerSummary>,
        board: Board,
        current_turn_seat: usize,
        turn_counter: usize,
        supply_remaining: usize,
        hand: Vec<Tile>,
        error: Option<PlayError>,
    ) -> Self {
        Self {
            game_id,
            players,
            board,
            current_turn_seat,
            turn_counter,
            supply_remaining,
            hand,
            error,
        }
    }

    /// Total tiles visible to this snapshot: supply, every hand, the board.
    pub fn tile_total(&self) -> usize {
        self.supply_remaining
            + self.players.iter().map(|p| *p.tile_count()).sum::<usize>()
            + self.board.placed_tiles().len()
    }
}

/// Result of a successful join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct JoinReceipt {
    player_id: PlayerId,
    seat: usize,
}

impl JoinReceipt {
    pub(crate) fn new(player_id: PlayerId, seat: usize) -> Self {
        Self { player_id, seat }
    }
}

/// Listing entry for a registered game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameSummary {
    game_id: GameId,
    active: bool,
    player_count: usize,
}

impl GameSummary {
    pub(crate) fn new(game_id: GameId, active: bool, player_count: usize) -> Self {
        Self {
            game_id,
            active,
            player_count,
        }
    }
}
