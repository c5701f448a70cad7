//! Seated players and their public view.

use crate::error::PlayError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;
use wordgame_tiles::Tile;

/// Opaque unique identifier for a player.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Allocates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

/// A player seated at one game.
///
/// The seat is fixed at join time. Once the game starts the hand and score
/// are only touched by the game's controller.
#[derive(Debug, Clone, Getters)]
pub struct Player {
    id: PlayerId,
    name: String,
    seat: usize,
    hand: Vec<Tile>,
    score: u32,
}

impl Player {
    /// Creates a player with an empty hand.
    #[instrument]
    pub(crate) fn new(name: String, seat: usize) -> Self {
        Self {
            id: PlayerId::new(),
            name,
            seat,
            hand: Vec::new(),
            score: 0,
        }
    }

    /// Adds tiles to the hand.
    pub(crate) fn receive(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.hand.extend(tiles);
    }

    /// Removes one copy of each named tile.
    ///
    /// Either every tile is removed or the hand is left exactly as it was.
    pub(crate) fn remove_tiles(&mut self, tiles: &[Tile]) -> Result<(), PlayError> {
        let mut remaining = self.hand.clone();
        for tile in tiles {
            let idx = remaining
                .iter()
                .position(|held| held == tile)
                .ok_or(PlayError::TileNotInHand { tile: *tile })?;
            remaining.swap_remove(idx);
        }
        self.hand = remaining;
        Ok(())
    }

    /// Public view with the hand hidden.
    pub fn summary(&self) -> PlayerSummary {
        PlayerSummary {
            name: self.name.clone(),
            seat: self.seat,
            score: self.score,
            tile_count: self.hand.len(),
        }
    }
}

/// What every player may see about another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PlayerSummary {
    name: String,
    seat: usize,
    score: u32,
    tile_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordgame_tiles::tally;

    fn tiles(s: &str) -> Vec<Tile> {
        Tile::parse_all(s).unwrap()
    }

    #[test]
    fn test_remove_tiles_takes_one_copy_each() {
        let mut player = Player::new("Ann".to_string(), 0);
        player.receive(tiles("AABCDE?"));
        player.remove_tiles(&tiles("A?")).expect("Remove failed");
        assert_eq!(tally(player.hand()), tally(&tiles("ABCDE")));
    }

    #[test]
    fn test_remove_tiles_is_all_or_nothing() {
        let mut player = Player::new("Ann".to_string(), 0);
        player.receive(tiles("AABCDEF"));
        let before = player.hand().clone();
        let err = player.remove_tiles(&tiles("ABZ")).unwrap_err();
        assert_eq!(
            err,
            PlayError::TileNotInHand {
                tile: Tile::new('Z').unwrap()
            }
        );
        assert_eq!(player.hand(), &before);
    }

    #[test]
    fn test_remove_duplicate_needs_two_copies() {
        let mut player = Player::new("Ann".to_string(), 0);
        player.receive(tiles("ABCDEFG"));
        assert!(player.remove_tiles(&tiles("AA")).is_err());
        assert_eq!(player.hand().len(), 7);
    }

    #[test]
    fn test_summary_hides_hand() {
        let mut player = Player::new("Ann".to_string(), 2);
        player.receive(tiles("QUIZ"));
        let summary = player.summary();
        assert_eq!(summary.name(), "Ann");
        assert_eq!(*summary.seat(), 2);
        assert_eq!(*summary.tile_count(), 4);
    }
}
