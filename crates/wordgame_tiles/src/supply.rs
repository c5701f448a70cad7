//! The shared pool of undrawn tiles.

use crate::tile::{Tile, TileError, full_set};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

/// Ordered, shuffled sequence of tiles that have not been dealt.
///
/// The supply owns its own RNG so that a game seeded for a test or a replay
/// produces the same deals every time.
#[derive(Debug, Clone)]
pub struct TileSupply {
    tiles: Vec<Tile>,
    rng: ChaCha8Rng,
}

impl TileSupply {
    /// Creates a full, shuffled supply using the given RNG.
    #[instrument(skip(rng))]
    pub fn standard(rng: ChaCha8Rng) -> Self {
        let mut supply = Self {
            tiles: full_set(),
            rng,
        };
        supply.shuffle();
        supply
    }

    /// Creates a full supply shuffled from OS entropy.
    pub fn from_entropy() -> Self {
        Self::standard(ChaCha8Rng::from_entropy())
    }

    /// Creates a full supply with a reproducible shuffle.
    pub fn seeded(seed: u64) -> Self {
        Self::standard(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Number of tiles left.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns true once every tile has been dealt.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles in draw order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Randomly permutes the remaining tiles.
    pub fn shuffle(&mut self) {
        self.tiles.shuffle(&mut self.rng);
    }

    /// Removes and returns the first `count` tiles.
    ///
    /// Fails without removing anything if fewer than `count` remain.
    #[instrument(skip(self), fields(available = self.tiles.len()))]
    pub fn deal(&mut self, count: usize) -> Result<Vec<Tile>, TileError> {
        if count > self.tiles.len() {
            return Err(TileError::NotEnoughTiles {
                requested: count,
                available: self.tiles.len(),
            });
        }
        let dealt: Vec<Tile> = self.tiles.drain(..count).collect();
        debug!(count, remaining = self.tiles.len(), "Dealt tiles");
        Ok(dealt)
    }

    /// Puts tiles back at the end of the supply and reshuffles.
    #[instrument(skip(self, tiles))]
    pub fn return_tiles(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.tiles.extend(tiles);
        self.shuffle();
        debug!(remaining = self.tiles.len(), "Returned tiles to supply");
    }
}
