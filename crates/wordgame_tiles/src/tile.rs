//! Letter tiles and the standard 100-tile distribution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::instrument;

/// Character used for the blank tile on the wire.
pub const BLANK_CHAR: char = '?';

/// Maximum number of tiles a player holds.
pub const HAND_SIZE: usize = 7;

/// Total number of tiles in a standard set.
pub const STANDARD_TILE_COUNT: usize = 100;

/// A single letter tile.
///
/// Tiles are interchangeable by letter: two `E` tiles are equal. The inner
/// character is always `A`-`Z` or [`BLANK_CHAR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Tile(char);

impl Tile {
    /// The blank tile.
    pub const BLANK: Tile = Tile(BLANK_CHAR);

    /// Parses a tile from a character.
    ///
    /// Letters are upper-cased. `?`, `_` and a space all denote the blank.
    pub fn new(c: char) -> Result<Self, TileError> {
        match c {
            BLANK_CHAR | '_' | ' ' => Ok(Self::BLANK),
            c if c.is_ascii_alphabetic() => Ok(Self(c.to_ascii_uppercase())),
            other => Err(TileError::InvalidLetter { letter: other }),
        }
    }

    /// Parses every character of `s` as a tile.
    pub fn parse_all(s: &str) -> Result<Vec<Self>, TileError> {
        s.chars().map(Self::new).collect()
    }

    /// Returns the character printed on the tile.
    pub fn letter(self) -> char {
        self.0
    }

    /// Returns true for the blank tile.
    pub fn is_blank(self) -> bool {
        self.0 == BLANK_CHAR
    }

    /// Returns the point value of the tile.
    pub fn value(self) -> u32 {
        DISTRIBUTION
            .iter()
            .find(|spec| spec.tile == self)
            .map(|spec| spec.value)
            .unwrap_or(0)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<char> for Tile {
    type Error = TileError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::new(c)
    }
}

impl From<Tile> for char {
    fn from(tile: Tile) -> Self {
        tile.0
    }
}

/// How many copies of a tile exist and what it scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpec {
    /// The tile.
    pub tile: Tile,
    /// Number of copies in a full set.
    pub count: usize,
    /// Points scored for playing it.
    pub value: u32,
}

const fn spec(letter: char, count: usize, value: u32) -> TileSpec {
    TileSpec {
        tile: Tile(letter),
        count,
        value,
    }
}

/// The standard English distribution.
pub const DISTRIBUTION: [TileSpec; 27] = [
    spec(BLANK_CHAR, 2, 0),
    spec('A', 9, 1),
    spec('B', 2, 3),
    spec('C', 2, 3),
    spec('D', 4, 2),
    spec('E', 12, 1),
    spec('F', 2, 4),
    spec('G', 3, 2),
    spec('H', 2, 4),
    spec('I', 9, 1),
    spec('J', 1, 8),
    spec('K', 1, 5),
    spec('L', 4, 1),
    spec('M', 2, 3),
    spec('N', 6, 1),
    spec('O', 8, 1),
    spec('P', 2, 3),
    spec('Q', 1, 10),
    spec('R', 6, 1),
    spec('S', 4, 1),
    spec('T', 6, 1),
    spec('U', 4, 1),
    spec('V', 2, 4),
    spec('W', 2, 4),
    spec('X', 1, 8),
    spec('Y', 2, 4),
    spec('Z', 1, 10),
];

/// Builds an unshuffled full set, grouped by letter.
#[instrument]
pub fn full_set() -> Vec<Tile> {
    DISTRIBUTION
        .iter()
        .flat_map(|spec| std::iter::repeat_n(spec.tile, spec.count))
        .collect()
}

/// Counts tiles by letter.
pub fn tally<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> BTreeMap<Tile, usize> {
    let mut counts = BTreeMap::new();
    for tile in tiles {
        *counts.entry(*tile).or_insert(0) += 1;
    }
    counts
}

/// Errors raised by tile parsing and tile supply operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TileError {
    /// The character is not a letter or blank.
    #[display("'{letter}' is not a valid tile")]
    InvalidLetter {
        /// The offending character.
        letter: char,
    },

    /// More tiles were requested than the supply holds.
    #[display("cannot deal {requested} tiles, only {available} left")]
    NotEnoughTiles {
        /// Tiles requested.
        requested: usize,
        /// Tiles remaining.
        available: usize,
    },
}
