//! Board geometry: the 15x15 grid of multiplier squares.

use crate::tile::Tile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::instrument;

/// Rows and columns on the board.
pub const BOARD_SIZE: usize = 15;

/// Total number of squares.
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A row/column position on the board, zero-based from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Coordinate {
    /// Creates a coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns true if the coordinate lies on the board.
    pub fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// The four quadrant reflections of this coordinate.
    fn reflections(self) -> [Coordinate; 4] {
        let last = BOARD_SIZE - 1;
        [
            Coordinate::new(self.row, self.col),
            Coordinate::new(self.row, last - self.col),
            Coordinate::new(last - self.row, self.col),
            Coordinate::new(last - self.row, last - self.col),
        ]
    }
}

/// Multiplier class of a square.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SquareType {
    /// No bonus.
    Plain,
    /// Centre square where the first word starts.
    Star,
    /// Doubles the letter placed on it.
    DoubleLetter,
    /// Triples the letter placed on it.
    TripleLetter,
    /// Doubles the word covering it.
    DoubleWord,
    /// Triples the word covering it.
    TripleWord,
}

const STAR_SEEDS: &[Coordinate] = &[Coordinate::new(7, 7)];

const DOUBLE_LETTER_SEEDS: &[Coordinate] = &[
    Coordinate::new(0, 3),
    Coordinate::new(2, 6),
    Coordinate::new(3, 0),
    Coordinate::new(3, 7),
    Coordinate::new(6, 2),
    Coordinate::new(6, 6),
    Coordinate::new(7, 3),
];

const DOUBLE_WORD_SEEDS: &[Coordinate] = &[
    Coordinate::new(1, 1),
    Coordinate::new(2, 2),
    Coordinate::new(3, 3),
    Coordinate::new(4, 4),
];

const TRIPLE_LETTER_SEEDS: &[Coordinate] = &[
    Coordinate::new(1, 5),
    Coordinate::new(5, 1),
    Coordinate::new(5, 5),
];

const TRIPLE_WORD_SEEDS: &[Coordinate] = &[
    Coordinate::new(0, 0),
    Coordinate::new(0, 7),
    Coordinate::new(7, 0),
];

impl SquareType {
    /// Factor applied to a letter placed on this square.
    pub fn letter_multiplier(self) -> u32 {
        match self {
            SquareType::DoubleLetter => 2,
            SquareType::TripleLetter => 3,
            _ => 1,
        }
    }

    /// Factor applied to a word covering this square.
    pub fn word_multiplier(self) -> u32 {
        match self {
            SquareType::DoubleWord => 2,
            SquareType::TripleWord => 3,
            _ => 1,
        }
    }

    /// Upper-left quadrant coordinates; the rest follow by symmetry.
    fn seeds(self) -> &'static [Coordinate] {
        match self {
            SquareType::Plain => &[],
            SquareType::Star => STAR_SEEDS,
            SquareType::DoubleLetter => DOUBLE_LETTER_SEEDS,
            SquareType::TripleLetter => TRIPLE_LETTER_SEEDS,
            SquareType::DoubleWord => DOUBLE_WORD_SEEDS,
            SquareType::TripleWord => TRIPLE_WORD_SEEDS,
        }
    }

    /// Two-character label used by [`Board::display`].
    fn label(self) -> &'static str {
        match self {
            SquareType::Plain => "..",
            SquareType::Star => "**",
            SquareType::DoubleLetter => "DL",
            SquareType::TripleLetter => "TL",
            SquareType::DoubleWord => "DW",
            SquareType::TripleWord => "TW",
        }
    }
}

/// One square of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    /// Multiplier class.
    #[serde(rename = "type")]
    pub kind: SquareType,
    /// Tile placed here, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile: Option<Tile>,
}

impl Square {
    const fn empty(kind: SquareType) -> Self {
        Self { kind, tile: None }
    }
}

/// The 15x15 board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [[Square; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Builds the standard layout with no tiles placed.
    #[instrument]
    pub fn standard() -> Self {
        let mut squares = [[Square::empty(SquareType::Plain); BOARD_SIZE]; BOARD_SIZE];
        for kind in SquareType::iter() {
            for seed in kind.seeds() {
                for c in seed.reflections() {
                    squares[c.row][c.col] = Square::empty(kind);
                }
            }
        }
        Self { squares }
    }

    /// Returns the square at `at`, or `None` off the board.
    pub fn square(&self, at: Coordinate) -> Option<&Square> {
        self.squares.get(at.row).and_then(|row| row.get(at.col))
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Square; BOARD_SIZE]> {
        self.squares.iter()
    }

    /// Number of squares of each type.
    pub fn square_counts(&self) -> BTreeMap<SquareType, usize> {
        let mut counts = BTreeMap::new();
        for square in self.squares.iter().flatten() {
            *counts.entry(square.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Tiles currently placed on the board.
    pub fn placed_tiles(&self) -> Vec<Tile> {
        self.squares
            .iter()
            .flatten()
            .filter_map(|square| square.tile)
            .collect()
    }

    /// Formats the board as a human-readable grid.
    pub fn display(&self) -> String {
        self.squares
            .iter()
            .map(|row| {
                row.iter()
                    .map(|square| match square.tile {
                        Some(tile) => format!(" {tile}"),
                        None => square.kind.label().to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
