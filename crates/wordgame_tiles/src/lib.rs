//! Pure word-game data with no I/O or concurrency.
//!
//! - [`Tile`] and the standard [`DISTRIBUTION`] of 100 tiles
//! - [`TileSupply`], the shuffled pool tiles are dealt from and returned to
//! - [`Board`], the fixed 15x15 multiplier layout

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod supply;
mod tile;

pub use board::{BOARD_SIZE, Board, Coordinate, SQUARE_COUNT, Square, SquareType};
pub use supply::TileSupply;
pub use tile::{
    BLANK_CHAR, DISTRIBUTION, HAND_SIZE, STANDARD_TILE_COUNT, Tile, TileError, TileSpec, full_set,
    tally,
};
