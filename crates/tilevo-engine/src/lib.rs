//! Game engine for a 2048-style sliding-tile merging game.
//!
//! - [`Board`] - square grid of tiles with shift/merge/spawn rules and game-over detection
//! - [`BoardConfig`] - board size, starting tile count and win value
//! - [`BoardSeed`] - seed for a board's private random source
//! - [`Direction`], [`Tile`], [`Position`] - the value types the board is built from
//!
//! # Example
//!
//! ```
//! use tilevo_engine::{Board, BoardConfig, BoardSeed, Direction};
//!
//! let mut board = Board::new(BoardConfig::default(), BoardSeed::from_bytes([7; 16])).unwrap();
//! assert_eq!(board.tile_count(), 2);
//!
//! let report = board.shift(Direction::Left);
//! if report.moved {
//!     assert!(report.spawned.is_some());
//! }
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardConfigError {
    #[display("board size must be at least 1")]
    InvalidSize,
    #[display("board size {size} exceeds {} cells", BoardConfig::MAX_CELL_COUNT)]
    TooLarge { size: usize },
    #[display("expected {expected} cell values, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },
    #[display("tile value {value} is not a power of two greater than one")]
    InvalidTileValue { value: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid direction index {index} (expected 0..{})", Direction::LEN)]
pub struct InvalidDirectionError {
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid seed: expected 32 hex characters, got {len}")]
    InvalidLength { len: usize },
    #[display("invalid seed: {input} is not hex")]
    InvalidHex { input: String },
}
