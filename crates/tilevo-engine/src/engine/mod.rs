//! Board state and move rules.
//!
//! - [`Board`] - the grid, score, win/game-over handling
//! - [`BoardConfig`] - construction parameters
//! - [`ShiftReport`] - what a single shift did
//! - [`BoardSeed`] - seed for deterministic tile spawning
//!
//! # Move Flow
//!
//! 1. Build a [`Board`] from a config and seed (places the starting tiles)
//! 2. Shift in a [`Direction`](crate::Direction); tiles slide and equal pairs merge once
//! 3. If anything changed, one new tile (2 or 4) spawns in a random empty cell
//! 4. Repeat until the board is full with no equal neighbours (game over)
//!
//! A merge that produces the configured win value resets the board in place and
//! re-places the starting tiles.

pub use self::{board::*, board_seed::*};

mod board;
mod board_seed;
