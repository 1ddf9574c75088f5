//! Plays full game sessions with a network and reports how they went.
//!
//! A session is the unit of fitness evaluation: the board is reset and
//! re-populated, then the network picks a move every turn until the board is
//! game over or the network stops making progress.
//!
//! # Turn Flow
//!
//! ```text
//! Scan (board -> input layer)
//!     ↓
//! Think (feed forward, rank the four outputs)
//!     ↓
//! Act (shift with the best-ranked direction, falling back to the next ones
//!      while the score does not change)
//!     ↓
//! Evaluate effect (refill or spend the move budget)
//! ```
//!
//! A turn whose attempts all leave the score unchanged spends one unit of the
//! move budget ([`session_evaluator::MOVE_BUDGET`]); a turn that changes the
//! score refills it. The session ends when the budget runs out or the board
//! is game over.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//! use tilevo_engine::BoardSeed;
//! use tilevo_evaluator::session_evaluator::SessionEvaluator;
//! use tilevo_network::{Network, Topology};
//!
//! let evaluator = SessionEvaluator::default();
//! let mut network = Network::random(Topology::default(), &mut Pcg32::seed_from_u64(3)).unwrap();
//! let outcome = evaluator
//!     .play_seeded(&mut network, BoardSeed::from_bytes([7; 16]))
//!     .unwrap();
//! assert!(outcome.state.is_finished());
//! ```

use tilevo_engine::{BoardConfigError, InvalidDirectionError};
use tilevo_network::InputSizeMismatchError;

pub mod session_evaluator;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SessionError {
    #[display("invalid board configuration: {_0}")]
    Board(BoardConfigError),
    #[display("network does not fit the board: {_0}")]
    Input(InputSizeMismatchError),
    #[display("network produced an unusable move: {_0}")]
    Direction(InvalidDirectionError),
}
