//! Fixed-topology feed-forward network that chooses board moves.
//!
//! A [`Network`] is an ordered list of layers (input, hidden..., output). Every
//! non-input node holds a bias and one weight per node of the previous layer.
//! The whole set of biases and weights is the genome the training crate
//! evolves; the topology never changes after creation.
//!
//! # Turn Flow
//!
//! 1. [`Network::scan_input`] - copy the board's cell values into the input layer
//! 2. [`Network::feed_forward`] - propagate activations (affine, no activation function)
//! 3. [`Network::ranked_moves`] / [`Network::best_move`] - read the output layer
//!
//! Output node `i` stands for [`Direction::ALL`](tilevo_engine::Direction::ALL)`[i]`.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//! use tilevo_engine::{Board, BoardConfig, BoardSeed};
//! use tilevo_network::{Network, Topology};
//!
//! let mut rng = Pcg32::seed_from_u64(1);
//! let mut network = Network::random(Topology::default(), &mut rng).unwrap();
//! let board = Board::new(BoardConfig::default(), BoardSeed::from_bytes([1; 16])).unwrap();
//!
//! network.scan_input(&board).unwrap();
//! network.feed_forward();
//! assert_eq!(network.ranked_moves()[0], network.best_move());
//! ```

pub use self::{network::*, topology::*};

mod network;
mod topology;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TopologyError {
    #[display("input layer must have at least one node")]
    EmptyInputLayer,
    #[display("hidden layers must have at least one node")]
    EmptyHiddenLayer,
    #[display("output layer must have {} nodes, got {actual}", tilevo_engine::Direction::LEN)]
    OutputSize { actual: usize },
    #[display("network must have an input and an output layer")]
    MissingLayers,
    #[display("layer {layer} has kind {actual}, expected {expected}")]
    LayerKind {
        layer: usize,
        expected: LayerKind,
        actual: LayerKind,
    },
    #[display("hidden layer {layer} has {actual} nodes, expected {expected}")]
    HiddenWidth {
        layer: usize,
        expected: usize,
        actual: usize,
    },
    #[display("node {node} of layer {layer} has {actual} weights, expected {expected}")]
    WeightCount {
        layer: usize,
        node: usize,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("network expects {expected} inputs but the board has {actual} cells")]
pub struct InputSizeMismatchError {
    pub expected: usize,
    pub actual: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TopologyMismatchError {
    #[display("networks have {left} and {right} layers")]
    LayerCount { left: usize, right: usize },
    #[display("layer {layer} is {left} in one network and {right} in the other")]
    LayerKind {
        layer: usize,
        left: LayerKind,
        right: LayerKind,
    },
    #[display("layer {layer} has {left} and {right} nodes")]
    NodeCount {
        layer: usize,
        left: usize,
        right: usize,
    },
    #[display("node {node} of layer {layer} has {left} and {right} weights")]
    WeightCount {
        layer: usize,
        node: usize,
        left: usize,
        right: usize,
    },
}
