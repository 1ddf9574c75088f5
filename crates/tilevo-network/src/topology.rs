use serde::{Deserialize, Serialize};
use tilevo_engine::Direction;

use crate::TopologyError;

/// Layer sizes of a [`Network`](crate::Network).
///
/// Hidden layers all share the same width. The output layer always has one
/// node per [`Direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Topology {
    /// Number of input nodes; must match the board's cell count.
    pub input_size: usize,
    pub hidden_layers: usize,
    pub hidden_width: usize,
    pub output_size: usize,
}

impl Default for Topology {
    fn default() -> Self {
        Self {
            input_size: 16,
            hidden_layers: 1,
            hidden_width: 8,
            output_size: Direction::LEN,
        }
    }
}

impl Topology {
    /// Topology whose input layer covers every cell of a `board_size`² board.
    #[must_use]
    pub fn for_board(board_size: usize, hidden_layers: usize, hidden_width: usize) -> Self {
        Self {
            input_size: board_size.saturating_mul(board_size),
            hidden_layers,
            hidden_width,
            output_size: Direction::LEN,
        }
    }

    pub fn validate(&self) -> Result<(), TopologyError> {
        if self.input_size == 0 {
            return Err(TopologyError::EmptyInputLayer);
        }
        if self.hidden_layers > 0 && self.hidden_width == 0 {
            return Err(TopologyError::EmptyHiddenLayer);
        }
        if self.output_size != Direction::LEN {
            return Err(TopologyError::OutputSize {
                actual: self.output_size,
            });
        }
        Ok(())
    }

    /// Node count of every layer, input first.
    #[must_use]
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden_layers + 2);
        sizes.push(self.input_size);
        sizes.extend(std::iter::repeat_n(self.hidden_width, self.hidden_layers));
        sizes.push(self.output_size);
        sizes
    }

    /// Total number of biases and weights in non-input layers.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.layer_sizes()
            .windows(2)
            .map(|pair| pair[1] * (pair[0] + 1))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_four_by_four_board() {
        let topology = Topology::default();
        assert_eq!(topology, Topology::for_board(4, 1, 8));
        assert_eq!(topology.layer_sizes(), vec![16, 8, 4]);
        assert_eq!(topology.parameter_count(), 8 * 17 + 4 * 9);
    }

    #[test]
    fn test_validate() {
        assert!(Topology::default().validate().is_ok());
        assert_eq!(
            Topology {
                output_size: 3,
                ..Topology::default()
            }
            .validate(),
            Err(TopologyError::OutputSize { actual: 3 })
        );
        assert_eq!(
            Topology {
                input_size: 0,
                ..Topology::default()
            }
            .validate(),
            Err(TopologyError::EmptyInputLayer)
        );
        assert_eq!(
            Topology {
                hidden_width: 0,
                ..Topology::default()
            }
            .validate(),
            Err(TopologyError::EmptyHiddenLayer)
        );
    }

    #[test]
    fn test_no_hidden_layers() {
        let topology = Topology::for_board(3, 0, 0);
        assert!(topology.validate().is_ok());
        assert_eq!(topology.layer_sizes(), vec![9, 4]);
    }
}
