use std::iter;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tilevo_engine::Board;

use crate::{InputSizeMismatchError, Topology, TopologyError, TopologyMismatchError};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum LayerKind {
    Input,
    Hidden,
    Output,
}

/// A single neuron.
///
/// `value` is scratch state written by [`Network::scan_input`] and
/// [`Network::feed_forward`]; it is not part of the genome and is not
/// serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(skip)]
    value: f32,
    bias: f32,
    #[serde(default)]
    weights: Vec<f32>,
}

impl Node {
    #[must_use]
    pub fn new(bias: f32, weights: Vec<f32>) -> Self {
        Self {
            value: 0.0,
            bias,
            weights,
        }
    }

    fn input() -> Self {
        Self::new(0.0, vec![])
    }

    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[must_use]
    pub fn bias(&self) -> f32 {
        self.bias
    }

    /// One weight per node of the previous layer, in that layer's order.
    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

/// Mutable view of one node's genome.
///
/// Only parameter values are reachable through it; the weight slice cannot
/// grow or shrink.
#[derive(Debug)]
pub struct NodeParamsMut<'a> {
    pub layer: LayerKind,
    pub bias: &'a mut f32,
    pub weights: &'a mut [f32],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    kind: LayerKind,
    nodes: Vec<Node>,
}

impl Layer {
    #[must_use]
    pub fn new(kind: LayerKind, nodes: Vec<Node>) -> Self {
        Self { kind, nodes }
    }

    #[must_use]
    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Feed-forward network with a fixed [`Topology`].
///
/// The structure is validated on construction and deserialization, so every
/// `Network` has an input layer first, an output layer of
/// [`Direction::LEN`](tilevo_engine::Direction::LEN) nodes last, and hidden
/// layers of uniform width in between. Callers can edit biases and weights in place through
/// [`Network::params_mut`] but cannot change layer, node or weight counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNetwork")]
pub struct Network {
    layers: Vec<Layer>,
}

#[derive(Deserialize)]
struct RawNetwork {
    layers: Vec<Layer>,
}

impl TryFrom<RawNetwork> for Network {
    type Error = TopologyError;

    fn try_from(raw: RawNetwork) -> Result<Self, Self::Error> {
        Self::from_layers(raw.layers)
    }
}

impl Network {
    /// Creates a network with randomly initialized parameters.
    ///
    /// Non-input biases are drawn from `[0, input_size)`, hidden weights from
    /// `[-1, 1)` and output weights from `[0, 1)`. Input nodes carry neither.
    pub fn random<R>(topology: Topology, rng: &mut R) -> Result<Self, TopologyError>
    where
        R: Rng + ?Sized,
    {
        topology.validate()?;

        #[expect(clippy::cast_precision_loss)]
        let max_bias = topology.input_size as f32;

        let mut layers = Vec::with_capacity(topology.hidden_layers + 2);
        layers.push(Layer::new(
            LayerKind::Input,
            iter::repeat_with(Node::input)
                .take(topology.input_size)
                .collect(),
        ));

        let mut previous = topology.input_size;
        for _ in 0..topology.hidden_layers {
            let nodes = (0..topology.hidden_width)
                .map(|_| {
                    let bias = rng.random_range(0.0..max_bias);
                    let weights = (0..previous).map(|_| rng.random_range(-1.0..1.0)).collect();
                    Node::new(bias, weights)
                })
                .collect();
            layers.push(Layer::new(LayerKind::Hidden, nodes));
            previous = topology.hidden_width;
        }

        let nodes = (0..topology.output_size)
            .map(|_| {
                let bias = rng.random_range(0.0..max_bias);
                let weights = (0..previous).map(|_| rng.random_range(0.0..1.0)).collect();
                Node::new(bias, weights)
            })
            .collect();
        layers.push(Layer::new(LayerKind::Output, nodes));

        Ok(Self { layers })
    }

    /// Builds a network from explicit layers, checking the structure.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Self, TopologyError> {
        if layers.len() < 2 {
            return Err(TopologyError::MissingLayers);
        }
        let last = layers.len() - 1;
        let mut hidden_width = None;

        for (index, layer) in layers.iter().enumerate() {
            let expected = match index {
                0 => LayerKind::Input,
                i if i == last => LayerKind::Output,
                _ => LayerKind::Hidden,
            };
            if layer.kind != expected {
                return Err(TopologyError::LayerKind {
                    layer: index,
                    expected,
                    actual: layer.kind,
                });
            }
            if layer.is_empty() {
                return Err(match layer.kind {
                    LayerKind::Input => TopologyError::EmptyInputLayer,
                    LayerKind::Hidden => TopologyError::EmptyHiddenLayer,
                    LayerKind::Output => TopologyError::OutputSize { actual: 0 },
                });
            }
            if layer.kind.is_hidden() {
                let width = *hidden_width.get_or_insert(layer.len());
                if width != layer.len() {
                    return Err(TopologyError::HiddenWidth {
                        layer: index,
                        expected: width,
                        actual: layer.len(),
                    });
                }
            }

            let expected_weights = if index == 0 {
                0
            } else {
                layers[index - 1].len()
            };
            for (node_index, node) in layer.nodes.iter().enumerate() {
                if node.weights.len() != expected_weights {
                    return Err(TopologyError::WeightCount {
                        layer: index,
                        node: node_index,
                        expected: expected_weights,
                        actual: node.weights.len(),
                    });
                }
            }
        }

        let network = Self { layers };
        network.topology().validate()?;
        Ok(network)
    }

    #[must_use]
    pub fn topology(&self) -> Topology {
        let hidden = &self.layers[1..self.layers.len() - 1];
        Topology {
            input_size: self.input_layer().len(),
            hidden_layers: hidden.len(),
            hidden_width: hidden.first().map_or(0, Layer::len),
            output_size: self.output_layer().len(),
        }
    }

    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Parameters of every node, layer by layer, in node order.
    pub fn params_mut(&mut self) -> impl Iterator<Item = NodeParamsMut<'_>> {
        self.layers.iter_mut().flat_map(|layer| {
            let kind = layer.kind;
            layer.nodes.iter_mut().map(move |node| NodeParamsMut {
                layer: kind,
                bias: &mut node.bias,
                weights: &mut node.weights,
            })
        })
    }

    fn input_layer(&self) -> &Layer {
        &self.layers[0]
    }

    fn output_layer(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    /// Loads the board into the input layer.
    ///
    /// Each input node gets `cell_value - bias`, where an empty cell counts
    /// as 0. Cells are read in row-major order.
    #[expect(clippy::cast_precision_loss)]
    pub fn scan_input(&mut self, board: &Board) -> Result<(), InputSizeMismatchError> {
        let values = board.values();
        let input = &mut self.layers[0];
        if input.len() != values.len() {
            return Err(InputSizeMismatchError {
                expected: input.len(),
                actual: values.len(),
            });
        }
        for (node, value) in iter::zip(&mut input.nodes, values) {
            node.value = value as f32 - node.bias;
        }
        Ok(())
    }

    /// Propagates the input layer's values through every later layer.
    ///
    /// Each node's value is `Σ(prev.value × weight) - bias`, computed from
    /// scratch on every call. There is no activation function.
    pub fn feed_forward(&mut self) {
        for index in 1..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(index);
            let previous = &done[index - 1];
            for node in &mut rest[0].nodes {
                let sum: f32 = iter::zip(&previous.nodes, &node.weights)
                    .map(|(prev, weight)| prev.value * weight)
                    .sum();
                node.value = sum - node.bias;
            }
        }
    }

    /// Current values of the output layer, in
    /// [`Direction::ALL`](tilevo_engine::Direction::ALL) order.
    pub fn outputs(&self) -> impl Iterator<Item = f32> + '_ {
        self.output_layer().nodes.iter().map(Node::value)
    }

    /// Index of the largest output; the first one wins ties.
    #[must_use]
    pub fn best_move(&self) -> usize {
        let mut best = 0;
        let mut best_value = f32::NEG_INFINITY;
        for (index, value) in self.outputs().enumerate() {
            if index == 0 || value.total_cmp(&best_value).is_gt() {
                best = index;
                best_value = value;
            }
        }
        best
    }

    /// Output indices sorted by value, highest first.
    ///
    /// Equal outputs keep their index order, so the head of this list is
    /// always [`Network::best_move`].
    #[must_use]
    pub fn ranked_moves(&self) -> Vec<usize> {
        let outputs = self.outputs().collect::<Vec<_>>();
        let mut ranked = (0..outputs.len()).collect::<Vec<_>>();
        ranked.sort_by(|&a, &b| outputs[b].total_cmp(&outputs[a]));
        ranked
    }

    /// Checks that `other` has the same layer kinds, node counts and
    /// per-node weight counts, so the two can be combined parameter by
    /// parameter.
    pub fn ensure_same_topology(&self, other: &Self) -> Result<(), TopologyMismatchError> {
        if self.layers.len() != other.layers.len() {
            return Err(TopologyMismatchError::LayerCount {
                left: self.layers.len(),
                right: other.layers.len(),
            });
        }
        for (index, (left, right)) in iter::zip(&self.layers, &other.layers).enumerate() {
            if left.kind != right.kind {
                return Err(TopologyMismatchError::LayerKind {
                    layer: index,
                    left: left.kind,
                    right: right.kind,
                });
            }
            if left.len() != right.len() {
                return Err(TopologyMismatchError::NodeCount {
                    layer: index,
                    left: left.len(),
                    right: right.len(),
                });
            }
            for (node, (l, r)) in iter::zip(&left.nodes, &right.nodes).enumerate() {
                if l.weights.len() != r.weights.len() {
                    return Err(TopologyMismatchError::WeightCount {
                        layer: index,
                        node,
                        left: l.weights.len(),
                        right: r.weights.len(),
                    });
                }
            }
        }
        Ok(())
    }
}
