//! Genetic operators on network parameters.
//!
//! A network's genome is its biases and weights; layer and node counts never
//! change. [`breed`] averages two parents, [`mutate`] rescales weights at
//! random. Both are used by
//! [`genetic::PopulationEvolver`](crate::genetic::PopulationEvolver).

use std::iter;

use rand::Rng;
use tilevo_network::{Layer, Network, TopologyMismatchError};

/// Range of the factor each weight is multiplied by when a mutation fires.
pub const MUTATION_FACTOR_RANGE: std::ops::Range<f32> = -1.5..1.5;

/// Creates a child whose every bias and weight is the mean of its parents'.
///
/// The child takes its structure from `p1`; the parents must share a topology.
pub fn breed(p1: &Network, p2: &Network) -> Result<Network, TopologyMismatchError> {
    p1.ensure_same_topology(p2)?;

    let mut child = p1.clone();
    let others = p2.layers().iter().flat_map(Layer::nodes);
    for (params, other) in iter::zip(child.params_mut(), others) {
        *params.bias = f32::midpoint(*params.bias, other.bias());
        for (weight, other_weight) in iter::zip(params.weights, other.weights()) {
            *weight = f32::midpoint(*weight, *other_weight);
        }
    }
    Ok(child)
}

/// Possibly mutates `network`, returning whether it did.
///
/// A single draw in `[0, 1)` decides for the whole network: if it is below
/// `rate`, every weight of every non-input layer is multiplied by its own
/// factor from [`MUTATION_FACTOR_RANGE`]. Biases are left alone.
pub fn mutate<R>(network: &mut Network, rate: f64, rng: &mut R) -> bool
where
    R: Rng + ?Sized,
{
    if rng.random::<f64>() >= rate {
        return false;
    }
    for params in network
        .params_mut()
        .filter(|params| !params.layer.is_input())
    {
        for weight in params.weights {
            *weight *= rng.random_range(MUTATION_FACTOR_RANGE);
        }
    }
    true
}
