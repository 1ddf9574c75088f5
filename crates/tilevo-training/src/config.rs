use serde::{Deserialize, Serialize};
use tilevo_engine::BoardConfig;
use tilevo_evaluator::session_evaluator::DEFAULT_HIGH_SCORE_THRESHOLD;
use tilevo_network::Topology;

use crate::{ConfigError, genetic::MutationRatePolicy};

/// Everything a training run is built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    /// Mutation rate used until the policy first adjusts it.
    pub mutation_rate: f64,
    pub mutation_policy: MutationRatePolicy,
    pub board: BoardConfig,
    pub topology: Topology,
    pub high_score_threshold: u32,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            generations: 30,
            mutation_rate: 0.05,
            mutation_policy: MutationRatePolicy::default(),
            board: BoardConfig::default(),
            topology: Topology::default(),
            high_score_threshold: DEFAULT_HIGH_SCORE_THRESHOLD,
        }
    }
}

impl EvolutionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.generations == 0 {
            return Err(ConfigError::NoGenerations);
        }
        for rate in [
            self.mutation_rate,
            self.mutation_policy.explore_rate,
            self.mutation_policy.settle_rate,
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::MutationRate { rate });
            }
        }
        self.board.validate()?;
        self.topology.validate()?;
        if self.topology.input_size != self.board.cell_count() {
            return Err(ConfigError::InputSize {
                input_size: self.topology.input_size,
                cell_count: self.board.cell_count(),
            });
        }
        Ok(())
    }
}
