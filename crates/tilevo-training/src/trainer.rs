//! Generation loop tying evaluation and evolution together.

use rand::Rng;
use tilevo_evaluator::session_evaluator::SessionEvaluator;

use crate::{
    ConfigError, EvolutionConfig, EvolutionError,
    genetic::{EvolutionStep, FitnessStats, Individual, Population, PopulationEvolver},
};

/// Result of one [`Trainer::run_generation`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationReport {
    /// Zero-based generation number.
    pub generation: usize,
    pub stats: FitnessStats,
    /// Reproduction that followed the evaluation; `None` after the last
    /// generation, whose ranked population is kept as is.
    pub evolution: Option<EvolutionStep>,
}

#[derive(Debug)]
pub struct Trainer {
    config: EvolutionConfig,
    evaluator: SessionEvaluator,
    evolver: PopulationEvolver,
    population: Population,
    generation: usize,
}

impl Trainer {
    /// Validates `config` and creates a random initial population.
    pub fn new<R>(config: EvolutionConfig, rng: &mut R) -> Result<Self, ConfigError>
    where
        R: Rng + ?Sized,
    {
        config.validate()?;
        let population = Population::random(config.population_size, config.topology, rng)?;
        let evaluator = SessionEvaluator::new(config.board)
            .with_high_score_threshold(config.high_score_threshold);
        let evolver = PopulationEvolver::new(config.mutation_rate, config.mutation_policy);
        tracing::info!(
            population = config.population_size,
            generations = config.generations,
            parameters = config.topology.parameter_count(),
            "training started"
        );
        Ok(Self {
            config,
            evaluator,
            evolver,
            population,
            generation: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Number of generations run so far.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.generation >= self.config.generations
    }

    /// Best individual of the last evaluated generation.
    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        if self.generation == 0 {
            return None;
        }
        self.population.best()
    }

    /// Evaluates and ranks the population, then breeds the next generation
    /// unless this was the last one.
    pub fn run_generation<R>(&mut self, rng: &mut R) -> Result<GenerationReport, EvolutionError>
    where
        R: Rng + ?Sized,
    {
        let generation = self.generation;
        self.population.evaluate_fitness(&self.evaluator, rng)?;
        let stats = self
            .population
            .compute_fitness_stats()
            .ok_or(EvolutionError::EmptyPopulation)?;
        tracing::info!(
            generation,
            best = stats.best,
            median = stats.median,
            "generation evaluated"
        );

        self.generation += 1;
        let evolution = if self.is_finished() {
            None
        } else {
            Some(self.evolver.evolve(&mut self.population, rng)?)
        };

        Ok(GenerationReport {
            generation,
            stats,
            evolution,
        })
    }

    /// Runs every remaining generation, calling `on_generation` after each.
    pub fn run<R, F>(&mut self, rng: &mut R, mut on_generation: F) -> Result<(), EvolutionError>
    where
        R: Rng + ?Sized,
        F: FnMut(&GenerationReport),
    {
        while !self.is_finished() {
            let report = self.run_generation(rng)?;
            on_generation(&report);
        }
        Ok(())
    }
}
