//! Genetic algorithm over fixed-topology networks.
//!
//! # Algorithm Overview
//!
//! Every generation:
//!
//! 1. **Evaluate Fitness** - each individual plays one session on its own board
//!    (one scoped thread per individual); its fitness is the final score
//! 2. **Rank** - stable sort by score, best first
//! 3. **Adapt** - [`MutationRatePolicy`] picks the mutation rate from the median score
//! 4. **Reproduce** - the lower five sixths are overwritten with children of the
//!    best individual and the individual at the mirrored rank
//!
//! # Reproduction Order
//!
//! Replacement happens in place: for `i` in `0..len * 5 / 6`, rank `len - 1 - i`
//! becomes `breed(rank 0, rank i)`. Once `i` passes the middle, rank `i` has
//! already been overwritten in this same pass, so those children are bred from
//! freshly created ones. The top sixth is never replaced.
//!
//! # Key Components
//!
//! - [`Individual`] - a network plus its last fitness
//! - [`Population`] - individuals, evaluated together
//! - [`PopulationEvolver`] - adaptive mutation rate and reproduction

use std::{iter, panic, thread};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tilevo_engine::BoardSeed;
use tilevo_evaluator::{
    SessionError,
    session_evaluator::{MOVE_BUDGET, SessionEvaluator, SessionOutcome},
};
use tilevo_network::{Network, Topology, TopologyError, TopologyMismatchError};

use crate::genome;

/// A single network in the population.
#[derive(Debug, Clone)]
pub struct Individual {
    network: Network,
    score: u32,
    outcome: Option<SessionOutcome>,
}

impl Individual {
    #[must_use]
    pub fn new(network: Network) -> Self {
        Self {
            network,
            score: 0,
            outcome: None,
        }
    }

    pub fn random<R>(topology: Topology, rng: &mut R) -> Result<Self, TopologyError>
    where
        R: Rng + ?Sized,
    {
        Ok(Self::new(Network::random(topology, rng)?))
    }

    #[must_use]
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Score reached in the last session (the fitness); 0 before evaluation.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Outcome of the last session, if this individual has played one.
    #[must_use]
    pub fn outcome(&self) -> Option<&SessionOutcome> {
        self.outcome.as_ref()
    }

    /// Ineffective turns left at the end of the last session.
    #[must_use]
    pub fn moves_left(&self) -> usize {
        self.outcome.map_or(MOVE_BUDGET, |outcome| outcome.moves_left)
    }

    fn play(&mut self, evaluator: &SessionEvaluator, seed: BoardSeed) -> Result<(), SessionError> {
        let outcome = evaluator.play_seeded(&mut self.network, seed)?;
        tracing::debug!(
            %seed,
            score = outcome.score,
            turns = outcome.turns,
            state = %outcome.state,
            "session finished"
        );
        self.score = outcome.score;
        self.outcome = Some(outcome);
        Ok(())
    }
}

/// Summary of the population's scores after ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessStats {
    pub best: u32,
    /// Score at rank `len / 2`.
    pub median: u32,
    pub mean: f64,
    pub worst: u32,
}

#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates `count` individuals with random networks.
    pub fn random<R>(count: usize, topology: Topology, rng: &mut R) -> Result<Self, TopologyError>
    where
        R: Rng + ?Sized,
    {
        let individuals = (0..count)
            .map(|_| Individual::random(topology, rng))
            .collect::<Result<_, _>>()?;
        Ok(Self { individuals })
    }

    #[must_use]
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Best individual, assuming the population is ranked.
    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.first()
    }

    #[must_use]
    pub fn is_ranked(&self) -> bool {
        self.individuals.is_sorted_by(|a, b| a.score >= b.score)
    }

    /// Plays one session per individual in parallel, then ranks them.
    ///
    /// Board seeds are drawn from `rng` up front, one per individual in rank
    /// order, so the result depends only on `rng` and the current networks.
    /// Individuals with equal scores keep their relative order.
    pub fn evaluate_fitness<R>(
        &mut self,
        evaluator: &SessionEvaluator,
        rng: &mut R,
    ) -> Result<(), SessionError>
    where
        R: Rng + ?Sized,
    {
        let seeds = (0..self.individuals.len())
            .map(|_| rng.random::<BoardSeed>())
            .collect::<Vec<_>>();

        let results = thread::scope(|s| {
            let handles = iter::zip(&mut self.individuals, seeds)
                .map(|(ind, seed)| s.spawn(move || ind.play(evaluator, seed)))
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| panic::resume_unwind(payload))
                })
                .collect::<Vec<_>>()
        });
        results.into_iter().collect::<Result<(), _>>()?;

        self.rank();
        Ok(())
    }

    fn rank(&mut self) {
        // stable, so ties keep their previous order
        self.individuals.sort_by(|a, b| b.score.cmp(&a.score));
    }

    #[must_use]
    pub fn compute_fitness_stats(&self) -> Option<FitnessStats> {
        let best = self.individuals.first()?.score;
        let worst = self.individuals.last()?.score;
        let median = self.individuals[self.individuals.len() / 2].score;
        #[expect(clippy::cast_precision_loss)]
        let mean = self
            .individuals
            .iter()
            .map(|ind| f64::from(ind.score))
            .sum::<f64>()
            / self.individuals.len() as f64;
        Some(FitnessStats {
            best,
            median,
            mean,
            worst,
        })
    }
}

/// Hysteresis rule that picks the mutation rate from the median score.
///
/// A struggling population (median below `low_median`) mutates at
/// `explore_rate`; once the median clears `high_median` the rate drops back
/// to `settle_rate`. In between the current rate is kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationRatePolicy {
    pub low_median: u32,
    pub high_median: u32,
    pub explore_rate: f64,
    pub settle_rate: f64,
}

impl Default for MutationRatePolicy {
    fn default() -> Self {
        Self {
            low_median: 2000,
            high_median: 2200,
            explore_rate: 0.20,
            settle_rate: 0.05,
        }
    }
}

impl MutationRatePolicy {
    #[must_use]
    pub fn next_rate(&self, current: f64, median: u32) -> f64 {
        if median < self.low_median {
            self.explore_rate
        } else if median > self.high_median {
            self.settle_rate
        } else {
            current
        }
    }
}

/// What one [`PopulationEvolver::evolve`] call did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolutionStep {
    /// Mutation rate the offspring were produced with.
    pub mutation_rate: f64,
    pub offspring: usize,
    pub mutated: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationEvolver {
    /// Current mutation probability; updated by [`Self::evolve`].
    pub mutation_rate: f64,
    pub policy: MutationRatePolicy,
}

impl PopulationEvolver {
    #[must_use]
    pub fn new(mutation_rate: f64, policy: MutationRatePolicy) -> Self {
        Self {
            mutation_rate,
            policy,
        }
    }

    /// Replaces the lower five sixths of a ranked population with offspring.
    ///
    /// The mutation rate is adapted from the median score before breeding.
    /// See the [module docs](self) for the replacement order.
    pub fn evolve<R>(
        &mut self,
        population: &mut Population,
        rng: &mut R,
    ) -> Result<EvolutionStep, TopologyMismatchError>
    where
        R: Rng + ?Sized,
    {
        assert!(population.is_ranked());

        let len = population.len();
        if let Some(stats) = population.compute_fitness_stats() {
            let next = self.policy.next_rate(self.mutation_rate, stats.median);
            if next != self.mutation_rate {
                tracing::debug!(
                    median = stats.median,
                    from = self.mutation_rate,
                    to = next,
                    "mutation rate changed"
                );
            }
            self.mutation_rate = next;
        }

        let offspring = len * 5 / 6;
        let mut mutated = 0;
        let individuals = &mut population.individuals;
        for i in 0..offspring {
            let mut child = genome::breed(&individuals[0].network, &individuals[i].network)?;
            if genome::mutate(&mut child, self.mutation_rate, rng) {
                mutated += 1;
            }
            individuals[len - 1 - i] = Individual::new(child);
        }

        Ok(EvolutionStep {
            mutation_rate: self.mutation_rate,
            offspring,
            mutated,
        })
    }
}
