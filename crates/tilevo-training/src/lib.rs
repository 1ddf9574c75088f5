//! Evolves move-choosing networks with a genetic algorithm.
//!
//! # How Training Works
//!
//! 1. **Population** - create individuals with random networks
//! 2. **Evaluation** - every individual plays one session, in parallel
//! 3. **Fitness** - the session's final score
//! 4. **Ranking** - stable sort by fitness, best first
//! 5. **Reproduction** - breed the best individual with each rank and mutate the children
//! 6. **Repeat** - for the configured number of generations
//!
//! # Architecture
//!
//! ```text
//! Trainer (generation loop)
//!     ↓ drives
//! Population ── evaluate_fitness ──→ SessionEvaluator (tilevo-evaluator)
//!     ↓ ranked
//! PopulationEvolver ── breed / mutate ──→ genome
//! ```
//!
//! Every random decision (initial networks, board seeds, mutation draws)
//! comes from the single generator passed to [`Trainer`], so a run is
//! reproducible from one seed.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//! use tilevo_training::{EvolutionConfig, Trainer};
//!
//! let config = EvolutionConfig {
//!     population_size: 6,
//!     generations: 2,
//!     ..EvolutionConfig::default()
//! };
//! let mut rng = Pcg32::seed_from_u64(42);
//! let mut trainer = Trainer::new(config, &mut rng).unwrap();
//! trainer
//!     .run(&mut rng, |report| {
//!         println!("#{} best {}", report.generation, report.stats.best);
//!     })
//!     .unwrap();
//! let best = trainer.best().unwrap();
//! assert_eq!(best.network().topology(), config.topology);
//! ```

use tilevo_engine::BoardConfigError;
use tilevo_evaluator::SessionError;
use tilevo_network::{TopologyError, TopologyMismatchError};

pub use self::{config::*, trainer::*};

mod config;
pub mod genetic;
pub mod genome;
mod trainer;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ConfigError {
    #[display("population must not be empty")]
    EmptyPopulation,
    #[display("at least one generation is required")]
    NoGenerations,
    #[display("mutation rate {rate} is outside [0, 1]")]
    MutationRate { rate: f64 },
    #[display("network has {input_size} inputs but the board has {cell_count} cells")]
    InputSize { input_size: usize, cell_count: usize },
    #[display("invalid board configuration: {_0}")]
    #[from]
    Board(BoardConfigError),
    #[display("invalid network topology: {_0}")]
    #[from]
    Topology(TopologyError),
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum EvolutionError {
    #[display("session failed: {_0}")]
    #[from]
    Session(SessionError),
    #[display("cannot breed: {_0}")]
    #[from]
    Breed(TopologyMismatchError),
    #[display("population is empty")]
    EmptyPopulation,
}
