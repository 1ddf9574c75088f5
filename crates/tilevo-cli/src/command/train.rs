use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use rand::Rng as _;
use tilevo_engine::{BoardConfig, BoardSeed};
use tilevo_network::Topology;
use tilevo_training::{EvolutionConfig, Trainer};

use crate::{model::NetworkModel, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Number of individuals per generation
    #[arg(long, default_value_t = 1000)]
    population: usize,
    /// Number of generations to run
    #[arg(long, default_value_t = 30)]
    generations: usize,
    /// Initial mutation probability
    #[arg(long, default_value_t = 0.05)]
    mutation_rate: f64,
    /// Width and height of the board
    #[arg(long, default_value_t = 4)]
    board_size: usize,
    /// Tiles placed when a board is (re)built
    #[arg(long, default_value_t = 2)]
    start_tiles: usize,
    /// Tile value that counts as a win
    #[arg(long, default_value_t = 4096)]
    win_value: u32,
    #[arg(long, default_value_t = 1)]
    hidden_layers: usize,
    #[arg(long, default_value_t = 8)]
    hidden_width: usize,
    /// Run seed as 32 hex characters (random if omitted)
    #[arg(long)]
    seed: Option<BoardSeed>,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl TrainArg {
    fn to_config(&self) -> EvolutionConfig {
        EvolutionConfig {
            population_size: self.population,
            generations: self.generations,
            mutation_rate: self.mutation_rate,
            board: BoardConfig {
                size: self.board_size,
                start_tiles: self.start_tiles,
                win_value: self.win_value,
            },
            topology: Topology::for_board(self.board_size, self.hidden_layers, self.hidden_width),
            ..EvolutionConfig::default()
        }
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let config = arg.to_config();
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = seed.rng();

    eprintln!("Run seed: {seed}");
    let mut trainer = Trainer::new(config, &mut rng).context("Invalid training configuration")?;
    trainer
        .run(&mut rng, |report| {
            eprintln!(
                "Generation: {:3}, best score: {:5}, median: {:5}, mean: {:8.1}, worst: {:5}",
                report.generation,
                report.stats.best,
                report.stats.median,
                report.stats.mean,
                report.stats.worst,
            );
            if let Some(step) = &report.evolution {
                eprintln!(
                    "  mutation rate {:.2}: {} offspring, {} mutated",
                    step.mutation_rate, step.offspring, step.mutated
                );
            }
        })
        .context("Training failed")?;

    let best = trainer
        .best()
        .context("Training produced no individuals")?;
    let model = NetworkModel {
        name: format!("tilevo-{seed}"),
        trained_at: Utc::now(),
        generations: config.generations,
        final_fitness: best.score(),
        seed,
        board: config.board,
        network: best.network().clone(),
    };
    Output::save_json(&model, arg.output.as_deref())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Final fitness: {}", model.final_fitness);
    if let Some(outcome) = best.outcome() {
        eprintln!(
            "  Best session: {} turns, max tile {}, {} wins",
            outcome.turns, outcome.max_tile, outcome.wins
        );
    }

    Ok(())
}
