use std::path::PathBuf;

use anyhow::Context;
use rand::Rng as _;
use tilevo_engine::{Board, BoardSeed};
use tilevo_evaluator::session_evaluator::Session;

use crate::model::NetworkModel;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Path to the model file (JSON format)
    model_path: PathBuf,
    /// Board seed as 32 hex characters (random if omitted)
    #[arg(long)]
    seed: Option<BoardSeed>,
    /// Only print the summary
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        model_path,
        seed,
        quiet,
    } = arg;

    let model = NetworkModel::open(model_path)?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut network = model.network;
    let mut board = Board::new(model.board, seed).context("Invalid board in model")?;

    let mut session = Session::start(&mut network, &mut board);
    if !quiet {
        println!("Start (seed {seed}):\n{}", session.board());
    }
    while let Some(turn) = session.step().context("Failed to play turn")? {
        if *quiet {
            continue;
        }
        let moves = turn
            .attempts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" -> ");
        println!(
            "Turn {}: {moves}, score {}{}",
            session.turns(),
            turn.score,
            if turn.effective { "" } else { " (no progress)" }
        );
        println!("{}", session.board());
    }

    let outcome = session.outcome();
    eprintln!("Model: {}", model.name);
    eprintln!("  Seed: {seed}");
    eprintln!("  Result: {}", outcome.state);
    eprintln!("  Score: {}", outcome.score);
    eprintln!("  Turns: {}", outcome.turns);
    eprintln!("  Max tile: {}", outcome.max_tile);
    eprintln!("  Wins: {}", outcome.wins);

    Ok(())
}
