use std::io;

use caissa::chess::core::Player;
use caissa::chess::game::Game;
use caissa::strategy::RandomMover;
use caissa::Engine;
use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Opponent {
    /// Both sides are played through the input.
    None,
    /// The computer plays uniformly random legal moves.
    Random,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Self::White,
            Side::Black => Self::Black,
        }
    }
}

/// Plays chess from the standard input: one command per line (`show`,
/// `moves e2`, `select e2`, `move e2e4`, `undo`, `reset`, `status`, `quit`).
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// Computer opponent.
    #[arg(long, value_enum, default_value_t = Opponent::None)]
    opponent: Opponent,
    /// Side played by the computer opponent.
    #[arg(long, value_enum, default_value_t = Side::Black)]
    computer: Side,
    /// Seed for the computer opponent to make its moves reproducible.
    #[arg(long)]
    seed: Option<u64>,
    /// Starting position: piece placement and side to move, e.g.
    /// "4k3/8/8/8/8/8/4P3/4K3 w".
    #[arg(long)]
    fen: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    let game = match &config.fen {
        Some(fen) => Game::from_fen(fen)?,
        None => Game::new(),
    };

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    caissa::print_engine_info(&mut output)?;

    let mut engine = Engine::new(game, &mut input, &mut output);
    if matches!(config.opponent, Opponent::Random) {
        let strategy = config
            .seed
            .map_or_else(RandomMover::new, RandomMover::with_seed);
        engine = engine.with_computer(config.computer.into(), Box::new(strategy));
    }
    engine.run()
}
