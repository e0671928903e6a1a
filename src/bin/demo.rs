use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use tictactoe_minimax::ai::choose_move;
use tictactoe_minimax::config::AppConfig;
use tictactoe_minimax::game::{Board, Player};

/// Engine self-play harness: construct a board, let the move finder play both
/// sides, and print every position. Useful as a smoke test of the core.
#[derive(Parser)]
#[command(name = "demo", about = "Watch the tic-tac-toe engine play itself")]
struct Cli {
    /// Override the board dimension
    #[arg(long)]
    dim: Option<usize>,

    /// Fix the RNG seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(dim) = cli.dim {
        config.game.dimension = dim;
    }
    if let Some(seed) = cli.seed {
        config.engine.seed = Some(seed);
    }
    config.validate()?;

    let mut rng = match config.engine.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let cancel = AtomicBool::new(false);

    let mut board = Board::new(config.game.dimension);
    println!("{board}");

    let mut player = board.turn();
    while let Some(mv) = choose_move(&mut board, player, &cancel, &mut rng)? {
        println!();
        println!("{} plays ({}, {})", player.name(), mv.row, mv.col);
        println!("{board}");
        player = player.other();
        board.set_turn(player);
    }

    println!();
    println!("Final result: {}", board.result());
    Ok(())
}
