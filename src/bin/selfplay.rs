use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use connect_four_ab::ai::{Agent, AlphaBetaAgent, RandomAgent};
use connect_four_ab::game::{GameOutcome, Player, State};

/// Pit the alpha-beta engine against a random mover or another engine.
#[derive(Parser)]
#[command(name = "selfplay", about = "Headless matches for the alpha-beta engine")]
struct Cli {
    /// Number of games; the engine alternates moving first
    #[arg(long, default_value_t = 20)]
    games: u32,

    /// Engine search depth in plies
    #[arg(long, default_value_t = 5)]
    depth: u32,

    /// Opponent: random or engine
    #[arg(long, default_value = "random")]
    opponent: String,

    /// Search depth for an engine opponent
    #[arg(long, default_value_t = 3)]
    opponent_depth: u32,

    /// Seed for the random opponent
    #[arg(long)]
    seed: Option<u64>,

    /// Search root moves in parallel
    #[arg(long)]
    parallel: bool,
}

#[derive(Default)]
struct Tally {
    engine_wins: u32,
    opponent_wins: u32,
    draws: u32,
    engine_moves: u32,
    engine_time: Duration,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.depth == 0 || cli.opponent_depth == 0 {
        bail!("search depths must be >= 1");
    }

    let mut tally = Tally::default();
    for game in 0..cli.games {
        let mut engine = if cli.parallel {
            AlphaBetaAgent::parallel(cli.depth)
        } else {
            AlphaBetaAgent::new(cli.depth)
        };
        let mut opponent: Box<dyn Agent> = match cli.opponent.as_str() {
            "random" => Box::new(match cli.seed {
                Some(seed) => RandomAgent::seeded(seed.wrapping_add(game as u64)),
                None => RandomAgent::new(),
            }),
            "engine" => Box::new(AlphaBetaAgent::new(cli.opponent_depth)),
            other => bail!("unknown opponent '{}' (expected 'random' or 'engine')", other),
        };

        let first = if game % 2 == 0 {
            Player::Engine
        } else {
            Player::Human
        };
        let outcome = play_game(first, &mut engine, opponent.as_mut(), &mut tally)
            .with_context(|| format!("playing game {}", game + 1))?;

        match outcome {
            GameOutcome::Winner(Player::Engine) => tally.engine_wins += 1,
            GameOutcome::Winner(Player::Human) => tally.opponent_wins += 1,
            GameOutcome::Draw => tally.draws += 1,
        }
        tracing::info!(game = game + 1, ?outcome, first = first.name(), "game finished");
    }

    println!("-------------------------------------------");
    println!(
        "AlphaBeta (depth {}) vs {}: {} games",
        cli.depth, cli.opponent, cli.games
    );
    println!(
        "  engine wins: {}  opponent wins: {}  draws: {}",
        tally.engine_wins, tally.opponent_wins, tally.draws
    );
    if tally.engine_moves > 0 {
        let avg = tally.engine_time.as_secs_f64() / tally.engine_moves as f64;
        println!("  average think time: {:.4}s over {} moves", avg, tally.engine_moves);
    }
    println!("-------------------------------------------");

    Ok(())
}

/// The engine plays `Player::Engine`; the opponent fills the other seat.
fn play_game(
    first: Player,
    engine: &mut AlphaBetaAgent,
    opponent: &mut dyn Agent,
    tally: &mut Tally,
) -> Result<GameOutcome> {
    let mut state = State::new(first);

    loop {
        if let Some(outcome) = state.outcome() {
            return Ok(outcome);
        }

        let column = match state.side_to_move() {
            Player::Engine => {
                let start = Instant::now();
                let column = engine.select_action(&state)?;
                tally.engine_time += start.elapsed();
                tally.engine_moves += 1;
                column
            }
            Player::Human => opponent.select_action(&state)?,
        };
        state.apply_move(column)?;
    }
}
