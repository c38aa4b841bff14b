//! Standalone engine-vs-engine series runner.
//!
//! `cargo run --release --bin engine_match_series -- --games 10 --depth1 2 --depth2 1`

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rook_engine::chess_errors::ChessResult;
use rook_engine::engines::engine_negamax::NegamaxEngine;
use rook_engine::engines::engine_random::RandomEngine;
use rook_engine::engines::engine_trait::Engine;
use rook_engine::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play a seeded series between two engines", long_about = None)]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: u16,

    #[arg(long, default_value_t = 1234)]
    seed: u64,

    #[arg(long, default_value_t = 200)]
    max_plies: u16,

    /// Player 1 search depth; 0 plays random moves.
    #[arg(long, default_value_t = 2)]
    depth1: u8,

    /// Player 2 search depth; 0 plays random moves.
    #[arg(long, default_value_t = 1)]
    depth2: u8,
}

fn engine_for_depth(depth: u8, seed: u64) -> Box<dyn Engine> {
    if depth == 0 {
        Box::new(RandomEngine::with_seed(seed))
    } else {
        Box::new(NegamaxEngine::new(depth))
    }
}

fn main() -> ChessResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let stats = play_engine_match_series(
        || engine_for_depth(args.depth1, args.seed),
        || engine_for_depth(args.depth2, args.seed.wrapping_add(1)),
        &MatchSeriesConfig {
            games: args.games,
            base_seed: args.seed,
            per_game: MatchConfig {
                max_plies: args.max_plies,
                ..MatchConfig::default()
            },
        },
    )?;

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
