//! Head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other on one position,
//! with an optional seeded random opening prefix so repeated games diverge.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;
use tracing::info;

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::chess_types::{Color, GameStatus};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_generator::{game_status, generate_legal_moves};
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWinCheckmate,
    BlackWinCheckmate,
    DrawStalemate,
    DrawFiftyMoveRule,
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWinCheckmate { player: PlayerId, color: Color },
    Draw(MatchOutcome),
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
    pub go_params: GoParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            opening_min_plies: 2,
            opening_max_plies: 6,
            go_params: GoParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: GameState,
    pub opening_moves_lan: Vec<String>,
    pub played_moves_lan: Vec<String>,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            avg_ns_per_move_ms(self.player1_total_time_ns, self.player1_moves),
            avg_ns_per_move_ms(self.player2_total_time_ns, self.player2_moves),
        )
    }
}

/// Play one seeded match from the standard start, `white` moving first.
pub fn play_engine_match(
    white: &mut dyn Engine,
    black: &mut dyn Engine,
    seed: u64,
    config: &MatchConfig,
) -> ChessResult<MatchResult> {
    let mut state = GameState::new_game();
    let opening_moves_lan = apply_seeded_random_opening(
        &mut state,
        seed,
        config.opening_min_plies,
        config.opening_max_plies,
    )?;
    play_from_state(state, white, black, config, opening_moves_lan)
}

/// Play one match from a caller-provided position, without a random opening.
pub fn play_engine_match_from_state(
    start_state: GameState,
    white: &mut dyn Engine,
    black: &mut dyn Engine,
    config: &MatchConfig,
) -> ChessResult<MatchResult> {
    play_from_state(start_state, white, black, config, Vec::new())
}

fn play_from_state(
    mut state: GameState,
    white: &mut dyn Engine,
    black: &mut dyn Engine,
    config: &MatchConfig,
    opening_moves_lan: Vec<String>,
) -> ChessResult<MatchResult> {
    white.new_game();
    black.new_game();

    let mut result = MatchResult {
        outcome: MatchOutcome::DrawMaxPlies,
        final_state: GameState::new_empty(),
        opening_moves_lan,
        played_moves_lan: Vec::new(),
        white_move_count: 0,
        black_move_count: 0,
        white_total_time_ns: 0,
        black_total_time_ns: 0,
    };

    for _ in 0..config.max_plies {
        let mover = state.side_to_move;
        match game_status(&mut state, mover) {
            GameStatus::Checkmate => {
                result.outcome = match mover {
                    Color::Light => MatchOutcome::BlackWinCheckmate,
                    Color::Dark => MatchOutcome::WhiteWinCheckmate,
                };
                break;
            }
            GameStatus::Stalemate => {
                result.outcome = MatchOutcome::DrawStalemate;
                break;
            }
            GameStatus::Normal | GameStatus::Check => {}
        }
        if state.halfmove_clock >= 100 {
            result.outcome = MatchOutcome::DrawFiftyMoveRule;
            break;
        }

        let legal_moves = generate_legal_moves(&mut state, mover);
        let started = Instant::now();
        let out = match mover {
            Color::Light => white.choose_move(&mut state, &config.go_params)?,
            Color::Dark => black.choose_move(&mut state, &config.go_params)?,
        };
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Color::Light => {
                result.white_move_count += 1;
                result.white_total_time_ns += elapsed_ns;
            }
            Color::Dark => {
                result.black_move_count += 1;
                result.black_total_time_ns += elapsed_ns;
            }
        }

        let Some(chosen) = out.best_move.filter(|mv| legal_moves.contains(mv)) else {
            let text = out
                .best_move
                .map(move_to_long_algebraic)
                .unwrap_or_else(|| "(none)".to_owned());
            return Err(ChessError::InvalidMoveText(text));
        };
        result.played_moves_lan.push(move_to_long_algebraic(chosen));
        make_move(&mut state, chosen)?;
    }

    info!(
        outcome = ?result.outcome,
        plies = result.played_moves_lan.len(),
        "match finished"
    );
    result.final_state = state;
    Ok(result)
}

/// Play a series and aggregate wins and draws per player.
///
/// Colors are drawn per game from a generator seeded with `base_seed`.
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: &MatchSeriesConfig,
) -> ChessResult<MatchSeriesStats>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_white = color_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        let mut player1 = player1_factory();
        let mut player2 = player2_factory();

        let result = if player1_is_white {
            play_engine_match(player1.as_mut(), player2.as_mut(), seed, &config.per_game)?
        } else {
            play_engine_match(player2.as_mut(), player1.as_mut(), seed, &config.per_game)?
        };

        let (p1_moves, p1_ns, p2_moves, p2_ns) = if player1_is_white {
            (
                result.white_move_count,
                result.white_total_time_ns,
                result.black_move_count,
                result.black_total_time_ns,
            )
        } else {
            (
                result.black_move_count,
                result.black_total_time_ns,
                result.white_move_count,
                result.white_total_time_ns,
            )
        };
        stats.player1_moves += p1_moves;
        stats.player1_total_time_ns += p1_ns;
        stats.player2_moves += p2_moves;
        stats.player2_total_time_ns += p2_ns;

        let winner = match result.outcome {
            MatchOutcome::WhiteWinCheckmate => Some(Color::Light),
            MatchOutcome::BlackWinCheckmate => Some(Color::Dark),
            _ => None,
        };
        let mapped = match winner {
            Some(color) => {
                let player = if (color == Color::Light) == player1_is_white {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                };
                SeriesOutcome::PlayerWinCheckmate { player, color }
            }
            None => {
                stats.draws += 1;
                SeriesOutcome::Draw(result.outcome)
            }
        };
        info!(game = i + 1, seed, result = ?mapped, "series game finished");
        stats.outcomes.push(mapped);
    }

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

fn apply_seeded_random_opening(
    state: &mut GameState,
    seed: u64,
    min_plies: u8,
    max_plies: u8,
) -> ChessResult<Vec<String>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut opening_moves_lan = Vec::<String>::new();

    let low = min_plies.min(max_plies);
    let high = max_plies.max(min_plies);
    let target_plies = rng.random_range(low..=high);

    for _ in 0..target_plies {
        let side = state.side_to_move;
        let legal_moves = generate_legal_moves(state, side);
        if legal_moves.is_empty() {
            break;
        }
        let chosen = legal_moves[rng.random_range(0..legal_moves.len())];
        opening_moves_lan.push(move_to_long_algebraic(chosen));
        make_move(state, chosen)?;
    }

    Ok(opening_moves_lan)
}
