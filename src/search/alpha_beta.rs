//! Depth-limited negamax with fail-hard alpha-beta pruning.
//!
//! The search walks the caller's position in place: every branch is made
//! through a [`MoveGuard`] and unmade on scope exit, so the position is
//! identical before and after a search. Moves are explored in generator
//! order; there is no transposition table and no iterative deepening.

use tracing::{debug, trace};

use crate::chess_errors::ChessResult;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::MoveGuard;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::search::board_scoring::BoardScorer;

/// Magnitude of a mated score before the distance adjustment.
pub const MATED_SCORE: i32 = 100_000;
/// Window bound wide enough to never be reached by a real score.
pub const SCORE_INFINITY: i32 = 1_000_000;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_depth: 1 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub depth: u8,
    pub nodes: u64,
}

struct SearchContext<'s, S: BoardScorer> {
    scorer: &'s S,
    max_depth: u8,
    nodes: u64,
}

/// Negamax score of the position for `color`, searched `depth` plies deep.
pub fn search<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    depth: u8,
    alpha: i32,
    beta: i32,
    color: Color,
) -> ChessResult<i32> {
    let mut ctx = SearchContext {
        scorer,
        max_depth: depth,
        nodes: 0,
    };
    negamax(&mut ctx, game_state, depth, alpha, beta, color)
}

/// Best move for `color` and its score.
///
/// The root loop keeps the first move reaching the highest score and never
/// cuts off, so the reported move is the one that produced the score.
pub fn find_best_move<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    config: SearchConfig,
    color: Color,
) -> ChessResult<SearchResult> {
    let depth = config.max_depth;
    let mut ctx = SearchContext {
        scorer,
        max_depth: depth,
        nodes: 0,
    };

    if depth == 0 {
        let best_score = negamax(&mut ctx, game_state, 0, -SCORE_INFINITY, SCORE_INFINITY, color)?;
        return Ok(SearchResult {
            best_move: None,
            best_score,
            depth,
            nodes: ctx.nodes,
        });
    }

    ctx.nodes += 1;
    let moves = generate_legal_moves(game_state, color);
    if moves.is_empty() {
        return Ok(SearchResult {
            best_move: None,
            best_score: terminal_score(game_state, color, depth, depth),
            depth,
            nodes: ctx.nodes,
        });
    }

    let mut alpha = -SCORE_INFINITY;
    let beta = SCORE_INFINITY;
    let mut best_move = None;
    let mut best_score = -SCORE_INFINITY;

    for mv in moves {
        let score = {
            let mut guard = MoveGuard::new(game_state, mv)?;
            -negamax(&mut ctx, &mut guard, depth - 1, -beta, -alpha, color.opposite())?
        };
        trace!(?mv, score, "root move scored");

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
        if score > alpha {
            alpha = score;
        }
    }

    debug!(
        depth,
        nodes = ctx.nodes,
        best_score,
        ?best_move,
        "search finished"
    );

    Ok(SearchResult {
        best_move,
        best_score,
        depth,
        nodes: ctx.nodes,
    })
}

fn negamax<S: BoardScorer>(
    ctx: &mut SearchContext<'_, S>,
    game_state: &mut GameState,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    color: Color,
) -> ChessResult<i32> {
    ctx.nodes += 1;

    if depth == 0 {
        return Ok(ctx.scorer.score(game_state, color));
    }

    let moves = generate_legal_moves(game_state, color);
    if moves.is_empty() {
        return Ok(terminal_score(game_state, color, ctx.max_depth, depth));
    }

    for mv in moves {
        let score = {
            let mut guard = MoveGuard::new(game_state, mv)?;
            -negamax(ctx, &mut guard, depth - 1, -beta, -alpha, color.opposite())?
        };

        if score >= beta {
            return Ok(beta);
        }
        if score > alpha {
            alpha = score;
        }
    }

    Ok(alpha)
}

/// Mated scores grow less negative the deeper in the tree they occur, so the
/// mating side prefers the quickest mate. Stalemate is a draw.
fn terminal_score(game_state: &GameState, color: Color, max_depth: u8, depth: u8) -> i32 {
    if is_king_in_check(game_state, color) {
        -MATED_SCORE + i32::from(max_depth - depth)
    } else {
        0
    }
}
