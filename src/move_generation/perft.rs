//! Perft node counting over the make/unmake move generator.
//!
//! Leaf statistics follow the usual perft table columns, with the one rules
//! difference of this engine: castling only checks the king's final square.

use crate::chess_errors::ChessResult;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::MoveGuard;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{generate_legal_moves, has_any_legal_move};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

/// Count leaf positions `depth` plies below the current position.
pub fn perft(game_state: &mut GameState, depth: u8) -> ChessResult<PerftCounts> {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return Ok(counts);
    }
    perft_recurse(game_state, depth, &mut counts)?;
    Ok(counts)
}

/// Nodes below each root move, in generator order.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> ChessResult<Vec<(Move, usize)>> {
    let side = game_state.side_to_move;
    let mut out = Vec::new();
    for mv in generate_legal_moves(game_state, side) {
        let mut guard = MoveGuard::new(game_state, mv)?;
        let counts = perft(&mut guard, depth.saturating_sub(1))?;
        out.push((mv, counts.nodes));
    }
    Ok(out)
}

fn perft_recurse(game_state: &mut GameState, depth: u8, counts: &mut PerftCounts) -> ChessResult<()> {
    let side = game_state.side_to_move;
    for mv in generate_legal_moves(game_state, side) {
        let mut guard = MoveGuard::new(game_state, mv)?;

        if depth > 1 {
            perft_recurse(&mut guard, depth - 1, counts)?;
            continue;
        }

        counts.nodes += 1;
        let undo = guard.undo_state();
        if undo.is_capture() {
            counts.captures += 1;
        }
        if undo.is_en_passant() {
            counts.en_passant += 1;
        }
        if undo.is_castling() {
            counts.castles += 1;
        }
        if mv.promotion.is_some() {
            counts.promotions += 1;
        }
        let defender = side.opposite();
        if is_king_in_check(&guard, defender) {
            counts.checks += 1;
            if !has_any_legal_move(&mut guard, defender) {
                counts.checkmates += 1;
            }
        }
    }
    Ok(())
}
