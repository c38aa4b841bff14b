//! Full legality filter and legal move enumeration.
//!
//! A move is fully legal when it is pseudo-legal and, after making it on the
//! shared board, the mover's own king is not attacked. The test is a
//! make, check, unmake cycle on the caller's position; nothing is copied.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::MoveGuard;
use crate::move_generation::legal_move_checks::{is_king_in_check, is_pseudo_legal};

/// Classify the move `from -> to` for `color`.
pub fn check_move(game_state: &mut GameState, from: Square, to: Square, color: Color) -> Legality {
    if !is_pseudo_legal(game_state, from, to, color) {
        return Legality::Illegal;
    }
    let Ok(guard) = MoveGuard::new(game_state, Move::new(from, to)) else {
        return Legality::Illegal;
    };
    if is_king_in_check(&guard, color) {
        Legality::LeavesKingInCheck
    } else {
        Legality::Legal
    }
}

#[inline]
pub fn is_legal(game_state: &mut GameState, from: Square, to: Square, color: Color) -> bool {
    check_move(game_state, from, to, color) == Legality::Legal
}

/// All fully legal moves of `color`.
///
/// Ordered row-major by source square, then by destination square. A pawn
/// move onto the last row appears once per promotion piece, queen first.
pub fn generate_legal_moves(game_state: &mut GameState, color: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for from in 0..64u8 {
        let Some(piece) = game_state.piece_at(from) else {
            continue;
        };
        if piece.color != color {
            continue;
        }
        for to in 0..64u8 {
            if !is_legal(game_state, from, to, color) {
                continue;
            }
            if piece.kind == PieceKind::Pawn && row_of(to) == color.promotion_row() {
                moves.extend(
                    PieceKind::PROMOTIONS
                        .iter()
                        .map(|kind| Move::with_promotion(from, to, *kind)),
                );
            } else {
                moves.push(Move::new(from, to));
            }
        }
    }
    moves
}

/// Stops at the first legal move found.
pub fn has_any_legal_move(game_state: &mut GameState, color: Color) -> bool {
    for from in 0..64u8 {
        if !game_state.piece_at(from).is_some_and(|p| p.color == color) {
            continue;
        }
        for to in 0..64u8 {
            if is_legal(game_state, from, to, color) {
                return true;
            }
        }
    }
    false
}

/// Check, checkmate and stalemate classification for `color`.
pub fn game_status(game_state: &mut GameState, color: Color) -> GameStatus {
    let in_check = is_king_in_check(game_state, color);
    let can_move = has_any_legal_move(game_state, color);
    match (in_check, can_move) {
        (true, false) => GameStatus::Checkmate,
        (false, false) => GameStatus::Stalemate,
        (true, true) => GameStatus::Check,
        (false, true) => GameStatus::Normal,
    }
}
