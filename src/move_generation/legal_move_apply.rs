//! In-place make/unmake of moves.
//!
//! `make_move` mutates the position and returns the [`UndoState`] needed to
//! restore it; `unmake_move` restores it exactly. Make/unmake pairs must nest
//! strictly (LIFO). [`MoveGuard`] ties the unmake to scope exit so early
//! returns and `?` propagation cannot leave a half-explored branch on the board.

use std::ops::{Deref, DerefMut};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{castling_rights_for_color, castling_right_for_rook_square, castling_side_for};
use crate::game_state::{chess_types::*, game_state::GameState, undo_state::UndoState};
use crate::move_generation::legal_moves_pawn::{en_passant_victim_square, is_en_passant_capture};

/// Apply `mv` for the piece standing on `mv.from`, whoever's turn it is.
///
/// A pawn reaching its last row is replaced by `mv.promotion` when given;
/// without one the pawn stays and the position enters the promotion-pending
/// sub-state.
pub fn make_move(game_state: &mut GameState, mv: Move) -> ChessResult<UndoState> {
    let moved_piece = game_state
        .piece_at(mv.from)
        .ok_or(ChessError::NoPieceOnSquare(mv.from))?;
    let color = moved_piece.color;

    let mut undo = UndoState {
        mv,
        moved_piece,
        captured: None,
        rook_hop: None,
        prev_side_to_move: game_state.side_to_move,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_square: game_state.en_passant_square,
        prev_pending_promotion: game_state.pending_promotion,
        prev_halfmove_clock: game_state.halfmove_clock,
    };

    // Captures.
    if let Some(target) = game_state.piece_at(mv.to) {
        undo.captured = Some((mv.to, target));
    } else if moved_piece.kind == PieceKind::Pawn
        && col_of(mv.from) != col_of(mv.to)
        && is_en_passant_capture(game_state, color, mv.to)
    {
        if let Some(victim_sq) = en_passant_victim_square(color, mv.to) {
            if let Some(victim) = game_state.piece_at(victim_sq) {
                undo.captured = Some((victim_sq, victim));
                game_state.set_piece(victim_sq, None);
            }
        }
    }

    // Move or promote.
    game_state.set_piece(mv.from, None);
    game_state.pending_promotion = None;
    let reaches_last_row =
        moved_piece.kind == PieceKind::Pawn && row_of(mv.to) == color.promotion_row();
    let placed = match mv.promotion {
        Some(kind) if reaches_last_row => Piece::new(color, kind),
        None if reaches_last_row => {
            game_state.pending_promotion = Some(PendingPromotion {
                square: mv.to,
                color,
            });
            moved_piece
        }
        _ => moved_piece,
    };
    game_state.set_piece(mv.to, Some(placed));

    // Castling rook hop.
    if moved_piece.kind == PieceKind::King {
        if let Some(side) = castling_side_for(color, mv.from, mv.to) {
            let rook = game_state.piece_at(side.rook_from);
            game_state.set_piece(side.rook_from, None);
            game_state.set_piece(side.rook_to, rook);
            undo.rook_hop = Some((side.rook_from, side.rook_to));
        }
        game_state.castling_rights &= !castling_rights_for_color(color);
    }

    // Rights vanish once anything leaves or lands on a rook home square.
    for square in [mv.from, mv.to] {
        if let Some(right) = castling_right_for_rook_square(square) {
            game_state.castling_rights &= !right;
        }
    }

    game_state.en_passant_square = None;
    if moved_piece.kind == PieceKind::Pawn && row_of(mv.from).abs_diff(row_of(mv.to)) == 2 {
        game_state.en_passant_square = offset_square(mv.from, color.pawn_direction(), 0);
    }

    if moved_piece.kind == PieceKind::Pawn || undo.captured.is_some() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }

    game_state.side_to_move = color.opposite();
    game_state.move_counter = game_state.move_counter.saturating_add(1);

    Ok(undo)
}

/// Restore the position from before the `make_move` that produced `undo`.
pub fn unmake_move(game_state: &mut GameState, undo: &UndoState) {
    let mv = undo.mv;

    game_state.set_piece(mv.to, None);
    game_state.set_piece(mv.from, Some(undo.moved_piece));
    if let Some((square, piece)) = undo.captured {
        game_state.set_piece(square, Some(piece));
    }
    if let Some((rook_from, rook_to)) = undo.rook_hop {
        let rook = game_state.piece_at(rook_to);
        game_state.set_piece(rook_to, None);
        game_state.set_piece(rook_from, rook);
    }

    game_state.side_to_move = undo.prev_side_to_move;
    game_state.castling_rights = undo.prev_castling_rights;
    game_state.en_passant_square = undo.prev_en_passant_square;
    game_state.pending_promotion = undo.prev_pending_promotion;
    game_state.halfmove_clock = undo.prev_halfmove_clock;
    game_state.move_counter = game_state.move_counter.saturating_sub(1);
}

/// A made move that is unmade when the guard goes out of scope.
///
/// Derefs to the position so the guarded board can be searched or queried
/// directly. Call [`MoveGuard::keep`] to leave the move on the board.
pub struct MoveGuard<'a> {
    game_state: &'a mut GameState,
    undo: UndoState,
    armed: bool,
}

impl<'a> MoveGuard<'a> {
    pub fn new(game_state: &'a mut GameState, mv: Move) -> ChessResult<Self> {
        let undo = make_move(game_state, mv)?;
        Ok(Self {
            game_state,
            undo,
            armed: true,
        })
    }

    #[inline]
    pub fn undo_state(&self) -> &UndoState {
        &self.undo
    }

    /// Disarm the guard and hand back the undo record.
    pub fn keep(mut self) -> UndoState {
        self.armed = false;
        self.undo.clone()
    }
}

impl Deref for MoveGuard<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        self.game_state
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut GameState {
        self.game_state
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            unmake_move(self.game_state, &self.undo);
        }
    }
}
