use crate::game_state::chess_types::*;

/// Single undo record for `make_move` / `unmake_move`.
///
/// Holds everything `make_move` overwrote so the position can be restored
/// exactly, including a capture taken off a square other than the
/// destination (en passant) and the rook hop of a castling move.
#[derive(Debug, Clone)]
pub struct UndoState {
    pub mv: Move,
    pub moved_piece: Piece,
    pub captured: Option<(Square, Piece)>,
    pub rook_hop: Option<(Square, Square)>,

    pub prev_side_to_move: Color,
    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_pending_promotion: Option<PendingPromotion>,
    pub prev_halfmove_clock: u16,
}

impl UndoState {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        matches!(self.captured, Some((sq, _)) if sq != self.mv.to)
    }

    #[inline]
    pub fn is_castling(&self) -> bool {
        self.rook_hop.is_some()
    }
}
