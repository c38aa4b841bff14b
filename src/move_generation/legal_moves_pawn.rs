use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{square_delta, MoveIntent};

/// Pawn reach for a pawn of `color` standing on `from`.
///
/// Pushes need empty squares, the double push only from the start row and
/// with the intermediate square empty. Diagonal steps need an enemy piece on
/// the destination or the destination being the en-passant target with an
/// enemy pawn behind it.
pub fn pawn_reaches(
    game_state: &GameState,
    color: Color,
    from: Square,
    to: Square,
    intent: MoveIntent,
) -> bool {
    let dir = color.pawn_direction();
    let (d_row, d_col) = square_delta(from, to);

    if intent == MoveIntent::Attack {
        return d_row == dir && d_col.abs() == 1;
    }

    let target = game_state.piece_at(to);

    if d_col == 0 {
        if target.is_some() {
            return false;
        }
        if d_row == dir {
            return true;
        }
        if d_row == 2 * dir && row_of(from) == color.pawn_start_row() {
            return offset_square(from, dir, 0).is_some_and(|mid| game_state.is_empty(mid));
        }
        return false;
    }

    if d_row != dir || d_col.abs() != 1 {
        return false;
    }

    match target {
        Some(piece) => piece.color != color,
        None => is_en_passant_capture(game_state, color, to),
    }
}

/// `to` is the en-passant target and an enemy pawn sits just behind it.
pub fn is_en_passant_capture(game_state: &GameState, color: Color, to: Square) -> bool {
    if game_state.en_passant_square != Some(to) {
        return false;
    }
    en_passant_victim_square(color, to)
        .and_then(|sq| game_state.piece_at(sq))
        .is_some_and(|piece| piece.color != color && piece.kind == PieceKind::Pawn)
}

/// Square of the pawn removed by an en-passant capture landing on `to`.
#[inline]
pub fn en_passant_victim_square(color: Color, to: Square) -> Option<Square> {
    offset_square(to, -color.pawn_direction(), 0)
}
