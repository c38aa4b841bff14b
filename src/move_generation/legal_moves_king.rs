use crate::game_state::chess_rules::castling_side_for;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{square_delta, MoveIntent};

/// King reach: one step in any direction, or castling when moving.
///
/// Castling needs the matching right, the king on its home square, a friendly
/// rook on the corner and every square strictly between king and rook empty.
/// Whether the king crosses an attacked square is not examined; only the
/// final square is checked by the full legality filter.
pub fn king_reaches(
    game_state: &GameState,
    color: Color,
    from: Square,
    to: Square,
    intent: MoveIntent,
) -> bool {
    let (d_row, d_col) = square_delta(from, to);
    if d_row.abs() <= 1 && d_col.abs() <= 1 {
        return true;
    }
    intent == MoveIntent::Move && d_row == 0 && d_col.abs() == 2 && can_castle(game_state, color, from, to)
}

pub fn can_castle(game_state: &GameState, color: Color, from: Square, to: Square) -> bool {
    let Some(side) = castling_side_for(color, from, to) else {
        return false;
    };
    if !game_state.has_castling_right(side.right) {
        return false;
    }
    if game_state.piece_at(side.king_from) != Some(Piece::new(color, PieceKind::King)) {
        return false;
    }
    if game_state.piece_at(side.rook_from) != Some(Piece::new(color, PieceKind::Rook)) {
        return false;
    }

    let row = row_of(side.king_from);
    let (lo, hi) = if col_of(side.king_from) < col_of(side.rook_from) {
        (col_of(side.king_from), col_of(side.rook_from))
    } else {
        (col_of(side.rook_from), col_of(side.king_from))
    };
    ((lo + 1)..hi).all(|col| game_state.is_empty(square_at(row, col)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("square should parse")
    }

    #[test]
    fn castling_requires_right_and_empty_squares() {
        let game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        assert!(king_reaches(&game, Color::Light, sq("e1"), sq("g1"), MoveIntent::Move));
        assert!(king_reaches(&game, Color::Light, sq("e1"), sq("c1"), MoveIntent::Move));
        assert!(!king_reaches(&game, Color::Light, sq("e1"), sq("g1"), MoveIntent::Attack));

        let no_rights =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1").expect("FEN should parse");
        assert!(!king_reaches(&no_rights, Color::Light, sq("e1"), sq("g1"), MoveIntent::Move));

        let blocked =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1").expect("FEN should parse");
        assert!(!king_reaches(&blocked, Color::Light, sq("e1"), sq("c1"), MoveIntent::Move));
    }

    #[test]
    fn castling_ignores_attacked_transit_square() {
        // Black rook on f8 covers f1; the transit square is not examined.
        let game =
            GameState::from_fen("4kr2/8/8/8/8/8/8/4K2R w K - 0 1").expect("FEN should parse");
        assert!(can_castle(&game, Color::Light, sq("e1"), sq("g1")));
    }
}
