//! Pseudo-legality and attack detection.
//!
//! Nothing here looks at whether the mover's own king ends up in check;
//! that filter lives in the legal move generator and is built on top of
//! these functions, so attack detection never recurses into it.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::MoveIntent;
use crate::move_generation::legal_moves_bishop::bishop_reaches;
use crate::move_generation::legal_moves_king::king_reaches;
use crate::move_generation::legal_moves_knight::knight_reaches;
use crate::move_generation::legal_moves_pawn::pawn_reaches;
use crate::move_generation::legal_moves_queen::queen_reaches;
use crate::move_generation::legal_moves_rook::rook_reaches;

/// Movement geometry and occupancy rules of `piece` from `from` to `to`.
#[inline]
pub fn piece_reaches(
    game_state: &GameState,
    piece: Piece,
    from: Square,
    to: Square,
    intent: MoveIntent,
) -> bool {
    match piece.kind {
        PieceKind::Pawn => pawn_reaches(game_state, piece.color, from, to, intent),
        PieceKind::Knight => knight_reaches(game_state, from, to),
        PieceKind::Bishop => bishop_reaches(game_state, from, to),
        PieceKind::Rook => rook_reaches(game_state, from, to),
        PieceKind::Queen => queen_reaches(game_state, from, to),
        PieceKind::King => king_reaches(game_state, piece.color, from, to, intent),
    }
}

/// Pseudo-legal test for a move by `color`: source holds a `color` piece,
/// destination is not a friendly piece, and the piece's movement rules allow it.
pub fn is_pseudo_legal(game_state: &GameState, from: Square, to: Square, color: Color) -> bool {
    if from == to || from > 63 || to > 63 {
        return false;
    }
    let Some(piece) = game_state.piece_at(from) else {
        return false;
    };
    if piece.color != color {
        return false;
    }
    if game_state.piece_at(to).is_some_and(|target| target.color == color) {
        return false;
    }
    piece_reaches(game_state, piece, from, to, MoveIntent::Move)
}

/// First king of `color` in board-scan order.
#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    let king = Piece::new(color, PieceKind::King);
    game_state
        .board
        .iter()
        .position(|p| *p == Some(king))
        .map(|sq| sq as Square)
}

/// Any piece of `attacker_color` hits `square`.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    game_state
        .squares_of(attacker_color)
        .any(|(from, piece)| from != square && piece_reaches(game_state, piece, from, square, MoveIntent::Attack))
}

/// `false` when `color` has no king on the board.
#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("square should parse")
    }

    #[test]
    fn pseudo_legal_rejects_basic_violations() {
        let game = GameState::new_game();
        assert!(!is_pseudo_legal(&game, sq("e2"), sq("e2"), Color::Light));
        assert!(!is_pseudo_legal(&game, sq("e4"), sq("e5"), Color::Light));
        assert!(!is_pseudo_legal(&game, sq("e7"), sq("e5"), Color::Light));
        assert!(!is_pseudo_legal(&game, sq("a1"), sq("a2"), Color::Light));
        assert!(!is_pseudo_legal(&game, sq("f1"), sq("c4"), Color::Light));
        assert!(is_pseudo_legal(&game, sq("g1"), sq("f3"), Color::Light));
    }

    #[test]
    fn sliders_need_clear_path() {
        let game =
            GameState::from_fen("4k3/8/8/8/8/2p5/8/Q3K3 w - - 0 1").expect("FEN should parse");
        assert!(is_pseudo_legal(&game, sq("a1"), sq("a8"), Color::Light));
        assert!(is_pseudo_legal(&game, sq("a1"), sq("b2"), Color::Light));
        assert!(is_pseudo_legal(&game, sq("a1"), sq("c3"), Color::Light));
        assert!(!is_pseudo_legal(&game, sq("a1"), sq("d4"), Color::Light));
        assert!(!is_pseudo_legal(&game, sq("a1"), sq("b3"), Color::Light));
    }

    #[test]
    fn detects_check_from_each_piece_kind() {
        for fen in [
            "4k3/8/8/8/8/8/8/4K2r w - - 0 1",
            "4k3/8/8/8/8/8/3p4/4K3 w - - 0 1",
            "4k3/8/8/8/8/5n2/8/4K3 w - - 0 1",
            "4k3/8/8/b7/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/q3K3 w - - 0 1",
        ] {
            let game = GameState::from_fen(fen).expect("FEN should parse");
            assert!(is_king_in_check(&game, Color::Light), "{fen}");
        }

        let blocked =
            GameState::from_fen("4k3/8/8/b7/8/8/3P4/4K3 w - - 0 1").expect("FEN should parse");
        assert!(!is_king_in_check(&blocked, Color::Light));
    }

    #[test]
    fn pawn_push_does_not_give_check() {
        let game = GameState::from_fen("8/8/8/8/8/4p3/8/4K2k w - - 0 1").expect("FEN should parse");
        assert!(!is_square_attacked(&game, sq("e2"), Color::Dark));
        assert!(is_square_attacked(&game, sq("d2"), Color::Dark));
    }

    #[test]
    fn missing_king_is_never_in_check() {
        let game = GameState::from_fen("8/8/8/8/8/8/8/r6k w - - 0 1").expect("FEN should parse");
        assert_eq!(king_square(&game, Color::Light), None);
        assert!(!is_king_in_check(&game, Color::Light));
    }
}
