//! Standard Algebraic Notation (SAN) for PGN import and export.
//!
//! Resolution deliberately takes the first legal candidate in board-scan
//! order instead of enforcing full disambiguation, so an ambiguous token
//! such as `Nd2` resolves to the knight scanned first (rank 8 toward rank 1,
//! file a toward file h).

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::king_home;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::MoveGuard;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{has_any_legal_move, is_legal};
use crate::utils::algebraic::{algebraic_to_square, file_char, file_index, rank_row, square_to_algebraic};

/// Resolve a SAN token to a coordinate move for `side`.
pub fn san_to_move(game_state: &mut GameState, san: &str, side: Color) -> ChessResult<Move> {
    let unresolved = || ChessError::UnresolvedSan(san.to_owned());
    let token = san
        .trim()
        .trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'));

    match token {
        "O-O" | "0-0" => return Ok(castle_move(side, 6)),
        "O-O-O" | "0-0-0" => return Ok(castle_move(side, 2)),
        _ => {}
    }

    let (body, promotion) = split_promotion(token).ok_or_else(unresolved)?;

    let mut chars = body.chars().peekable();
    let kind = match chars.peek().copied() {
        Some(c @ ('K' | 'Q' | 'R' | 'B' | 'N')) => {
            chars.next();
            PieceKind::from_letter(c).ok_or_else(unresolved)?
        }
        _ => PieceKind::Pawn,
    };

    let rest: Vec<char> = chars.filter(|c| !matches!(c, 'x' | ':' | '-')).collect();
    if rest.len() < 2 {
        return Err(unresolved());
    }
    let (hint, dest) = rest.split_at(rest.len() - 2);
    let dest: String = dest.iter().collect();
    let to = algebraic_to_square(&dest).map_err(|_| unresolved())?;

    let mut from_col = None;
    let mut from_row = None;
    for ch in hint {
        if let Some(col) = file_index(*ch) {
            from_col = Some(col);
        } else if let Some(row) = rank_row(*ch) {
            from_row = Some(row);
        } else {
            return Err(unresolved());
        }
    }

    if promotion.is_some() && (kind != PieceKind::Pawn || row_of(to) != side.promotion_row()) {
        return Err(unresolved());
    }

    let wanted = Piece::new(side, kind);
    for from in 0..64u8 {
        if game_state.piece_at(from) != Some(wanted) {
            continue;
        }
        if from_col.is_some_and(|col| col != col_of(from)) || from_row.is_some_and(|row| row != row_of(from)) {
            continue;
        }
        if is_legal(game_state, from, to, side) {
            return Ok(Move { from, to, promotion });
        }
    }

    Err(unresolved())
}

/// SAN text for a move described by its piece, capture and check flags.
///
/// Pawn captures carry the source file (`exd6`), castling is written
/// `O-O`/`O-O-O`, and a promotion choice is appended as `=Q`.
pub fn move_to_san(
    mv: Move,
    piece_kind: PieceKind,
    is_capture: bool,
    is_check: bool,
    is_checkmate: bool,
) -> String {
    let mut out = String::new();
    let col_diff = col_of(mv.to) as i8 - col_of(mv.from) as i8;

    if piece_kind == PieceKind::King && col_diff.abs() == 2 {
        out.push_str(if col_diff > 0 { "O-O" } else { "O-O-O" });
    } else {
        // Only pawn captures name the source file; pieces get no disambiguation.
        if piece_kind == PieceKind::Pawn {
            if is_capture {
                out.push(file_char(mv.from));
            }
        } else {
            out.push(piece_kind.letter().to_ascii_uppercase());
        }
        if is_capture {
            out.push('x');
        }
        out.push_str(&square_to_algebraic(mv.to));
        if let Some(kind) = mv.promotion {
            out.push('=');
            out.push(kind.letter().to_ascii_uppercase());
        }
    }

    if is_checkmate {
        out.push('#');
    } else if is_check {
        out.push('+');
    }
    out
}

/// SAN for `mv` as played in the current position.
///
/// Capture, check and mate are read off the board by making the move on the
/// caller's position and unmaking it again.
pub fn san_for_move(game_state: &mut GameState, mv: Move) -> ChessResult<String> {
    let piece = game_state
        .piece_at(mv.from)
        .ok_or(ChessError::NoPieceOnSquare(mv.from))?;
    let defender = piece.color.opposite();

    let mut guard = MoveGuard::new(game_state, mv)?;
    let is_capture = guard.undo_state().is_capture();
    let is_check = is_king_in_check(&guard, defender);
    let is_checkmate = is_check && !has_any_legal_move(&mut guard, defender);

    Ok(move_to_san(mv, piece.kind, is_capture, is_check, is_checkmate))
}

fn castle_move(side: Color, king_col: u8) -> Move {
    Move::new(king_home(side), square_at(side.back_row(), king_col))
}

/// Split `e8=Q` / `e8Q` into the move body and the promotion piece.
fn split_promotion(token: &str) -> Option<(&str, Option<PieceKind>)> {
    if let Some((body, piece)) = token.split_once('=') {
        let mut chars = piece.chars();
        let kind = chars.next().and_then(PieceKind::from_letter)?;
        if chars.next().is_some() || !kind.is_promotion_choice() {
            return None;
        }
        return Some((body, Some(kind)));
    }

    match token.chars().last() {
        Some(c @ ('Q' | 'R' | 'B' | 'N')) if token.len() > 2 => {
            let kind = PieceKind::from_letter(c)?;
            Some((&token[..token.len() - 1], Some(kind)))
        }
        _ => Some((token, None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_apply::make_move;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("square should parse")
    }

    #[test]
    fn resolves_pawn_and_piece_moves() {
        let mut game = GameState::new_game();
        assert_eq!(
            san_to_move(&mut game, "e4", Color::Light).expect("e4 should resolve"),
            Move::new(sq("e2"), sq("e4"))
        );
        assert_eq!(
            san_to_move(&mut game, "Nf3", Color::Light).expect("Nf3 should resolve"),
            Move::new(sq("g1"), sq("f3"))
        );
        assert!(matches!(
            san_to_move(&mut game, "Ke2", Color::Light),
            Err(ChessError::UnresolvedSan(_))
        ));
    }

    #[test]
    fn resolves_pawn_capture_with_file_hint() {
        let mut game = GameState::from_fen("4k3/8/8/3p4/2P1P3/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(
            san_to_move(&mut game, "exd5", Color::Light).expect("exd5 should resolve"),
            Move::new(sq("e4"), sq("d5"))
        );
        assert_eq!(
            san_to_move(&mut game, "cxd5", Color::Light).expect("cxd5 should resolve"),
            Move::new(sq("c4"), sq("d5"))
        );
    }

    #[test]
    fn ambiguous_token_takes_first_scanned_piece() {
        // Knights on b1 and f3 both reach d2; rank 3 is scanned before rank 1.
        let mut game = GameState::from_fen("4k3/8/8/8/8/5N2/8/1N2K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(
            san_to_move(&mut game, "Nd2", Color::Light).expect("Nd2 should resolve"),
            Move::new(sq("f3"), sq("d2"))
        );
        assert_eq!(
            san_to_move(&mut game, "Nbd2", Color::Light).expect("Nbd2 should resolve"),
            Move::new(sq("b1"), sq("d2"))
        );
    }

    #[test]
    fn resolves_castling_and_promotion() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").expect("FEN should parse");
        assert_eq!(
            san_to_move(&mut game, "O-O-O", Color::Dark).expect("castle should resolve"),
            Move::new(sq("e8"), sq("c8"))
        );

        let mut promo = GameState::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");
        assert_eq!(
            san_to_move(&mut promo, "a8=N+", Color::Light).expect("promotion should resolve"),
            Move::with_promotion(sq("a7"), sq("a8"), PieceKind::Knight)
        );
    }

    #[test]
    fn promotion_suffix_needs_a_pawn_reaching_the_last_rank() {
        let mut start = GameState::new_game();
        for san in ["e4=Q", "e4Q", "Nf3=Q", "e3=N"] {
            assert!(
                matches!(san_to_move(&mut start, san, Color::Light), Err(ChessError::UnresolvedSan(_))),
                "{san}"
            );
        }

        let mut rook = GameState::from_fen("k7/8/8/8/8/8/8/R6K w - - 0 1").expect("FEN should parse");
        assert!(san_to_move(&mut rook, "Ra7=Q", Color::Light).is_err());
        assert!(san_to_move(&mut rook, "Ra7", Color::Light).is_ok());
    }

    #[test]
    fn formats_san() {
        assert_eq!(
            move_to_san(Move::new(sq("e2"), sq("e4")), PieceKind::Pawn, false, false, false),
            "e4"
        );
        assert_eq!(
            move_to_san(Move::new(sq("e5"), sq("d6")), PieceKind::Pawn, true, false, false),
            "exd6"
        );
        assert_eq!(
            move_to_san(Move::new(sq("h5"), sq("f7")), PieceKind::Queen, true, true, true),
            "Qxf7#"
        );
        assert_eq!(
            move_to_san(Move::new(sq("e1"), sq("g1")), PieceKind::King, false, true, false),
            "O-O+"
        );
        assert_eq!(
            move_to_san(
                Move::with_promotion(sq("a7"), sq("a8"), PieceKind::Queen),
                PieceKind::Pawn,
                false,
                false,
                false
            ),
            "a8=Q"
        );
    }

    #[test]
    fn san_for_move_reads_the_board() {
        let mut game = GameState::new_game();
        for lan in [("e2", "e4"), ("e7", "e5"), ("f1", "c4"), ("b8", "c6"), ("d1", "h5"), ("g8", "f6")] {
            make_move(&mut game, Move::new(sq(lan.0), sq(lan.1))).expect("move should apply");
        }
        let before = game.clone();
        let san = san_for_move(&mut game, Move::new(sq("h5"), sq("f7"))).expect("SAN should render");
        assert_eq!(san, "Qxf7#");
        assert_eq!(game, before);
    }
}
