//! Coordinate move text such as `e2e4` or `a7a8q`.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// Parse `from`/`to` squares plus an optional promotion letter.
///
/// Only the text is validated here; legality is the caller's business.
pub fn long_algebraic_to_move(text: &str) -> ChessResult<Move> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::InvalidMoveText(text.to_owned()));
    }

    let invalid = || ChessError::InvalidMoveText(text.to_owned());
    let from = algebraic_to_square(&text[0..2]).map_err(|_| invalid())?;
    let to = algebraic_to_square(&text[2..4]).map_err(|_| invalid())?;

    let promotion = match text[4..].chars().next() {
        Some(ch) => {
            let kind = PieceKind::from_letter(ch)
                .filter(|kind| kind.is_promotion_choice())
                .ok_or_else(invalid)?;
            Some(kind)
        }
        None => None,
    };

    Ok(Move { from, to, promotion })
}

pub fn move_to_long_algebraic(mv: Move) -> String {
    let mut out = square_to_algebraic(mv.from);
    out.push_str(&square_to_algebraic(mv.to));
    if let Some(kind) = mv.promotion {
        out.push(kind.letter());
    }
    out
}
