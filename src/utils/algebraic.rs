//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! square indices reused by FEN, SAN, PGN and save-file components.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{col_of, row_of, square_at, Square};

/// Convert algebraic notation (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }
    let col = file_index(bytes[0] as char).ok_or_else(|| ChessError::InvalidSquare(square.to_owned()))?;
    let row = rank_row(bytes[1] as char).ok_or_else(|| ChessError::InvalidSquare(square.to_owned()))?;
    Ok(square_at(row, col))
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    format!("{}{}", file_char(square), rank_char(square))
}

/// Column of a file letter `a..=h`.
#[inline]
pub fn file_index(ch: char) -> Option<u8> {
    match ch.to_ascii_lowercase() {
        c @ 'a'..='h' => Some(c as u8 - b'a'),
        _ => None,
    }
}

/// Row of a rank digit `1..=8`; rank 8 is row 0.
#[inline]
pub fn rank_row(ch: char) -> Option<u8> {
    match ch {
        c @ '1'..='8' => Some(b'8' - c as u8),
        _ => None,
    }
}

#[inline]
pub fn file_char(square: Square) -> char {
    char::from(b'a' + col_of(square))
}

#[inline]
pub fn rank_char(square: Square) -> char {
    char::from(b'8' - row_of(square))
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic};

    #[test]
    fn square_conversions() {
        assert_eq!(algebraic_to_square("a8").expect("a8 should parse"), 0);
        assert_eq!(algebraic_to_square("h1").expect("h1 should parse"), 63);
        assert_eq!(algebraic_to_square("e4").expect("e4 should parse"), 36);
        assert_eq!(square_to_algebraic(0), "a8");
        assert_eq!(square_to_algebraic(63), "h1");
        assert_eq!(square_to_algebraic(52), "e2");
    }

    #[test]
    fn rejects_off_board_names() {
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("a0").is_err());
        assert!(algebraic_to_square("e").is_err());
    }
}
