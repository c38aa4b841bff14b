//! Core value types shared by every subsystem.
//!
//! Squares are plain `u8` indices laid out row-major from Black's back rank:
//! `0 == a8`, `7 == h8`, `56 == a1`, `63 == h1`. Scanning squares in index
//! order is the canonical board-scan order used by move generation and SAN
//! resolution.

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row delta of a single pawn push. Light pawns travel toward row 0.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Color::Light => 6,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::Light => "White",
            Color::Dark => "Black",
        }
    }
}

/// Piece kind (color is carried separately in [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Promotion choices in generator order.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    #[inline]
    pub const fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }

    /// Lowercase letter used by FEN, the save format and long algebraic suffixes.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A colored piece as it sits on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Uppercase for Light, lowercase for Dark.
    pub fn to_char(self) -> char {
        let letter = self.kind.letter();
        match self.color {
            Color::Light => letter.to_ascii_uppercase(),
            Color::Dark => letter,
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::Light
        } else if ch.is_ascii_lowercase() {
            Color::Dark
        } else {
            return None;
        };
        PieceKind::from_letter(ch).map(|kind| Piece::new(color, kind))
    }
}

/// Board square index (`0..=63`), row-major from a8.
pub type Square = u8;

#[inline]
pub const fn square_at(row: u8, col: u8) -> Square {
    row * 8 + col
}

#[inline]
pub const fn row_of(square: Square) -> u8 {
    square / 8
}

#[inline]
pub const fn col_of(square: Square) -> u8 {
    square % 8
}

/// Step from `square` by a row/column delta, `None` when it leaves the board.
#[inline]
pub fn offset_square(square: Square, d_row: i8, d_col: i8) -> Option<Square> {
    let row = row_of(square) as i8 + d_row;
    let col = col_of(square) as i8 + d_col;
    if (0..8).contains(&row) && (0..8).contains(&col) {
        Some(square_at(row as u8, col as u8))
    } else {
        None
    }
}

/// A candidate move. Captures, castling and en passant are derived from the
/// board at commit time; only the promotion choice travels with the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }
}

/// Pawn waiting on its promotion choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub square: Square,
    pub color: Color,
}

/// Compact castling rights bitmask.
pub type CastlingRights = u8;
pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights =
    CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE | CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE;

/// Result of the full legality test for a single candidate move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Legality {
    Legal,
    Illegal,
    LeavesKingInCheck,
}

/// Classification of the position for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_layout_starts_at_a8() {
        assert_eq!(square_at(0, 0), 0);
        assert_eq!(square_at(7, 7), 63);
        assert_eq!(row_of(52), 6);
        assert_eq!(col_of(52), 4);
    }

    #[test]
    fn offset_square_stops_at_edges() {
        assert_eq!(offset_square(0, -1, 0), None);
        assert_eq!(offset_square(7, 0, 1), None);
        assert_eq!(offset_square(27, 1, 1), Some(36));
    }

    #[test]
    fn piece_chars_follow_case_convention() {
        assert_eq!(Piece::new(Color::Light, PieceKind::Knight).to_char(), 'N');
        assert_eq!(Piece::new(Color::Dark, PieceKind::Queen).to_char(), 'q');
        assert_eq!(
            Piece::from_char('k'),
            Some(Piece::new(Color::Dark, PieceKind::King))
        );
        assert_eq!(Piece::from_char('x'), None);
        assert_eq!(Piece::from_char(' '), None);
    }
}
