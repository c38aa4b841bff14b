//! Canonical chess-rule constants.
//!
//! Home squares, the standard starting layout, and the FEN of the starting
//! position used to initialize and validate game state setup.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Starting layout in save-file form, row 0 first.
pub const STARTING_ROWS: [&str; 8] = [
    "rnbqkbnr", "pppppppp", "        ", "        ", "        ", "        ", "PPPPPPPP", "RNBQKBNR",
];

pub const LIGHT_KING_HOME: Square = square_at(7, 4);
pub const DARK_KING_HOME: Square = square_at(0, 4);

/// One castling option: the right that gates it and the squares involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingSide {
    pub right: CastlingRights,
    pub color: Color,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

pub const CASTLING_SIDES: [CastlingSide; 4] = [
    CastlingSide {
        right: CASTLE_LIGHT_KINGSIDE,
        color: Color::Light,
        king_from: LIGHT_KING_HOME,
        king_to: square_at(7, 6),
        rook_from: square_at(7, 7),
        rook_to: square_at(7, 5),
    },
    CastlingSide {
        right: CASTLE_LIGHT_QUEENSIDE,
        color: Color::Light,
        king_from: LIGHT_KING_HOME,
        king_to: square_at(7, 2),
        rook_from: square_at(7, 0),
        rook_to: square_at(7, 3),
    },
    CastlingSide {
        right: CASTLE_DARK_KINGSIDE,
        color: Color::Dark,
        king_from: DARK_KING_HOME,
        king_to: square_at(0, 6),
        rook_from: square_at(0, 7),
        rook_to: square_at(0, 5),
    },
    CastlingSide {
        right: CASTLE_DARK_QUEENSIDE,
        color: Color::Dark,
        king_from: DARK_KING_HOME,
        king_to: square_at(0, 2),
        rook_from: square_at(0, 0),
        rook_to: square_at(0, 3),
    },
];

/// Castling option matching a king move, if any.
pub fn castling_side_for(color: Color, from: Square, to: Square) -> Option<&'static CastlingSide> {
    CASTLING_SIDES
        .iter()
        .find(|side| side.color == color && side.king_from == from && side.king_to == to)
}

#[inline]
pub const fn king_home(color: Color) -> Square {
    match color {
        Color::Light => LIGHT_KING_HOME,
        Color::Dark => DARK_KING_HOME,
    }
}

/// Castling right tied to a rook home square.
pub fn castling_right_for_rook_square(square: Square) -> Option<CastlingRights> {
    CASTLING_SIDES
        .iter()
        .find(|side| side.rook_from == square)
        .map(|side| side.right)
}

pub const fn castling_rights_for_color(color: Color) -> CastlingRights {
    match color {
        Color::Light => CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE,
        Color::Dark => CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE,
    }
}
