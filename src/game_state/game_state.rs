//! Core mutable board state.
//!
//! `GameState` is the single shared position of a game. Legality checks,
//! move generation and search all mutate it in place and restore it through
//! [`UndoState`](crate::game_state::undo_state::UndoState) records, so one
//! instance must only ever be driven by one caller at a time.
//!
//! Precondition for attack and check queries: exactly one king per color.
//! Positions loaded with zero or several kings of a color give unspecified
//! attack results; `is_king_in_check` reports `false` when the king is absent.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_rules::{STARTING_POSITION_FEN, STARTING_ROWS};
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: [Option<Piece>; 64],

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    pub pending_promotion: Option<PendingPromotion>,

    pub halfmove_clock: u16,
    /// Plies played since the start of the game.
    pub move_counter: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: [None; 64],
            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,
            pending_promotion: None,
            halfmove_clock: 0,
            move_counter: 0,
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard initial setup, White to move, all castling rights.
    pub fn new_game() -> Self {
        let mut state = Self::default();
        for (row, line) in STARTING_ROWS.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                state.board[square_at(row as u8, col as u8) as usize] = Piece::from_char(ch);
            }
        }
        state.castling_rights = CASTLE_ALL;
        state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square as usize]
    }

    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.board[square as usize] = piece;
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.board[square as usize].is_none()
    }

    /// Occupied squares of `color` in board-scan order.
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter_map(move |(sq, piece)| match piece {
                Some(p) if p.color == color => Some((sq as Square, *p)),
                _ => None,
            })
    }

    #[inline]
    pub fn has_castling_right(&self, right: CastlingRights) -> bool {
        self.castling_rights & right != 0
    }

    /// FEN fullmove number derived from the ply counter.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.move_counter / 2 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn new_game_matches_starting_fen() {
        let game = GameState::new_game();
        assert_eq!(game.get_fen(), STARTING_POSITION_FEN);
        assert_eq!(
            game.piece_at(square_at(7, 4)),
            Some(Piece::new(Color::Light, PieceKind::King))
        );
        assert_eq!(
            game.piece_at(square_at(0, 3)),
            Some(Piece::new(Color::Dark, PieceKind::Queen))
        );
        assert_eq!(game.squares_of(Color::Light).count(), 16);
        assert_eq!(game.squares_of(Color::Dark).count(), 16);
    }

    #[test]
    fn fullmove_number_tracks_ply_counter() {
        let mut game = GameState::new_game();
        assert_eq!(game.fullmove_number(), 1);
        game.move_counter = 3;
        assert_eq!(game.fullmove_number(), 2);
    }
}
