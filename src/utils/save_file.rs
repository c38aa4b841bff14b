//! Plain-text save format.
//!
//! Eight lines of eight characters, one per square from rank 8 down to
//! rank 1 (space for empty, uppercase Light, lowercase Dark), then one line
//! holding the ply counter whose parity gives the side to move.
//!
//! The format carries no castling or en-passant data. On load, castling
//! rights are granted wherever king and rook still stand on their home
//! squares, and the en-passant target is cleared.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::CASTLING_SIDES;
use crate::game_state::{chess_types::*, game_state::GameState};

pub fn save_game(game_state: &GameState) -> String {
    let mut out = String::with_capacity(8 * 9 + 8);
    for row in 0..8u8 {
        for col in 0..8u8 {
            out.push(game_state.piece_at(square_at(row, col)).map_or(' ', Piece::to_char));
        }
        out.push('\n');
    }
    out.push_str(&game_state.move_counter.to_string());
    out.push('\n');
    out
}

/// Parse save text into a fresh position. Nothing is returned unless the
/// whole text validates.
pub fn load_game(text: &str) -> ChessResult<GameState> {
    let mut lines = text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));
    let mut game_state = GameState::new_empty();

    for row in 0..8u8 {
        let line = lines
            .next()
            .ok_or_else(|| ChessError::MalformedSave(format!("missing board row {}", row + 1)))?;
        let cells: Vec<char> = line.chars().collect();
        if cells.len() != 8 {
            return Err(ChessError::MalformedSave(format!(
                "board row {} has {} squares, expected 8",
                row + 1,
                cells.len()
            )));
        }
        for (col, ch) in cells.into_iter().enumerate() {
            let piece = match ch {
                ' ' => None,
                _ => Some(Piece::from_char(ch).ok_or_else(|| {
                    ChessError::MalformedSave(format!("unknown piece character '{ch}'"))
                })?),
            };
            game_state.set_piece(square_at(row, col as u8), piece);
        }
    }

    let counter_line = lines
        .next()
        .ok_or_else(|| ChessError::MalformedSave("missing move counter".to_owned()))?;
    let move_counter = counter_line
        .trim()
        .parse::<u32>()
        .map_err(|_| ChessError::MalformedSave(format!("unparsable move counter '{counter_line}'")))?;

    game_state.move_counter = move_counter;
    game_state.side_to_move = if move_counter % 2 == 0 {
        Color::Light
    } else {
        Color::Dark
    };
    game_state.castling_rights = infer_castling_rights(&game_state);
    Ok(game_state)
}

pub fn save_to_path(game_state: &GameState, path: impl AsRef<Path>) -> ChessResult<()> {
    let path = path.as_ref();
    fs::write(path, save_game(game_state))?;
    info!(path = %path.display(), "game saved");
    Ok(())
}

pub fn load_from_path(path: impl AsRef<Path>) -> ChessResult<GameState> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let game_state = load_game(&text)?;
    info!(path = %path.display(), "game loaded");
    Ok(game_state)
}

fn infer_castling_rights(game_state: &GameState) -> CastlingRights {
    CASTLING_SIDES
        .iter()
        .filter(|side| {
            game_state.piece_at(side.king_from) == Some(Piece::new(side.color, PieceKind::King))
                && game_state.piece_at(side.rook_from) == Some(Piece::new(side.color, PieceKind::Rook))
        })
        .fold(0, |rights, side| rights | side.right)
}
