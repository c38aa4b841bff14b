//! FEN-to-GameState parser.
//!
//! Builds a complete position from a Forsyth-Edwards Notation string,
//! including side to move, castling rights, en-passant target and clocks.
//! The position is assembled privately and only returned once every field
//! has been validated.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let invalid = |msg: &str| ChessError::InvalidFen(format!("{msg}: {fen}"));
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();
    parse_board(board_part, &mut game_state).map_err(|msg| invalid(&msg))?;

    game_state.side_to_move = match side_part {
        "w" => Color::Light,
        "b" => Color::Dark,
        _ => return Err(invalid("invalid side to move")),
    };
    game_state.castling_rights = parse_castling_rights(castling_part).ok_or_else(|| invalid("invalid castling rights"))?;
    game_state.en_passant_square = match en_passant_part {
        "-" => None,
        square => Some(algebraic_to_square(square).map_err(|_| invalid("invalid en-passant square"))?),
    };
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid("invalid halfmove clock"))?;
    let fullmove = fullmove_part
        .parse::<u32>()
        .map_err(|_| invalid("invalid fullmove number"))?;

    let light_plies = fullmove.max(1).saturating_sub(1).saturating_mul(2);
    game_state.move_counter = match game_state.side_to_move {
        Color::Light => light_plies,
        Color::Dark => light_plies + 1,
    };

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> Result<(), String> {
    let rows: Vec<&str> = board_part.split('/').collect();
    if rows.len() != 8 {
        return Err("board layout must contain 8 ranks".to_owned());
    }

    for (row, row_str) in rows.iter().enumerate() {
        let mut col = 0usize;

        for ch in row_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(format!("invalid empty-square count '{ch}'"));
                }
                col += empty_count as usize;
                continue;
            }

            let piece = Piece::from_char(ch).ok_or_else(|| format!("invalid piece character '{ch}'"))?;
            if col >= 8 {
                return Err("rank has too many files".to_owned());
            }
            game_state.set_piece(square_at(row as u8, col as u8), Some(piece));
            col += 1;
        }

        if col != 8 {
            return Err("rank does not sum to 8 files".to_owned());
        }
    }

    Ok(())
}

fn parse_castling_rights(castling_part: &str) -> Option<CastlingRights> {
    if castling_part == "-" {
        return Some(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        rights |= match ch {
            'K' => CASTLE_LIGHT_KINGSIDE,
            'Q' => CASTLE_LIGHT_QUEENSIDE,
            'k' => CASTLE_DARK_KINGSIDE,
            'q' => CASTLE_DARK_QUEENSIDE,
            _ => return None,
        };
    }
    Some(rights)
}
