use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::square_delta;

/// Knight reach: the eight L-shaped offsets, no path check.
#[inline]
pub fn knight_reaches(_game_state: &GameState, from: Square, to: Square) -> bool {
    let (d_row, d_col) = square_delta(from, to);
    matches!((d_row.abs(), d_col.abs()), (1, 2) | (2, 1))
}
