use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::slider_reaches;

#[inline]
pub fn queen_reaches(game_state: &GameState, from: Square, to: Square) -> bool {
    slider_reaches(game_state, from, to, true, true)
}
