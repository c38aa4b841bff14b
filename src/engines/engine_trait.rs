//! Engine abstraction used by the session, the CLI and the self-play harness.
//!
//! Engines receive the live position mutably so they can search it in place
//! with make/unmake; the position must be unchanged when `choose_move`
//! returns.

use crate::chess_errors::ChessResult;
use crate::game_state::{chess_types::Move, game_state::GameState};

#[derive(Debug, Clone, Copy, Default)]
pub struct GoParams {
    /// Overrides the engine's own default depth when set.
    pub depth: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Pick a move for the side to move in `game_state`.
    fn choose_move(
        &mut self,
        game_state: &mut GameState,
        params: &GoParams,
    ) -> ChessResult<EngineOutput>;
}
