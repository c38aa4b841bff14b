//! Uniform random-move engine for self-play openings and diagnostics.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::generate_legal_moves;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Rook Random"
    }

    fn choose_move(
        &mut self,
        game_state: &mut GameState,
        _params: &GoParams,
    ) -> ChessResult<EngineOutput> {
        let side = game_state.side_to_move;
        let legal_moves = generate_legal_moves(game_state, side);

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));
        out.best_move = legal_moves.choose(&mut self.rng).copied();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_a_legal_move_deterministically_from_seed() {
        let mut game = GameState::new_game();
        let side = game.side_to_move;
        let legal = generate_legal_moves(&mut game, side);

        let first = RandomEngine::with_seed(7)
            .choose_move(&mut game, &GoParams::default())
            .expect("engine should run");
        let second = RandomEngine::with_seed(7)
            .choose_move(&mut game, &GoParams::default())
            .expect("engine should run");

        let picked = first.best_move.expect("startpos has moves");
        assert!(legal.contains(&picked));
        assert_eq!(second.best_move, Some(picked));
    }
}
