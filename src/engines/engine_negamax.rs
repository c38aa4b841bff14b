//! Fixed-depth alpha-beta engine.

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::game_state::GameState;
use crate::search::alpha_beta::{find_best_move, SearchConfig};
use crate::search::board_scoring::{BoardScorer, HybridScorer};
use crate::utils::long_algebraic::move_to_long_algebraic;

pub struct NegamaxEngine<S: BoardScorer = HybridScorer> {
    scorer: S,
    default_depth: u8,
}

impl NegamaxEngine<HybridScorer> {
    pub fn new(default_depth: u8) -> Self {
        Self::with_scorer(HybridScorer, default_depth)
    }
}

impl Default for NegamaxEngine<HybridScorer> {
    fn default() -> Self {
        Self::new(SearchConfig::default().max_depth)
    }
}

impl<S: BoardScorer> NegamaxEngine<S> {
    pub fn with_scorer(scorer: S, default_depth: u8) -> Self {
        Self {
            scorer,
            default_depth,
        }
    }
}

impl<S: BoardScorer> Engine for NegamaxEngine<S> {
    fn name(&self) -> &str {
        "Rook Negamax"
    }

    fn choose_move(
        &mut self,
        game_state: &mut GameState,
        params: &GoParams,
    ) -> ChessResult<EngineOutput> {
        let depth = params.depth.unwrap_or(self.default_depth).max(1);
        let side = game_state.side_to_move;
        let result = find_best_move(
            game_state,
            &self.scorer,
            SearchConfig { max_depth: depth },
            side,
        )?;

        let mut info = format!(
            "info depth {} score cp {} nodes {}",
            result.depth, result.best_score, result.nodes
        );
        if let Some(mv) = result.best_move {
            info.push_str(" pv ");
            info.push_str(&move_to_long_algebraic(mv));
        }

        Ok(EngineOutput {
            best_move: result.best_move,
            info_lines: vec![info],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::board_scoring::MaterialScorer;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    #[test]
    fn takes_free_queen_and_reports_info() {
        let mut game =
            GameState::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let before = game.clone();
        let mut engine = NegamaxEngine::with_scorer(MaterialScorer, 2);
        let out = engine
            .choose_move(&mut game, &GoParams::default())
            .expect("search should run");
        assert_eq!(out.best_move, Some(long_algebraic_to_move("e4d5").expect("parse")));
        assert!(out.info_lines[0].starts_with("info depth 2 "));
        assert!(out.info_lines[0].ends_with(" pv e4d5"));
        assert_eq!(game, before);
    }

    #[test]
    fn no_move_when_mated() {
        let mut game =
            GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN should parse");
        let out = NegamaxEngine::default()
            .choose_move(&mut game, &GoParams { depth: Some(1) })
            .expect("search should run");
        assert_eq!(out.best_move, None);
    }
}
