//! Game session: one position, the moves played on it, and the commit rules.
//!
//! `ChessGame` is what a UI, CLI or PGN replay talks to. It owns its
//! `GameState` exclusively, so every legality check and search it runs has
//! the strictly nested make/unmake access the engine requires. Callers must
//! look at [`ChessGame::current_status`] after every commit; checkmate and
//! stalemate are outcomes, not errors.

use tracing::{debug, info};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_generator::{check_move, game_status};
use crate::search::alpha_beta::{find_best_move, SearchConfig, SearchResult};
use crate::search::board_scoring::HybridScorer;
use crate::utils::long_algebraic::{long_algebraic_to_move, move_to_long_algebraic};
use crate::utils::san::{move_to_san, san_to_move};
use crate::utils::save_file::{load_game, save_game};

/// What happened to a submitted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied,
    RejectedIllegal,
    RejectedLeavesKingInCheck,
    /// The move was applied and the pawn now waits for `choose_promotion`.
    PromotionPending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    pub mv: Move,
    pub san: String,
}

#[derive(Debug, Clone)]
struct PendingMove {
    mv: Move,
    is_capture: bool,
}

#[derive(Debug, Clone)]
pub struct ChessGame {
    state: GameState,
    initial_state: GameState,
    history: Vec<PlayedMove>,
    pending: Option<PendingMove>,
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessGame {
    pub fn new() -> Self {
        Self::from_state(GameState::new_game())
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            initial_state: state.clone(),
            state,
            history: Vec::new(),
            pending: None,
        }
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn initial_state(&self) -> &GameState {
        &self.initial_state
    }

    #[inline]
    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    #[inline]
    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.state.pending_promotion
    }

    pub fn status(&mut self, color: Color) -> GameStatus {
        game_status(&mut self.state, color)
    }

    /// Status of the side about to move next.
    pub fn current_status(&mut self) -> GameStatus {
        let side = self.state.side_to_move;
        self.status(side)
    }

    /// Commit a coordinate move such as `e2e4` or `e7e8q`.
    pub fn commit_move(&mut self, text: &str) -> ChessResult<MoveOutcome> {
        let mv = long_algebraic_to_move(text)?;
        self.commit(mv)
    }

    /// Commit coordinate text, falling back to SAN when the text is not a
    /// coordinate move.
    pub fn commit_text(&mut self, text: &str) -> ChessResult<MoveOutcome> {
        match self.commit_move(text) {
            Err(ChessError::InvalidMoveText(_)) => self.commit_san(text),
            other => other,
        }
    }

    /// Commit a SAN move for the side to move.
    pub fn commit_san(&mut self, san: &str) -> ChessResult<MoveOutcome> {
        if let Some(pending) = self.state.pending_promotion {
            return Err(ChessError::PromotionPending(pending.square));
        }
        let side = self.state.side_to_move;
        let mv = san_to_move(&mut self.state, san, side)?;
        self.commit(mv)
    }

    pub fn commit(&mut self, mv: Move) -> ChessResult<MoveOutcome> {
        if let Some(pending) = self.state.pending_promotion {
            return Err(ChessError::PromotionPending(pending.square));
        }
        if let Some(kind) = mv.promotion.filter(|kind| !kind.is_promotion_choice()) {
            return Err(ChessError::InvalidPromotionPiece(kind));
        }

        let side = self.state.side_to_move;
        match check_move(&mut self.state, mv.from, mv.to, side) {
            Legality::Illegal => {
                debug!(mv = %move_to_long_algebraic(mv), "rejected illegal move");
                return Ok(MoveOutcome::RejectedIllegal);
            }
            Legality::LeavesKingInCheck => {
                debug!(mv = %move_to_long_algebraic(mv), "rejected move leaving king in check");
                return Ok(MoveOutcome::RejectedLeavesKingInCheck);
            }
            Legality::Legal => {}
        }
        if mv.promotion.is_some() && !self.is_promoting_push(mv, side) {
            debug!(mv = %move_to_long_algebraic(mv), "rejected promotion piece on a non-promotion move");
            return Ok(MoveOutcome::RejectedIllegal);
        }

        let undo = make_move(&mut self.state, mv)?;
        if self.state.pending_promotion.is_some() {
            self.pending = Some(PendingMove {
                mv,
                is_capture: undo.is_capture(),
            });
            debug!(mv = %move_to_long_algebraic(mv), "promotion pending");
            return Ok(MoveOutcome::PromotionPending);
        }

        self.record(mv, undo.moved_piece.kind, undo.is_capture());
        Ok(MoveOutcome::Applied)
    }

    /// Resolve a pending promotion and return the status of the side to move next.
    pub fn choose_promotion(&mut self, kind: PieceKind) -> ChessResult<GameStatus> {
        let pending = self
            .state
            .pending_promotion
            .ok_or(ChessError::NoPromotionPending)?;
        if !kind.is_promotion_choice() {
            return Err(ChessError::InvalidPromotionPiece(kind));
        }

        self.state
            .set_piece(pending.square, Some(Piece::new(pending.color, kind)));
        self.state.pending_promotion = None;

        if let Some(PendingMove { mv, is_capture }) = self.pending.take() {
            let mv = Move::with_promotion(mv.from, mv.to, kind);
            self.record(mv, PieceKind::Pawn, is_capture);
        }
        Ok(self.current_status())
    }

    /// Search `depth` plies (at least one) for the side to move and commit
    /// the best move, promoting as the search chose.
    pub fn computer_move(&mut self, depth: u8) -> ChessResult<Option<SearchResult>> {
        if let Some(pending) = self.state.pending_promotion {
            return Err(ChessError::PromotionPending(pending.square));
        }
        let side = self.state.side_to_move;
        let result = find_best_move(
            &mut self.state,
            &HybridScorer,
            SearchConfig {
                max_depth: depth.max(1),
            },
            side,
        )?;
        let Some(mv) = result.best_move else {
            return Ok(None);
        };
        self.commit(mv)?;
        Ok(Some(result))
    }

    pub fn save_text(&self) -> String {
        save_game(&self.state)
    }

    /// Replace the game with a saved position. The game is unchanged on error.
    pub fn load_save(&mut self, text: &str) -> ChessResult<()> {
        let state = load_game(text)?;
        *self = Self::from_state(state);
        info!(side = self.state.side_to_move.name(), "position loaded");
        Ok(())
    }

    fn is_promoting_push(&self, mv: Move, side: Color) -> bool {
        self.state.piece_at(mv.from) == Some(Piece::new(side, PieceKind::Pawn))
            && row_of(mv.to) == side.promotion_row()
    }

    fn record(&mut self, mv: Move, kind: PieceKind, is_capture: bool) {
        let defender = self.state.side_to_move;
        let status = game_status(&mut self.state, defender);
        let is_checkmate = status == GameStatus::Checkmate;
        let is_check = is_checkmate || status == GameStatus::Check;
        let san = move_to_san(mv, kind, is_capture, is_check, is_checkmate);
        debug!(san = %san, ?status, "move committed");
        self.history.push(PlayedMove { mv, san });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("square should parse")
    }

    fn play(game: &mut ChessGame, moves: &[&str]) {
        for text in moves {
            assert_eq!(
                game.commit_move(text).expect("move text should parse"),
                MoveOutcome::Applied,
                "{text}"
            );
        }
    }

    #[test]
    fn scholars_mate_is_accepted_and_ends_in_mate() {
        let mut game = ChessGame::new();
        play(&mut game, &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6"]);
        assert_eq!(game.current_status(), GameStatus::Normal);
        play(&mut game, &["h5f7"]);
        assert_eq!(game.current_status(), GameStatus::Checkmate);

        let sans: Vec<&str> = game.history().iter().map(|p| p.san.as_str()).collect();
        assert_eq!(sans, ["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6", "Qxf7#"]);
    }

    #[test]
    fn rejections_leave_board_unchanged() {
        let mut game = ChessGame::new();
        let before = game.state().clone();
        assert_eq!(game.commit_move("e2e5").expect("parse"), MoveOutcome::RejectedIllegal);
        assert_eq!(game.commit_move("e7e5").expect("parse"), MoveOutcome::RejectedIllegal);
        assert_eq!(game.state(), &before);

        let mut pinned = ChessGame::from_state(
            GameState::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1").expect("FEN should parse"),
        );
        let before = pinned.state().clone();
        assert_eq!(
            pinned.commit_move("e2d3").expect("parse"),
            MoveOutcome::RejectedLeavesKingInCheck
        );
        assert_eq!(pinned.state(), &before);
        assert!(matches!(
            pinned.commit_move("e2"),
            Err(ChessError::InvalidMoveText(_))
        ));
    }

    #[test]
    fn en_passant_capture_removes_passed_pawn() {
        let mut game = ChessGame::new();
        play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5", "e5d6"]);
        assert_eq!(game.state().piece_at(sq("d5")), None);
        assert_eq!(
            game.state().piece_at(sq("d6")),
            Some(Piece::new(Color::Light, PieceKind::Pawn))
        );
        assert_eq!(game.history().last().map(|p| p.san.as_str()), Some("exd6"));
    }

    #[test]
    fn promotion_blocks_until_chosen() {
        let mut game = ChessGame::from_state(
            GameState::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse"),
        );
        assert_eq!(game.commit_move("a7a8").expect("parse"), MoveOutcome::PromotionPending);
        assert!(matches!(
            game.commit_move("a1b1"),
            Err(ChessError::PromotionPending(_))
        ));
        assert!(matches!(
            game.choose_promotion(PieceKind::King),
            Err(ChessError::InvalidPromotionPiece(PieceKind::King))
        ));

        let status = game.choose_promotion(PieceKind::Rook).expect("promotion should apply");
        assert_eq!(status, GameStatus::Check);
        assert_eq!(
            game.state().piece_at(sq("a8")),
            Some(Piece::new(Color::Light, PieceKind::Rook))
        );
        assert_eq!(game.history().last().map(|p| p.san.as_str()), Some("a8=R+"));
        assert!(matches!(
            game.choose_promotion(PieceKind::Queen),
            Err(ChessError::NoPromotionPending)
        ));
        assert_eq!(game.commit_move("a1b2").expect("parse"), MoveOutcome::Applied);
    }

    #[test]
    fn promotion_given_up_front_applies_directly() {
        let mut game = ChessGame::from_state(
            GameState::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse"),
        );
        assert_eq!(game.commit_move("a7a8q").expect("parse"), MoveOutcome::Applied);
        assert_eq!(game.pending_promotion(), None);
        assert_eq!(game.history()[0].san, "a8=Q+");
    }

    #[test]
    fn castling_relocates_rook_only_with_rights() {
        let mut game = ChessGame::new();
        play(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1"]);
        assert_eq!(
            game.state().piece_at(sq("f1")),
            Some(Piece::new(Color::Light, PieceKind::Rook))
        );
        assert_eq!(
            game.state().piece_at(sq("g1")),
            Some(Piece::new(Color::Light, PieceKind::King))
        );
        assert_eq!(game.history().last().map(|p| p.san.as_str()), Some("O-O"));

        let mut moved = ChessGame::new();
        play(
            &mut moved,
            &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "h1g1", "a7a6", "g1h1", "a6a5"],
        );
        assert_eq!(moved.commit_move("e1g1").expect("parse"), MoveOutcome::RejectedIllegal);
    }

    #[test]
    fn commit_san_and_computer_move() {
        let mut game = ChessGame::new();
        assert_eq!(game.commit_san("e4").expect("SAN should resolve"), MoveOutcome::Applied);
        assert!(matches!(
            game.commit_san("Qh5"),
            Err(ChessError::UnresolvedSan(_))
        ));
        let result = game
            .computer_move(1)
            .expect("search should run")
            .expect("a move should exist");
        assert!(result.best_move.is_some());
        assert_eq!(game.side_to_move(), Color::Light);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn promotion_letter_on_ordinary_move_is_rejected() {
        let mut game = ChessGame::new();
        let before = game.state().clone();
        assert_eq!(game.commit_move("e2e4q").expect("parse"), MoveOutcome::RejectedIllegal);
        assert_eq!(game.commit_move("g1f3r").expect("parse"), MoveOutcome::RejectedIllegal);
        assert_eq!(game.state(), &before);
        assert!(game.history().is_empty());

        assert!(matches!(
            game.commit_san("e4=Q"),
            Err(ChessError::UnresolvedSan(_))
        ));
        assert_eq!(game.commit_move("e2e4").expect("parse"), MoveOutcome::Applied);
        assert_eq!(game.history()[0].san, "e4");
    }

    #[test]
    fn commit_text_accepts_coordinates_and_san() {
        let mut game = ChessGame::new();
        for text in ["e2e4", "d7d5", "exd5", "Qxd5", "Nc3", "Qa5", "Nf3+", "g8f6", "O-O-O"] {
            let outcome = game.commit_text(text).expect("move should resolve");
            if text == "O-O-O" {
                assert_eq!(outcome, MoveOutcome::RejectedIllegal);
            } else {
                assert_eq!(outcome, MoveOutcome::Applied, "{text}");
            }
        }
        let sans: Vec<&str> = game.history().iter().map(|p| p.san.as_str()).collect();
        assert_eq!(sans, ["e4", "d5", "exd5", "Qxd5", "Nc3", "Qa5", "Nf3", "Nf6"]);
    }

    #[test]
    fn computer_move_at_depth_zero_still_plays() {
        let mut game = ChessGame::new();
        let result = game
            .computer_move(0)
            .expect("search should run")
            .expect("a move should exist");
        assert!(result.best_move.is_some());
        assert_eq!(result.depth, 1);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.side_to_move(), Color::Dark);
    }

    #[test]
    fn load_save_replaces_game_or_leaves_it() {
        let mut game = ChessGame::new();
        play(&mut game, &["e2e4"]);
        let text = game.save_text();

        let mut other = ChessGame::new();
        assert!(other.load_save("garbage").is_err());
        assert_eq!(other.state(), &GameState::new_game());

        other.load_save(&text).expect("save should load");
        assert_eq!(other.side_to_move(), Color::Dark);
        assert!(other.history().is_empty());
        assert_eq!(other.commit_move("e7e5").expect("parse"), MoveOutcome::Applied);
    }
}
