//! Crate root module declarations for the rook chess engine.
//!
//! Exposes the rules core (board state, legality, make/unmake, generation),
//! the alpha-beta search and its evaluators, the game session, engines, and
//! the notation and persistence helpers used by the binaries and tests.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod perft;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
}

pub mod game {
    pub mod chess_game;
}

pub mod engines {
    pub mod engine_negamax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod engine_match_harness;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_game_state;
    pub mod san;
    pub mod save_file;
}
