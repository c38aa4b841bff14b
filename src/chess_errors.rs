//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type returned by parsing, persistence
//! and session operations. Rejected moves are not errors: legality is
//! reported through [`Legality`](crate::game_state::chess_types::Legality)
//! and [`MoveOutcome`](crate::game::chess_game::MoveOutcome) values, and the
//! board is left untouched.
//!
//! Every variant is recoverable by the caller choosing a different input or
//! resetting the game.

use thiserror::Error;

use crate::game_state::chess_types::{PieceKind, Square};

#[derive(Debug, Error)]
pub enum ChessError {
    /// A square name such as `e4` could not be parsed.
    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    /// A coordinate move such as `e2e4` could not be parsed.
    #[error("invalid move text '{0}'")]
    InvalidMoveText(String),

    #[error("no piece on square {0}")]
    NoPieceOnSquare(Square),

    /// A move was submitted while a pawn still waits for its promotion piece.
    #[error("promotion pending on square {0}; choose a piece first")]
    PromotionPending(Square),

    #[error("no promotion is pending")]
    NoPromotionPending,

    #[error("cannot promote to {0:?}")]
    InvalidPromotionPiece(PieceKind),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// Truncated board rows, bad piece characters or an unparsable counter.
    #[error("malformed save data: {0}")]
    MalformedSave(String),

    /// No legal source piece matches a SAN token.
    #[error("cannot resolve SAN move '{0}'")]
    UnresolvedSan(String),

    #[error("invalid PGN header line: {0}")]
    InvalidPgnHeader(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ChessResult<T> = Result<T, ChessError>;
