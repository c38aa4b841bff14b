//! Geometry helpers shared by the per-piece movement rules.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Why a piece's reach is being asked about.
///
/// `Move` answers "may this piece move there" (pushes, en passant, castling).
/// `Attack` answers "does this piece hit that square", which is what check
/// detection needs: pawns hit both forward diagonals whatever stands there,
/// pawn pushes and castling never attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveIntent {
    Move,
    Attack,
}

/// Row and column deltas from `from` to `to`.
#[inline]
pub fn square_delta(from: Square, to: Square) -> (i8, i8) {
    (
        row_of(to) as i8 - row_of(from) as i8,
        col_of(to) as i8 - col_of(from) as i8,
    )
}

#[inline]
pub fn is_diagonal(d_row: i8, d_col: i8) -> bool {
    d_row != 0 && d_row.abs() == d_col.abs()
}

#[inline]
pub fn is_orthogonal(d_row: i8, d_col: i8) -> bool {
    (d_row == 0) != (d_col == 0)
}

/// Every square strictly between `from` and `to` is empty.
///
/// Only meaningful for squares on a shared rank, file or diagonal.
pub fn is_path_clear(game_state: &GameState, from: Square, to: Square) -> bool {
    let (d_row, d_col) = square_delta(from, to);
    let step_row = d_row.signum();
    let step_col = d_col.signum();

    let mut current = from;
    loop {
        let Some(next) = offset_square(current, step_row, step_col) else {
            return false;
        };
        if next == to {
            return true;
        }
        if !game_state.is_empty(next) {
            return false;
        }
        current = next;
    }
}

/// Sliding reach along the allowed line shapes with a clear path.
#[inline]
pub fn slider_reaches(
    game_state: &GameState,
    from: Square,
    to: Square,
    diagonal: bool,
    orthogonal: bool,
) -> bool {
    let (d_row, d_col) = square_delta(from, to);
    let shape_ok = (diagonal && is_diagonal(d_row, d_col)) || (orthogonal && is_orthogonal(d_row, d_col));
    shape_ok && is_path_clear(game_state, from, to)
}
