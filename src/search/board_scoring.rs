//! Pluggable board evaluation interfaces and the engine's evaluators.
//!
//! Search stays independent of the heuristic by delegating leaf scoring to
//! [`BoardScorer`]. The default [`HybridScorer`] combines a static term
//! (material plus pawn placement) with a dynamic term (legal-move mobility
//! plus center occupation).

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::generate_legal_moves;

pub trait BoardScorer: Send + Sync {
    /// Score from `color`'s perspective, positive when `color` stands better.
    ///
    /// Takes the position mutably because dynamic terms enumerate legal
    /// moves with make/unmake; the position is restored before returning.
    fn score(&self, game_state: &mut GameState, color: Color) -> i32;
}

/// Pawn placement bonus from Light's point of view, row 0 being the eighth rank.
/// Dark reads the table mirrored vertically.
#[rustfmt::skip]
pub const PAWN_TABLE: [[i32; 8]; 8] = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [ 50,  50,  50,  50,  50,  50,  50,  50],
    [ 10,  10,  20,  30,  30,  20,  10,  10],
    [  5,   5,  10,  25,  25,  10,   5,   5],
    [  0,   0,   0,  20,  20,   0,   0,   0],
    [  5,  -5, -10,   0,   0, -10,  -5,   5],
    [  5,  10,  10, -20, -20,  10,  10,   5],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

/// d5, e5, d4, e4.
pub const CENTER_SQUARES: [Square; 4] = [
    square_at(3, 3),
    square_at(3, 4),
    square_at(4, 3),
    square_at(4, 4),
];

pub const MOBILITY_WEIGHT: i32 = 10;
pub const CENTER_WEIGHT: i32 = 25;

#[inline]
pub const fn piece_value(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20000,
    }
}

#[inline]
pub fn pawn_bonus(color: Color, square: Square) -> i32 {
    let row = row_of(square) as usize;
    let col = col_of(square) as usize;
    match color {
        Color::Light => PAWN_TABLE[row][col],
        Color::Dark => PAWN_TABLE[7 - row][col],
    }
}

/// Signed centipawn balance, positive favoring Light.
pub fn evaluate_material(game_state: &GameState) -> i32 {
    let mut score = 0i32;
    for (square, slot) in game_state.board.iter().enumerate() {
        let Some(piece) = slot else {
            continue;
        };
        let mut value = piece_value(piece.kind);
        if piece.kind == PieceKind::Pawn {
            value += pawn_bonus(piece.color, square as Square);
        }
        match piece.color {
            Color::Light => score += value,
            Color::Dark => score -= value,
        }
    }
    score
}

/// `10 * legal moves + 25 * occupied center squares` for `color`.
pub fn evaluate_mobility(game_state: &mut GameState, color: Color) -> i32 {
    let legal = generate_legal_moves(game_state, color).len() as i32;
    let center = CENTER_SQUARES
        .iter()
        .filter(|sq| game_state.piece_at(**sq).is_some_and(|p| p.color == color))
        .count() as i32;
    MOBILITY_WEIGHT * legal + CENTER_WEIGHT * center
}

/// Material only, from `color`'s perspective.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &mut GameState, color: Color) -> i32 {
        let white_minus_black = evaluate_material(game_state);
        match color {
            Color::Light => white_minus_black,
            Color::Dark => -white_minus_black,
        }
    }
}

/// Material plus the mobility difference between `color` and its opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct HybridScorer;

impl BoardScorer for HybridScorer {
    fn score(&self, game_state: &mut GameState, color: Color) -> i32 {
        let material = MaterialScorer.score(game_state, color);
        let own = evaluate_mobility(game_state, color);
        let theirs = evaluate_mobility(game_state, color.opposite());
        material + (own - theirs)
    }
}
