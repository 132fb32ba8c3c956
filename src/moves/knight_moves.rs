use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Square};
use crate::moves::rays::step_targets;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, 1),
    (-1, 2),
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
];

/// Knight destinations from `from` that are on the board and not own-occupied.
#[inline]
pub fn knight_attacks(board: &Board, from: Square, color: Color) -> Vec<Square> {
    let mut out = Vec::with_capacity(8);
    step_targets(board, from, color, &KNIGHT_OFFSETS, &mut out);
    out
}
