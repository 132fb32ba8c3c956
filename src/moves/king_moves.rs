//! King step geometry. Castling lives with legal king move generation since
//! it depends on more than the board.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Square};
use crate::moves::rays::step_targets;

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[inline]
pub fn king_attacks(board: &Board, from: Square, color: Color) -> Vec<Square> {
    let mut out = Vec::with_capacity(8);
    step_targets(board, from, color, &KING_OFFSETS, &mut out);
    out
}
