use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Square};
use crate::moves::rays::trace_rays;

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

#[inline]
pub fn bishop_attacks(board: &Board, from: Square, color: Color) -> Vec<Square> {
    let mut out = Vec::with_capacity(13);
    trace_rays(board, from, color, &BISHOP_DIRECTIONS, &mut out);
    out
}
