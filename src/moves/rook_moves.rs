use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Square};
use crate::moves::rays::trace_rays;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[inline]
pub fn rook_attacks(board: &Board, from: Square, color: Color) -> Vec<Square> {
    let mut out = Vec::with_capacity(14);
    trace_rays(board, from, color, &ROOK_DIRECTIONS, &mut out);
    out
}
