use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Square};
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::rays::trace_rays;
use crate::moves::rook_moves::ROOK_DIRECTIONS;

#[inline]
pub fn queen_attacks(board: &Board, from: Square, color: Color) -> Vec<Square> {
    let mut out = Vec::with_capacity(27);
    trace_rays(board, from, color, &ROOK_DIRECTIONS, &mut out);
    trace_rays(board, from, color, &BISHOP_DIRECTIONS, &mut out);
    out
}
