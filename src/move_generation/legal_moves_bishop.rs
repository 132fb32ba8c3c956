//! Bishop move generation: diagonal rays up to the first blocker.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::push_target_moves;
use crate::moves::bishop_moves::bishop_attacks;

pub fn generate_bishop_moves(position: &Position, from: Square, color: Color, out: &mut Vec<Move>) {
    push_target_moves(from, bishop_attacks(&position.board, from, color), out);
}
