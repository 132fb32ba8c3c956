use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::push_target_moves;
use crate::moves::knight_moves::knight_attacks;

pub fn generate_knight_moves(position: &Position, from: Square, color: Color, out: &mut Vec<Move>) {
    push_target_moves(from, knight_attacks(&position.board, from, color), out);
}
