use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::push_target_moves;
use crate::moves::queen_moves::queen_attacks;

pub fn generate_queen_moves(position: &Position, from: Square, color: Color, out: &mut Vec<Move>) {
    push_target_moves(from, queen_attacks(&position.board, from, color), out);
}
