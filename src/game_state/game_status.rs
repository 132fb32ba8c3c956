use crate::game_state::chess_types::{Color, GameStatus};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::has_any_legal_move;

/// Status of the game with `side_to_move` to play.
pub fn evaluate_status(position: &Position, side_to_move: Color) -> GameStatus {
    let in_check = is_in_check(&position.board, side_to_move);
    let can_move = has_any_legal_move(position, side_to_move);
    match (in_check, can_move) {
        (true, false) => GameStatus::Checkmate,
        (true, true) => GameStatus::Check,
        (false, false) => GameStatus::Stalemate,
        (false, true) => GameStatus::Active,
    }
}
