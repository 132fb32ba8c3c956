//! Everything move generation needs to know about a position.
//!
//! `Position` is the unit the search copies: board, castling bookkeeping and
//! the one-move en-passant window. Side to move is tracked by the caller.

use serde::{Deserialize, Serialize};

use crate::game_state::board::Board;
use crate::game_state::castling::CastlingState;
use crate::game_state::chess_types::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub board: Board,
    pub castling: CastlingState,
    pub en_passant_target: Option<Square>,
}

impl Default for Position {
    fn default() -> Self {
        Self::standard()
    }
}

impl Position {
    pub fn standard() -> Self {
        Self {
            board: Board::standard(),
            castling: CastlingState::all_rights(),
            en_passant_target: None,
        }
    }
}
