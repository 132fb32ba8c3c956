use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::*;

/// One executed move as kept in the game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    /// The piece as it stood before the move (a pawn for promotions).
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promoted: bool,
}
