use std::fmt;

use crate::game_state::chess_types::{Color, Square};

/// Transient notifications for the presentation layer. The controller only
/// queues them; display timing is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Promotion { square: Square, color: Color },
    Check { color: Color },
    Checkmate { winner: Color },
    Stalemate,
    AiThinkingStarted,
    AiThinkingEnded,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Promotion { color, .. } => write!(f, "{color} pawn promoted to a queen"),
            GameEvent::Check { color } => write!(f, "{color} is in check"),
            GameEvent::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameEvent::Stalemate => f.write_str("stalemate, the game is drawn"),
            GameEvent::AiThinkingStarted => f.write_str("computer is thinking"),
            GameEvent::AiThinkingEnded => f.write_str("computer has moved"),
        }
    }
}
