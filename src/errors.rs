//! Errors returned by the library API.
//!
//! Invalid clicks never reach this type: the controller ignores them. Broken
//! structural invariants (a missing king, an executor asked to move from an
//! empty square) panic instead, since they mean the board reached a state no
//! legal sequence of moves can produce.

use crate::game_state::chess_types::{GameStatus, Move};

#[derive(Debug, thiserror::Error)]
pub enum ChessError {
    /// The game already ended in checkmate or stalemate.
    #[error("game is over ({0})")]
    GameOver(GameStatus),

    #[error("illegal move {0}")]
    IllegalMove(Move),

    /// A second search was requested while one is still running.
    #[error("a search is already in progress for this game")]
    SearchInProgress,

    #[error("search worker stopped without reporting a result")]
    SearchWorkerLost,

    #[error("failed to spawn search worker: {0}")]
    SearchSpawn(#[source] std::io::Error),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid move notation: {0}")]
    InvalidNotation(String),

    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

pub type ChessResult<T> = Result<T, ChessError>;
