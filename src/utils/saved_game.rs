//! Flat save record for a game in progress.
//!
//! Restoring trusts the record: nothing is re-validated, and a missing or
//! unreadable save simply means a fresh game.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::castling::CastlingState;
use crate::game_state::chess_types::{Color, GameStatus, Square};
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::MoveRecord;
use crate::game_state::position::Position;
use crate::game_state::settings::{Difficulty, GameMode, GameSettings};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub board: Board,
    pub side_to_move: Color,
    pub status: GameStatus,
    pub history: Vec<MoveRecord>,
    pub en_passant_target: Option<Square>,
    pub castling_rights: [[bool; 2]; 2],
    pub king_moved: [bool; 2],
    pub rook_moved: [[bool; 2]; 2],
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub saved_at: DateTime<Utc>,
}

impl SavedGame {
    pub fn capture(state: &GameState) -> Self {
        let castling = &state.position.castling;
        Self {
            board: state.position.board,
            side_to_move: state.side_to_move,
            status: state.status,
            history: state.history.clone(),
            en_passant_target: state.position.en_passant_target,
            castling_rights: castling.rights,
            king_moved: castling.king_moved,
            rook_moved: castling.rook_moved,
            mode: state.settings.mode,
            difficulty: state.settings.difficulty,
            saved_at: Utc::now(),
        }
    }

    pub fn restore(self) -> GameState {
        GameState {
            position: Position {
                board: self.board,
                castling: CastlingState {
                    rights: self.castling_rights,
                    king_moved: self.king_moved,
                    rook_moved: self.rook_moved,
                },
                en_passant_target: self.en_passant_target,
            },
            side_to_move: self.side_to_move,
            history: self.history,
            status: self.status,
            settings: GameSettings::new(self.mode, self.difficulty),
        }
    }

    pub fn to_json(&self) -> ChessResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> ChessResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save_to_path(&self, path: &Path) -> ChessResult<()> {
        fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), moves = self.history.len(), "game saved");
        Ok(())
    }

    pub fn load_from_path(path: &Path) -> ChessResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// The saved game at `path`, or a new game with `settings` when there is
    /// none or it cannot be read.
    pub fn load_or_new(path: &Path, settings: GameSettings) -> GameState {
        if !path.exists() {
            return GameState::new(settings);
        }
        match Self::load_from_path(path) {
            Ok(saved) => {
                info!(
                    path = %path.display(),
                    saved_at = %saved.saved_at,
                    moves = saved.history.len(),
                    "saved game restored"
                );
                saved.restore()
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring unreadable saved game");
                GameState::new(settings)
            }
        }
    }
}
