//! Live game state and the move executor that owns its mutation.
//!
//! `GameState` is created once per game, restored from a saved record, or
//! reset to a fresh instance that keeps the current settings. It only
//! changes through [`GameState::apply_move`].

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_status::evaluate_status;
use crate::game_state::move_record::MoveRecord;
use crate::game_state::position::Position;
use crate::game_state::settings::GameSettings;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::legal_moves;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub position: Position,
    pub side_to_move: Color,
    pub history: Vec<MoveRecord>,
    pub status: GameStatus,
    pub settings: GameSettings,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    pub fn new(settings: GameSettings) -> Self {
        Self {
            position: Position::standard(),
            side_to_move: Color::White,
            history: Vec::new(),
            status: GameStatus::Active,
            settings,
        }
    }

    #[inline]
    pub fn new_game() -> Self {
        Self::new(GameSettings::default())
    }

    /// Arbitrary position; the status is derived, not trusted.
    pub fn from_position(position: Position, side_to_move: Color, settings: GameSettings) -> Self {
        let status = evaluate_status(&position, side_to_move);
        Self {
            position,
            side_to_move,
            history: Vec::new(),
            status,
            settings,
        }
    }

    /// Fresh game keeping only the settings.
    pub fn reset(&mut self) {
        *self = Self::new(self.settings);
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.position.board
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Legal moves for the piece on `square`, provided it belongs to the side
    /// to move.
    pub fn legal_moves_from(&self, square: Square) -> Vec<Move> {
        match self.position.board.piece_at(square) {
            Some(piece) if piece.color == self.side_to_move => legal_moves(&self.position, square),
            _ => Vec::new(),
        }
    }

    /// Most recent move played by `color`.
    pub fn last_move_by(&self, color: Color) -> Option<&MoveRecord> {
        self.history.iter().rev().find(|record| record.piece.color == color)
    }

    /// Executes `mv` for the side to move.
    ///
    /// Terminal games reject every move, and only moves produced by the
    /// legality gate are accepted.
    pub fn apply_move(&mut self, mv: Move) -> ChessResult<MoveRecord> {
        if self.status.is_terminal() {
            return Err(ChessError::GameOver(self.status));
        }
        if !self.legal_moves_from(mv.from).contains(&mv) {
            return Err(ChessError::IllegalMove(mv));
        }

        let applied = apply_move(&mut self.position, &mv);
        let record = MoveRecord {
            mv,
            piece: applied.moved,
            captured: applied.captured,
            promoted: applied.promoted,
        };
        self.history.push(record);
        self.side_to_move = self.side_to_move.opposite();
        self.status = evaluate_status(&self.position, self.side_to_move);

        info!(
            mv = %mv,
            color = %record.piece.color,
            captured = record.captured.is_some(),
            status = %self.status,
            "move executed"
        );
        Ok(record)
    }
}
