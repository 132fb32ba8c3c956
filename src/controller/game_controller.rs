//! Click-to-move session around a `GameState`.
//!
//! The controller is the single reactive entry point for a presentation
//! layer: it owns the selection, the legal-move hints for it, the queued
//! notifications and the background search for the computer's turn.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::controller::game_events::GameEvent;
use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_trait::{Engine, EngineOutput, SearchParams};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::MoveRecord;
use crate::game_state::settings::{Difficulty, GameMode, GameSettings};
use crate::search::threading::BackgroundSearch;
use crate::utils::saved_game::SavedGame;

/// A legal destination for the selected piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveHint {
    pub to: Square,
    pub is_capture: bool,
    pub special: Option<SpecialMove>,
}

/// Builds the engine for each computer turn.
pub type EngineFactory = fn() -> Box<dyn Engine>;

fn build_engine() -> Box<dyn Engine> {
    Box::new(MinimaxEngine::new())
}

pub struct GameController {
    state: GameState,
    selected: Option<Square>,
    hints: Vec<Move>,
    events: VecDeque<GameEvent>,
    search: BackgroundSearch,
    engine_factory: EngineFactory,
}

impl GameController {
    pub fn new(settings: GameSettings) -> Self {
        Self {
            state: GameState::new(settings),
            selected: None,
            hints: Vec::new(),
            events: VecDeque::new(),
            search: BackgroundSearch::new(),
            engine_factory: build_engine,
        }
    }

    /// Like [`GameController::new`], with computer turns played by engines
    /// from `engine_factory`.
    pub fn with_engine(settings: GameSettings, engine_factory: EngineFactory) -> Self {
        Self {
            engine_factory,
            ..Self::new(settings)
        }
    }

    /// Resumes `state`, starting the computer's search if it is on move.
    pub fn from_state(state: GameState) -> ChessResult<Self> {
        let mut controller = Self::new(state.settings);
        controller.state = state;
        controller.start_ai_if_due()?;
        Ok(controller)
    }

    /// Loads the game saved at `path`, or a fresh one with `settings`.
    pub fn load_or_new(path: &Path, settings: GameSettings) -> ChessResult<Self> {
        Self::from_state(SavedGame::load_or_new(path, settings))
    }

    pub fn save(&self, path: &Path) -> ChessResult<()> {
        SavedGame::capture(&self.state).save_to_path(path)
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.state.position.board
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    #[inline]
    pub fn settings(&self) -> GameSettings {
        self.state.settings
    }

    #[inline]
    pub fn selected_square(&self) -> Option<Square> {
        self.selected
    }

    pub fn move_hints(&self) -> Vec<MoveHint> {
        self.hints
            .iter()
            .map(|mv| MoveHint {
                to: mv.to,
                is_capture: mv.is_en_passant() || !self.board().is_empty(mv.to),
                special: mv.special,
            })
            .collect()
    }

    #[inline]
    pub fn is_thinking(&self) -> bool {
        self.search.is_thinking()
    }

    pub fn thinking_flag(&self) -> Arc<AtomicBool> {
        self.search.thinking_flag()
    }

    /// Takes all queued notifications, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    fn is_human_turn(&self) -> bool {
        self.state.settings.is_human(self.state.side_to_move)
    }

    /// Handles a click on `(row, col)`.
    ///
    /// Clicks that cannot act are ignored: a finished game, a computer on
    /// move, a square off the board. Otherwise a click on a highlighted
    /// destination plays it, a click on an own piece selects it (or clears
    /// the selection when it is already selected), and any other click clears
    /// the selection.
    pub fn on_square_activated(&mut self, row: u8, col: u8) -> ChessResult<()> {
        if self.state.is_terminal() || self.is_thinking() || !self.is_human_turn() {
            trace!(row, col, "click ignored");
            return Ok(());
        }
        let Some(square) = Square::new(row, col) else {
            trace!(row, col, "click outside the board ignored");
            return Ok(());
        };

        if self.selected.is_some() {
            if let Some(mv) = self.hints.iter().copied().find(|mv| mv.to == square) {
                self.play(mv)?;
                return Ok(());
            }
        }

        let own_piece = self
            .board()
            .piece_at(square)
            .is_some_and(|piece| piece.color == self.state.side_to_move);
        if own_piece && self.selected != Some(square) {
            self.selected = Some(square);
            self.hints = self.state.legal_moves_from(square);
            debug!(square = ?square, hints = self.hints.len(), "piece selected");
        } else {
            self.clear_selection();
        }
        Ok(())
    }

    /// Plays `mv` for the human on move, as typed rather than clicked.
    pub fn submit_move(&mut self, mv: Move) -> ChessResult<MoveRecord> {
        if self.state.is_terminal() {
            return Err(ChessError::GameOver(self.state.status));
        }
        if self.is_thinking() {
            return Err(ChessError::SearchInProgress);
        }
        if !self.is_human_turn() {
            return Err(ChessError::IllegalMove(mv));
        }
        self.play(mv)
    }

    /// Applies the computer's move if its search has finished.
    ///
    /// A lost search worker is reported once and a fresh search is started,
    /// so the computer stays on move and later polls can still succeed.
    pub fn poll_ai(&mut self) -> ChessResult<Option<MoveRecord>> {
        let finished = self.search.try_finish();
        self.collect_ai_output(finished)
    }

    /// Blocks until the computer's search reports and applies its move.
    /// Worker loss is handled as in [`GameController::poll_ai`].
    pub fn wait_for_ai(&mut self) -> ChessResult<Option<MoveRecord>> {
        let finished = self.search.wait();
        self.collect_ai_output(finished)
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        self.state.settings.mode = mode;
        self.reset();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.state.settings.difficulty = difficulty;
        self.reset();
    }

    /// New game with the current settings; an outstanding search is dropped.
    pub fn reset(&mut self) {
        self.search.abandon();
        self.state.reset();
        self.clear_selection();
        self.events.clear();
        info!(
            mode = %self.state.settings.mode,
            difficulty = %self.state.settings.difficulty,
            "game reset"
        );
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.hints.clear();
    }

    fn play(&mut self, mv: Move) -> ChessResult<MoveRecord> {
        let record = self.state.apply_move(mv)?;
        self.clear_selection();
        self.queue_move_events(&record);
        self.start_ai_if_due()?;
        Ok(record)
    }

    fn collect_ai_output(
        &mut self,
        finished: ChessResult<Option<EngineOutput>>,
    ) -> ChessResult<Option<MoveRecord>> {
        match finished {
            Ok(Some(output)) => self.apply_ai_output(output).map(Some),
            Ok(None) => Ok(None),
            Err(ChessError::SearchWorkerLost) => {
                warn!(generation = self.search.generation(), "search worker lost, restarting");
                self.events.push_back(GameEvent::AiThinkingEnded);
                self.start_ai_if_due()?;
                Err(ChessError::SearchWorkerLost)
            }
            Err(err) => Err(err),
        }
    }

    fn apply_ai_output(&mut self, output: EngineOutput) -> ChessResult<MoveRecord> {
        self.events.push_back(GameEvent::AiThinkingEnded);
        let Some(mv) = output.best_move else {
            panic!(
                "search produced no move while the game is {}",
                self.state.status
            );
        };
        let record = self.state.apply_move(mv)?;
        self.queue_move_events(&record);
        Ok(record)
    }

    fn queue_move_events(&mut self, record: &MoveRecord) {
        if record.promoted {
            self.events.push_back(GameEvent::Promotion {
                square: record.mv.to,
                color: record.piece.color,
            });
        }
        match self.state.status {
            GameStatus::Check => self.events.push_back(GameEvent::Check {
                color: self.state.side_to_move,
            }),
            GameStatus::Checkmate => self.events.push_back(GameEvent::Checkmate {
                winner: record.piece.color,
            }),
            GameStatus::Stalemate => self.events.push_back(GameEvent::Stalemate),
            GameStatus::Active => {}
        }
    }

    fn start_ai_if_due(&mut self) -> ChessResult<()> {
        if self.state.is_terminal() || self.is_human_turn() {
            return Ok(());
        }
        self.search.start(
            (self.engine_factory)(),
            self.state.clone(),
            SearchParams::default(),
        )?;
        self.events.push_back(GameEvent::AiThinkingStarted);
        Ok(())
    }
}
