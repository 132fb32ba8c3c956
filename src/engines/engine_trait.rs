//! Engine abstraction used by the controller and the self-play harness.
//!
//! Defines the request parameters and output payload so engine strategies
//! can be swapped behind a single trait.

use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchParams {
    /// Overrides the depth implied by the game's difficulty.
    pub depth: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    /// Value of `best_move` for the side that moves, after adjustments.
    pub score: Option<i32>,
    pub nodes: u64,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Picks a move for the side to move. `best_move` is `None` only when
    /// that side has no legal move.
    fn choose_move(&mut self, game_state: &GameState, params: &SearchParams) -> EngineOutput;
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn new_game(&mut self) {
        (**self).new_game()
    }

    fn choose_move(&mut self, game_state: &GameState, params: &SearchParams) -> EngineOutput {
        (**self).choose_move(game_state, params)
    }
}
