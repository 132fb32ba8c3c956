//! Externally chosen game options.
//!
//! The core only reads these to decide whose turn triggers a search and how
//! deep that search goes. Changing either one resets the game.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ChessError;
use crate::game_state::chess_types::Color;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    HumanVsHuman,
    #[default]
    HumanVsComputer,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Search depth in plies.
    #[inline]
    pub const fn search_depth(self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSettings {
    pub mode: GameMode,
    pub difficulty: Difficulty,
}

impl GameSettings {
    pub const fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        Self { mode, difficulty }
    }

    /// The computer always takes black.
    #[inline]
    pub const fn ai_color(&self) -> Option<Color> {
        match self.mode {
            GameMode::HumanVsHuman => None,
            GameMode::HumanVsComputer => Some(Color::Black),
        }
    }

    #[inline]
    pub fn is_human(&self, color: Color) -> bool {
        self.ai_color() != Some(color)
    }
}

impl FromStr for GameMode {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" | "hvh" | "human-vs-human" => Ok(GameMode::HumanVsHuman),
            "computer" | "hvc" | "human-vs-computer" => Ok(GameMode::HumanVsComputer),
            _ => Err(ChessError::InvalidSetting(format!("unknown mode '{s}'"))),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ChessError::InvalidSetting(format!("unknown difficulty '{s}'"))),
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::HumanVsHuman => f.write_str("human-vs-human"),
            GameMode::HumanVsComputer => f.write_str("human-vs-computer"),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => f.write_str("easy"),
            Difficulty::Medium => f.write_str("medium"),
            Difficulty::Hard => f.write_str("hard"),
        }
    }
}
