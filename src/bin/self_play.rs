//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin self_play -- --games 10 --difficulty easy`

use clap::Parser;
use tracing_subscriber::EnvFilter;

use plum_duel::engines::engine_minimax::MinimaxEngine;
use plum_duel::engines::engine_trait::{Engine, EngineOutput, SearchParams};
use plum_duel::game_state::game_state::GameState;
use plum_duel::game_state::settings::{Difficulty, GameMode, GameSettings};
use plum_duel::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};

#[derive(Debug, Parser)]
#[command(name = "self_play", about = "Play the minimax engine against itself")]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: u16,

    #[arg(long, default_value_t = 1234)]
    seed: u64,

    #[arg(long, default_value_t = 200)]
    max_plies: u16,

    /// Player 1's difficulty.
    #[arg(long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Player 2's difficulty; defaults to player 1's.
    #[arg(long)]
    opponent: Option<Difficulty>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let player1_depth = args.difficulty.search_depth();
    let player2_depth = args.opponent.unwrap_or(args.difficulty).search_depth();

    // Depths come from each engine, so the shared game's difficulty only
    // labels the saved settings.
    let initial = GameState::new(GameSettings::new(GameMode::HumanVsHuman, args.difficulty));

    let stats = play_engine_match_series(
        move || Box::new(FixedDepth::new(player1_depth)) as Box<dyn Engine>,
        move || Box::new(FixedDepth::new(player2_depth)) as Box<dyn Engine>,
        &initial,
        MatchSeriesConfig {
            games: args.games,
            base_seed: args.seed,
            per_game: MatchConfig {
                max_plies: args.max_plies,
                opening_min_plies: 2,
                opening_max_plies: 6,
                ..MatchConfig::default()
            },
        },
    )?;

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}

/// Minimax at a depth independent of the game's difficulty.
struct FixedDepth {
    engine: MinimaxEngine,
    depth: u8,
}

impl FixedDepth {
    fn new(depth: u8) -> Self {
        Self {
            engine: MinimaxEngine::new(),
            depth,
        }
    }
}

impl Engine for FixedDepth {
    fn name(&self) -> &str {
        self.engine.name()
    }

    fn choose_move(&mut self, game_state: &GameState, _params: &SearchParams) -> EngineOutput {
        self.engine.choose_move(
            game_state,
            &SearchParams {
                depth: Some(self.depth),
            },
        )
    }
}
