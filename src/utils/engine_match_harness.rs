//! Head-to-head engine matches for local testing.
//!
//! Runs two `Engine` implementations against each other on a live
//! `GameState`, with an optional seeded random opening prefix so repeated
//! games between deterministic engines still differ.

use std::time::Instant;

use rand::seq::IndexedRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

use crate::engines::engine_trait::{Engine, SearchParams};
use crate::errors::ChessResult;
use crate::game_state::chess_types::{Color, GameStatus};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::legal_moves_for_color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWinCheckmate,
    BlackWinCheckmate,
    DrawStalemate,
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWinCheckmate { player: PlayerId, color: Color },
    DrawStalemate,
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
    pub params: SearchParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 300,
            opening_min_plies: 2,
            opening_max_plies: 8,
            params: SearchParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: GameState,
    pub opening_moves_lan: Vec<String>,
    pub played_moves_lan: Vec<String>,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

#[derive(Debug, Clone, Copy)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
}

impl MatchSeriesStats {
    pub fn player1_avg_move_time_ms(&self) -> f64 {
        avg_ns_per_move_ms(self.player1_total_time_ns, self.player1_moves)
    }

    pub fn player2_avg_move_time_ms(&self) -> f64 {
        avg_ns_per_move_ms(self.player2_total_time_ns, self.player2_moves)
    }

    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms(),
            self.player2_avg_move_time_ms()
        )
    }
}

/// Play a single seeded match starting from `initial`.
///
/// `engine_white` is White, `engine_black` is Black.
pub fn play_engine_match(
    engine_white: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    initial: GameState,
    seed: u64,
    config: MatchConfig,
) -> ChessResult<MatchResult> {
    engine_white.new_game();
    engine_black.new_game();

    let (mut state, opening_moves_lan) = apply_seeded_random_opening(
        initial,
        seed,
        config.opening_min_plies,
        config.opening_max_plies,
    )?;

    let mut played_moves_lan = Vec::new();
    let mut white_move_count = 0u32;
    let mut black_move_count = 0u32;
    let mut white_total_time_ns = 0u128;
    let mut black_total_time_ns = 0u128;

    let mut plies = 0u16;
    while !state.is_terminal() && plies < config.max_plies {
        let mover = state.side_to_move;
        let started = Instant::now();
        let out = match mover {
            Color::White => engine_white.choose_move(&state, &config.params),
            Color::Black => engine_black.choose_move(&state, &config.params),
        };
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Color::White => {
                white_move_count = white_move_count.saturating_add(1);
                white_total_time_ns = white_total_time_ns.saturating_add(elapsed_ns);
            }
            Color::Black => {
                black_move_count = black_move_count.saturating_add(1);
                black_total_time_ns = black_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let Some(chosen) = out.best_move else {
            panic!("engine returned no move while the game is {}", state.status);
        };
        debug!(ply = plies, color = %mover, mv = %chosen, "match move");
        played_moves_lan.push(chosen.to_string());
        state.apply_move(chosen)?;
        plies += 1;
    }

    let outcome = match state.status {
        GameStatus::Checkmate => match state.side_to_move {
            Color::White => MatchOutcome::BlackWinCheckmate,
            Color::Black => MatchOutcome::WhiteWinCheckmate,
        },
        GameStatus::Stalemate => MatchOutcome::DrawStalemate,
        GameStatus::Active | GameStatus::Check => MatchOutcome::DrawMaxPlies,
    };

    Ok(MatchResult {
        outcome,
        final_state: state,
        opening_moves_lan,
        played_moves_lan,
        white_move_count,
        black_move_count,
        white_total_time_ns,
        black_total_time_ns,
    })
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Player colors are randomized each game (deterministic from `base_seed`).
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    initial: &GameState,
    config: MatchSeriesConfig,
) -> ChessResult<MatchSeriesStats>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.base_seed);

    for game_idx in 0..config.games {
        let seed = config.base_seed.wrapping_add(u64::from(game_idx));
        let player1_is_white = color_rng.random_bool(0.5);
        let mut player1 = player1_factory();
        let mut player2 = player2_factory();

        let result = if player1_is_white {
            play_engine_match(
                player1.as_mut(),
                player2.as_mut(),
                initial.clone(),
                seed,
                config.per_game,
            )?
        } else {
            play_engine_match(
                player2.as_mut(),
                player1.as_mut(),
                initial.clone(),
                seed,
                config.per_game,
            )?
        };

        let (p1_moves, p1_ns, p2_moves, p2_ns) = if player1_is_white {
            (
                result.white_move_count,
                result.white_total_time_ns,
                result.black_move_count,
                result.black_total_time_ns,
            )
        } else {
            (
                result.black_move_count,
                result.black_total_time_ns,
                result.white_move_count,
                result.white_total_time_ns,
            )
        };
        stats.player1_moves += p1_moves;
        stats.player1_total_time_ns += p1_ns;
        stats.player2_moves += p2_moves;
        stats.player2_total_time_ns += p2_ns;

        let winner_color = match result.outcome {
            MatchOutcome::WhiteWinCheckmate => Some(Color::White),
            MatchOutcome::BlackWinCheckmate => Some(Color::Black),
            MatchOutcome::DrawStalemate | MatchOutcome::DrawMaxPlies => None,
        };
        let series_outcome = match winner_color {
            Some(color) => {
                let player = if (color == Color::White) == player1_is_white {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                };
                SeriesOutcome::PlayerWinCheckmate { player, color }
            }
            None => {
                stats.draws += 1;
                match result.outcome {
                    MatchOutcome::DrawStalemate => SeriesOutcome::DrawStalemate,
                    _ => SeriesOutcome::DrawMaxPlies,
                }
            }
        };
        info!(
            game = game_idx + 1,
            outcome = ?series_outcome,
            plies = result.final_state.history.len(),
            "series game finished"
        );
        stats.outcomes.push(series_outcome);
    }

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

fn apply_seeded_random_opening(
    initial: GameState,
    seed: u64,
    min_plies: u8,
    max_plies: u8,
) -> ChessResult<(GameState, Vec<String>)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = initial;
    let mut opening_moves_lan = Vec::new();

    let low = min_plies.min(max_plies);
    let high = max_plies.max(min_plies);
    let target_plies = if low == high {
        low
    } else {
        rng.random_range(low..=high)
    };

    for _ in 0..target_plies {
        let legal_moves = legal_moves_for_color(&state.position, state.side_to_move);
        let Some(&chosen) = legal_moves.choose(&mut rng) else {
            break;
        };
        opening_moves_lan.push(chosen.to_string());
        state.apply_move(chosen)?;
    }

    Ok((state, opening_moves_lan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_minimax::MinimaxEngine;
    use crate::engines::engine_trait::EngineOutput;

    /// Uniformly random legal moves from a fixed seed.
    struct RandomEngine {
        rng: StdRng,
    }

    impl Engine for RandomEngine {
        fn name(&self) -> &str {
            "random"
        }

        fn choose_move(&mut self, game_state: &GameState, _: &SearchParams) -> EngineOutput {
            let moves = legal_moves_for_color(&game_state.position, game_state.side_to_move);
            EngineOutput {
                best_move: moves.choose(&mut self.rng).copied(),
                ..EngineOutput::default()
            }
        }
    }

    #[test]
    fn match_runs_and_replays_identically() {
        let config = MatchConfig {
            max_plies: 12,
            opening_min_plies: 2,
            opening_max_plies: 4,
            params: SearchParams { depth: Some(1) },
        };
        let run = || {
            play_engine_match(
                &mut MinimaxEngine::new(),
                &mut RandomEngine {
                    rng: StdRng::seed_from_u64(5),
                },
                GameState::new_game(),
                42,
                config,
            )
            .expect("match should run")
        };
        let first = run();
        let second = run();

        assert!((2..=4).contains(&first.opening_moves_lan.len()));
        assert_eq!(first.played_moves_lan, second.played_moves_lan);
        assert_eq!(
            first.final_state.history.len(),
            first.opening_moves_lan.len() + first.played_moves_lan.len()
        );
        assert!(first.played_moves_lan.len() <= 12);
    }

    #[test]
    fn series_counts_every_game() {
        let stats = play_engine_match_series(
            || Box::new(MinimaxEngine::new()),
            || {
                Box::new(RandomEngine {
                    rng: StdRng::seed_from_u64(9),
                })
            },
            &GameState::new_game(),
            MatchSeriesConfig {
                games: 3,
                base_seed: 777,
                per_game: MatchConfig {
                    max_plies: 8,
                    opening_min_plies: 0,
                    opening_max_plies: 2,
                    params: SearchParams { depth: Some(1) },
                },
            },
        )
        .expect("series should run");

        assert_eq!(stats.games, 3);
        assert_eq!(stats.outcomes.len(), 3);
        assert_eq!(
            stats.player1_wins + stats.player2_wins + stats.draws,
            stats.games
        );
        assert!(stats.report().starts_with("games=3"));
    }
}
