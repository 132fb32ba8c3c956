//! Terminal front end: a line-oriented game loop over `GameController`.
//!
//! Run with:
//! `cargo run --release -- --difficulty hard`
//! `RUST_LOG=plum_duel=debug cargo run -- --mode human`

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use plum_duel::controller::game_controller::GameController;
use plum_duel::game_state::settings::{Difficulty, GameMode, GameSettings};
use plum_duel::utils::fen_generator::generate_fen;
use plum_duel::utils::fen_parser::parse_fen_with_settings;
use plum_duel::utils::long_algebraic::long_algebraic_to_move;
use plum_duel::utils::render_game_state::render_game_state;

#[derive(Debug, Parser)]
#[command(name = "plum_duel", version, about = "Play chess against a minimax opponent")]
struct Args {
    /// `human` for two players at one terminal, `computer` to play white
    /// against the engine.
    #[arg(long, default_value_t = GameMode::HumanVsComputer)]
    mode: GameMode,

    /// easy, medium or hard (search depth 2, 3 or 4).
    #[arg(long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Save file, loaded on start when present.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Start from this position instead of the saved or initial one.
    #[arg(long, conflicts_with = "save")]
    fen: Option<String>,
}

const HELP: &str = "\
commands:
  e2e4            play a move in coordinate notation
  <row> <col>     click a square (row 0 is rank 8, col 0 is the a-file)
  board           show the board
  fen             print the position as FEN
  save            write the save file
  reset           start a new game
  mode <m>        human | computer (starts a new game)
  difficulty <d>  easy | medium | hard (starts a new game)
  quit";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let settings = GameSettings::new(args.mode, args.difficulty);

    let mut controller = match (&args.fen, &args.save) {
        (Some(fen), _) => GameController::from_state(parse_fen_with_settings(fen, settings)?)?,
        (None, Some(path)) => GameController::load_or_new(path, settings)?,
        (None, None) => GameController::new(settings),
    };

    println!("{HELP}\n");
    settle_ai(&mut controller)?;
    println!("{}", render_game_state(controller.state()));

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush().ok();

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let words: Vec<&str> = input.split_whitespace().collect();

        match words.as_slice() {
            [] => continue,
            ["quit" | "exit"] => break,
            ["help"] => println!("{HELP}"),
            ["board"] => println!("{}", render_game_state(controller.state())),
            ["fen"] => println!("{}", generate_fen(controller.state())),
            ["reset"] => {
                controller.reset();
                println!("{}", render_game_state(controller.state()));
            }
            ["save"] => match &args.save {
                Some(path) => {
                    controller
                        .save(path)
                        .with_context(|| format!("saving to {}", path.display()))?;
                    println!("saved to {}", path.display());
                }
                None => println!("no save file given, start with --save <path>"),
            },
            ["mode", mode] => match mode.parse::<GameMode>() {
                Ok(mode) => {
                    controller.set_mode(mode);
                    println!("{}", render_game_state(controller.state()));
                }
                Err(err) => println!("{err}"),
            },
            ["difficulty", difficulty] => match difficulty.parse::<Difficulty>() {
                Ok(difficulty) => {
                    controller.set_difficulty(difficulty);
                    println!("{}", render_game_state(controller.state()));
                }
                Err(err) => println!("{err}"),
            },
            [row, col] => {
                let (Ok(row), Ok(col)) = (row.parse::<u8>(), col.parse::<u8>()) else {
                    println!("expected two numbers, try 'help'");
                    continue;
                };
                controller.on_square_activated(row, col)?;
                report_selection(&controller);
                settle_ai(&mut controller)?;
            }
            [text] => {
                let state = controller.state();
                let parsed = long_algebraic_to_move(&state.position, state.side_to_move, text);
                match parsed.and_then(|mv| controller.submit_move(mv)) {
                    Ok(_) => {
                        settle_ai(&mut controller)?;
                        println!("{}", render_game_state(controller.state()));
                    }
                    Err(err) => println!("{err}"),
                }
            }
            _ => println!("unknown command, try 'help'"),
        }
    }

    if let Some(path) = &args.save {
        controller
            .save(path)
            .with_context(|| format!("saving to {}", path.display()))?;
    }
    Ok(())
}

/// Prints queued notifications, waiting for the computer when it is on move.
fn settle_ai(controller: &mut GameController) -> anyhow::Result<()> {
    for event in controller.drain_events() {
        println!("* {event}");
    }
    if controller.is_thinking() {
        let Some(record) = controller.wait_for_ai()? else {
            bail!("computer was thinking but no search was pending");
        };
        println!("computer plays {}", record.mv);
        for event in controller.drain_events() {
            println!("* {event}");
        }
    }
    Ok(())
}

fn report_selection(controller: &GameController) {
    match controller.selected_square() {
        Some(square) => {
            let targets: Vec<String> = controller
                .move_hints()
                .iter()
                .map(|hint| {
                    let marker = if hint.is_capture { "x" } else { "" };
                    format!("{marker}({},{})", hint.to.row, hint.to.col)
                })
                .collect();
            println!(
                "selected ({},{}): {}",
                square.row,
                square.col,
                targets.join(" ")
            );
        }
        None => println!("{}", render_game_state(controller.state())),
    }
}
