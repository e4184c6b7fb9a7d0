//! Tictac-Rust: tic-tac-toe with a perfect-play computer opponent.
//!
//! ## Usage
//!
//! - `tictac-rust` - Start the command console (same as `play`)
//! - `tictac-rust play` - Play against the computer over stdin/stdout
//! - `tictac-rust demo` - Watch the computer play itself
//! - `tictac-rust analyze <BOARD>` - Score every legal move on a board
//!
//! Set `RUST_LOG=debug` to see search traces on stderr.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fastrand::Rng;
use tracing_subscriber::EnvFilter;

use tictac_rust::board::Board;
use tictac_rust::console::Console;
use tictac_rust::playout::play_out;
use tictac_rust::rules::TurnState;
use tictac_rust::search::{Difficulty, analyze, best_move};
use tictac_rust::session::Session;

/// Tictac-Rust: tic-tac-toe engine with an exhaustive minimax opponent
#[derive(Parser)]
#[command(name = "tictac-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for the random source used by easy and medium play
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Computer strength: easy, medium, hard or human (two players)
    #[arg(long, global = true, default_value = "hard")]
    difficulty: Difficulty,

    /// Pause before the computer answers a move, in milliseconds
    #[arg(long, global = true, default_value_t = 0)]
    delay_ms: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the command console for a human against the computer
    Play,
    /// Let the computer play both sides at the chosen difficulty
    Demo,
    /// Print the minimax score of every legal move, e.g. "XX.OO...."
    Analyze {
        /// Nine cells: X, O or . (separators |, / and spaces are ignored)
        board: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let rng = match cli.seed {
        Some(seed) => Rng::with_seed(seed),
        None => Rng::new(),
    };

    match cli.command {
        Some(Commands::Play) | None => {
            let session = Session::new(cli.difficulty, rng);
            let mut console =
                Console::with_reply_delay(session, Duration::from_millis(cli.delay_ms));
            console.run()
        }
        Some(Commands::Demo) => run_demo(cli.difficulty, rng),
        Some(Commands::Analyze { board }) => run_analyze(&board),
    }
}

fn run_demo(difficulty: Difficulty, mut rng: Rng) -> Result<()> {
    println!("Tictac-Rust: {difficulty} vs {difficulty}\n");

    let record = play_out(difficulty, difficulty, &mut rng).context("self-play failed")?;

    let mut turn = TurnState::new();
    for &index in &record.moves {
        let mark = turn.active;
        turn.play(index).context("replaying self-play record")?;
        println!("{mark} plays {index}");
        println!("{}", turn.board);
    }

    if let Some(outcome) = record.status.message() {
        println!("{outcome}");
    }
    Ok(())
}

fn run_analyze(text: &str) -> Result<()> {
    let board: Board = text
        .parse()
        .with_context(|| format!("invalid board {text:?}"))?;
    let turn = TurnState::from_board(board).context("board is not reachable")?;

    println!("{board}");
    if let Some(outcome) = turn.status().message() {
        println!("{outcome}");
        return Ok(());
    }

    println!("{} to move", turn.active);
    for score in analyze(&board, turn.active) {
        println!(
            "cell {} score {:>3} ({} nodes)",
            score.index, score.score, score.nodes
        );
    }
    if let Some(index) = best_move(&board, turn.active) {
        println!("Best move: {index}");
    }
    Ok(())
}

