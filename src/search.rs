//! Computer move selection.
//!
//! This module implements:
//! - Exhaustive minimax over the full game tree (the Hard strategy)
//! - Uniform random play among empty cells (the Easy strategy)
//! - A per-move coin flip between the two (the Medium strategy)
//!
//! The minimax search scores terminal positions from the point of view of the
//! mark to move at the root: a win scores `WIN_SCORE - depth`, a loss
//! `depth - WIN_SCORE`, a tie `0`, with `depth` counted in plies from the
//! root. Faster wins and slower losses are therefore preferred.
//!
//! There is no pruning and no transposition table; from the empty board the
//! tree has fewer than 550,000 nodes. Exploration backtracks on a private copy
//! of the board, so callers always get their board back unchanged.

use std::fmt;
use std::str::FromStr;

use derive_more::{Display, Error};
use fastrand::Rng;
use tracing::{debug, instrument};

use crate::board::{Board, Mark};
use crate::constants::{CELLS, MEDIUM_HARD_PROBABILITY, WIN_SCORE};
use crate::error::GameError;
use crate::rules::{GameStatus, empty_cells, status};

/// How strongly the computer plays.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
    /// Two humans; the driver never schedules a computer move.
    HumanVsHuman,
}

impl Difficulty {
    /// Whether a computer player takes part at this setting.
    pub fn has_computer(self) -> bool {
        self != Difficulty::HumanVsHuman
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::HumanVsHuman => "human",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("unknown difficulty {input:?} (expected easy, medium, hard or human)")]
pub struct ParseDifficultyError {
    input: String,
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "human" | "hvh" => Ok(Difficulty::HumanVsHuman),
            _ => Err(ParseDifficultyError {
                input: s.to_string(),
            }),
        }
    }
}

/// A legal root move with its minimax score.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveScore {
    pub index: usize,
    pub score: i32,
    /// Positions visited while scoring this move.
    pub nodes: u64,
}

/// Choose a move for `active` on `board` at the given difficulty.
///
/// `HumanVsHuman` plays like `Hard` if asked; drivers should not ask.
///
/// # Errors
/// - [`GameError::NoLegalMove`] if the board is already won or full, or
///   `active` is `Empty`
#[instrument(level = "debug", skip(board, rng), fields(board = %board_key(board)))]
pub fn choose_move(
    board: &Board,
    active: Mark,
    difficulty: Difficulty,
    rng: &mut Rng,
) -> Result<usize, GameError> {
    if active == Mark::Empty || status(board) != GameStatus::InProgress {
        return Err(GameError::NoLegalMove);
    }

    let hard = match difficulty {
        Difficulty::Easy => false,
        Difficulty::Medium => rng.f64() < MEDIUM_HARD_PROBABILITY,
        Difficulty::Hard | Difficulty::HumanVsHuman => true,
    };

    let chosen = if hard {
        best_move(board, active)
    } else {
        random_move(board, rng)
    };
    let index = chosen.ok_or(GameError::NoLegalMove)?;
    debug!(index, hard, "computer move chosen");
    Ok(index)
}

/// Uniformly random empty cell, or `None` on a full board.
pub fn random_move(board: &Board, rng: &mut Rng) -> Option<usize> {
    let empties = empty_cells(board);
    if empties.is_empty() {
        return None;
    }
    Some(empties[rng.usize(..empties.len())])
}

/// The optimal move for `me`, or `None` if the board has no empty cell.
///
/// Ties between equally scored moves go to the lowest index.
pub fn best_move(board: &Board, me: Mark) -> Option<usize> {
    let mut best: Option<MoveScore> = None;
    for candidate in analyze(board, me) {
        if best.is_none_or(|b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best.map(|b| b.index)
}

/// Score every legal move for `me`, in ascending cell order.
pub fn analyze(board: &Board, me: Mark) -> Vec<MoveScore> {
    let mut scratch = *board;
    let scores = score_moves(&mut scratch, me);

    debug!(
        moves = scores.len(),
        nodes = scores.iter().map(|s| s.nodes).sum::<u64>(),
        "root moves scored"
    );
    scores
}

/// Score each empty cell of `scratch` for `me`, backtracking in place.
/// `scratch` holds the same marks on return as on entry.
fn score_moves(scratch: &mut Board, me: Mark) -> Vec<MoveScore> {
    let mut scores = Vec::new();

    for index in 0..CELLS {
        if scratch.cells()[index] != Mark::Empty {
            continue;
        }
        let mut nodes = 0;
        scratch.place(index, me);
        let score = minimax(scratch, me, 1, false, &mut nodes);
        scratch.clear(index);
        scores.push(MoveScore {
            index,
            score,
            nodes,
        });
    }

    scores
}

/// Minimax value of `board` for `me`, `depth` plies below the root.
///
/// `maximizing` is true when `me` is the side to move. The board is restored
/// before returning.
fn minimax(board: &mut Board, me: Mark, depth: i32, maximizing: bool, nodes: &mut u64) -> i32 {
    *nodes += 1;

    match status(board) {
        GameStatus::Won(mark) if mark == me => return WIN_SCORE - depth,
        GameStatus::Won(_) => return depth - WIN_SCORE,
        GameStatus::Tied => return 0,
        GameStatus::InProgress => {}
    }

    let mover = if maximizing { me } else { me.opponent() };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for index in 0..CELLS {
        if board.cells()[index] != Mark::Empty {
            continue;
        }
        board.place(index, mover);
        let score = minimax(board, me, depth + 1, !maximizing, nodes);
        board.clear(index);

        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    best
}

/// Compact one-line board rendering for log fields.
fn board_key(board: &Board) -> String {
    board.cells().iter().map(|m| m.symbol()).collect()
}
