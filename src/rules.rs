//! Game rules: legality, win and tie detection, and turn bookkeeping.
//!
//! All functions here are pure over [`Board`] values. [`apply_move`] returns
//! a new board and never touches the caller's copy; `Board` is `Copy`, so
//! this costs nine bytes.
//!
//! [`TurnState`] bundles a board with the mark to move and the turn counter,
//! and is the only place where a board is advanced in place.

use tracing::instrument;

use crate::board::{Board, Mark};
use crate::constants::{CELLS, WIN_PATTERNS};
use crate::error::GameError;

/// Outcome of a position, always derived from the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Mark),
    Tied,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }

    /// Result line for a finished game, `None` while it is still running.
    pub fn message(self) -> Option<String> {
        match self {
            GameStatus::Won(mark) => Some(format!("Player {mark} wins!")),
            GameStatus::Tied => Some("It's a tie!".to_string()),
            GameStatus::InProgress => None,
        }
    }
}

fn check_index(index: usize) -> Result<(), GameError> {
    if index >= CELLS {
        return Err(GameError::OutOfRange { index });
    }
    Ok(())
}

/// Check whether cell `index` holds a mark.
///
/// # Errors
/// - [`GameError::OutOfRange`] if `index` is not in 0-8
pub fn is_occupied(board: &Board, index: usize) -> Result<bool, GameError> {
    check_index(index)?;
    Ok(board.cells()[index] != Mark::Empty)
}

/// Return a copy of `board` with `mark` written into `index`.
///
/// # Errors
/// - [`GameError::OutOfRange`] if `index` is not in 0-8
/// - [`GameError::IllegalMove`] if the cell is occupied or `mark` is `Empty`
pub fn apply_move(board: &Board, index: usize, mark: Mark) -> Result<Board, GameError> {
    if is_occupied(board, index)? || mark == Mark::Empty {
        return Err(GameError::IllegalMove { index });
    }
    let mut next = *board;
    next.place(index, mark);
    Ok(next)
}

/// The mark owning a complete win pattern, if any.
///
/// Patterns are scanned in [`WIN_PATTERNS`] order. A board where both marks
/// own a line cannot come from legal play; the first match is returned.
pub fn winner(board: &Board) -> Option<Mark> {
    let cells = board.cells();
    WIN_PATTERNS.iter().find_map(|&[a, b, c]| {
        let m = cells[a];
        (m != Mark::Empty && m == cells[b] && m == cells[c]).then_some(m)
    })
}

pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|&c| c != Mark::Empty)
}

/// Classify the board as won, tied, or still in progress.
pub fn status(board: &Board) -> GameStatus {
    if let Some(mark) = winner(board) {
        GameStatus::Won(mark)
    } else if is_full(board) {
        GameStatus::Tied
    } else {
        GameStatus::InProgress
    }
}

/// Indices of all empty cells, ascending.
pub fn empty_cells(board: &Board) -> Vec<usize> {
    (0..CELLS)
        .filter(|&i| board.cells()[i] == Mark::Empty)
        .collect()
}

/// Board, mark to move, and number of moves made so far.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TurnState {
    pub board: Board,
    pub active: Mark,
    pub turn_count: usize,
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnState {
    /// Empty board, first player to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            active: Mark::First,
            turn_count: 0,
        }
    }

    /// Reconstruct the turn state for an arbitrary board.
    ///
    /// The first player moves when the counts are equal, the second when the
    /// first player is one stone ahead.
    ///
    /// # Errors
    /// - [`GameError::InvalidPosition`] for any other count difference
    pub fn from_board(board: Board) -> Result<Self, GameError> {
        let first = board.count(Mark::First);
        let second = board.count(Mark::Second);
        let active = if first == second {
            Mark::First
        } else if first == second + 1 {
            Mark::Second
        } else {
            return Err(GameError::InvalidPosition);
        };
        Ok(Self {
            board,
            active,
            turn_count: first + second,
        })
    }

    pub fn status(&self) -> GameStatus {
        status(&self.board)
    }

    /// Play the active mark at `index` and pass the turn.
    ///
    /// The active mark is left unchanged once the game ends, so it names the
    /// player who made the last move.
    ///
    /// # Errors
    /// - [`GameError::OutOfRange`] if `index` is not in 0-8
    /// - [`GameError::IllegalMove`] if the cell is occupied or the game is over
    #[instrument(level = "debug", skip(self), fields(active = %self.active))]
    pub fn play(&mut self, index: usize) -> Result<GameStatus, GameError> {
        check_index(index)?;
        if self.status().is_terminal() {
            return Err(GameError::IllegalMove { index });
        }
        self.board = apply_move(&self.board, index, self.active)?;
        self.turn_count += 1;

        let status = self.status();
        if !status.is_terminal() {
            self.active = self.active.opponent();
        }
        Ok(status)
    }
}
