//! Error type shared by the rules engine, the search, and the session.
//!
//! Every variant is a caller-contract violation: a correct driver never
//! triggers one. Nothing here is transient, so nothing is retried.

use derive_more::{Display, Error};

use crate::constants::CELLS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// Cell index outside 0-8.
    #[display("cell {index} is out of range (expected 0-{})", CELLS - 1)]
    OutOfRange { index: usize },
    /// Target cell is already occupied, the mark is empty, or the game is over.
    #[display("illegal move at cell {index}")]
    IllegalMove { index: usize },
    /// Search was asked to move on a finished board.
    #[display("no legal move: the game is already over")]
    NoLegalMove,
    /// Mark counts cannot arise from alternating play.
    #[display("position cannot arise from alternating play")]
    InvalidPosition,
    /// A session move was requested for the side that is not to play.
    #[display("move played out of turn")]
    OutOfTurn,
}
