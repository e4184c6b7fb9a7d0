//! Computer self-play.
//!
//! A playout starts from the empty board and lets each side pick its moves
//! with [`choose_move`] at its own difficulty until the game ends.

use fastrand::Rng;
use tracing::{info, instrument};

use crate::board::{Board, Mark};
use crate::error::GameError;
use crate::rules::{GameStatus, TurnState};
use crate::search::{Difficulty, choose_move};

/// Moves and result of one finished game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRecord {
    /// Cell indices in the order they were played, first player first.
    pub moves: Vec<usize>,
    pub board: Board,
    pub status: GameStatus,
}

/// Play a full game between two computer players.
///
/// Returns an error only if the search violates its own contract, which would
/// be a bug.
#[instrument(level = "debug", skip(rng))]
pub fn play_out(
    first: Difficulty,
    second: Difficulty,
    rng: &mut Rng,
) -> Result<GameRecord, GameError> {
    let mut turn = TurnState::new();
    let mut moves = Vec::new();

    let status = loop {
        let difficulty = match turn.active {
            Mark::Second => second,
            _ => first,
        };
        let index = choose_move(&turn.board, turn.active, difficulty, rng)?;
        moves.push(index);
        let status = turn.play(index)?;
        if status.is_terminal() {
            break status;
        }
    };

    info!(?status, moves = moves.len(), "playout finished");
    Ok(GameRecord {
        moves,
        board: turn.board,
        status,
    })
}
