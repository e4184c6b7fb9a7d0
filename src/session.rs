//! A series of games between a human and the computer (or two humans).
//!
//! The session owns the canonical [`TurnState`], the difficulty, the random
//! source, and the running score. The human always plays the first mark and
//! the computer the second; neither may move for the other. A difficulty
//! change is held back until the next game starts.

use fastrand::Rng;
use tracing::{info, instrument};

use crate::board::Mark;
use crate::error::GameError;
use crate::rules::{GameStatus, TurnState};
use crate::search::{Difficulty, choose_move};

/// Cumulative results across games.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Scores {
    pub first: u32,
    pub second: u32,
    pub ties: u32,
}

impl Scores {
    fn record(&mut self, status: GameStatus) {
        match status {
            GameStatus::Won(Mark::First) => self.first += 1,
            GameStatus::Won(_) => self.second += 1,
            GameStatus::Tied => self.ties += 1,
            GameStatus::InProgress => {}
        }
    }
}

pub struct Session {
    turn: TurnState,
    difficulty: Difficulty,
    pending: Option<Difficulty>,
    computer: Mark,
    scores: Scores,
    rng: Rng,
}

impl Session {
    pub fn new(difficulty: Difficulty, rng: Rng) -> Self {
        Self {
            turn: TurnState::new(),
            difficulty,
            pending: None,
            computer: Mark::Second,
            scores: Scores::default(),
            rng,
        }
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.turn.status()
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Difficulty of the game in progress.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Difficulty waiting for the next game, if it differs from the current one.
    pub fn pending_difficulty(&self) -> Option<Difficulty> {
        self.pending
    }

    pub fn computer_mark(&self) -> Mark {
        self.computer
    }

    /// Clear the board and apply any pending difficulty. Scores are kept.
    pub fn new_game(&mut self) {
        if let Some(d) = self.pending.take() {
            self.difficulty = d;
        }
        self.turn = TurnState::new();
        info!(difficulty = %self.difficulty, "new game");
    }

    /// Schedule `difficulty` for the next game.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.pending = (difficulty != self.difficulty).then_some(difficulty);
    }

    pub fn reset_scores(&mut self) {
        self.scores = Scores::default();
    }

    /// Whether the next move belongs to the computer.
    pub fn computer_to_move(&self) -> bool {
        self.difficulty.has_computer()
            && self.turn.active == self.computer
            && !self.status().is_terminal()
    }

    /// Play a human move at `index`.
    ///
    /// # Errors
    /// - [`GameError::OutOfTurn`] if the computer is to move or the game is over
    /// - [`GameError::OutOfRange`] / [`GameError::IllegalMove`] from the rules
    #[instrument(level = "debug", skip(self))]
    pub fn human_move(&mut self, index: usize) -> Result<GameStatus, GameError> {
        if self.computer_to_move() || self.status().is_terminal() {
            return Err(GameError::OutOfTurn);
        }
        self.play(index)
    }

    /// Let the computer choose and play its move.
    ///
    /// # Errors
    /// - [`GameError::NoLegalMove`] if the game is already over
    /// - [`GameError::OutOfTurn`] if the human is to move or no computer plays
    #[instrument(level = "debug", skip(self))]
    pub fn computer_move(&mut self) -> Result<(usize, GameStatus), GameError> {
        if self.status().is_terminal() {
            return Err(GameError::NoLegalMove);
        }
        if !self.computer_to_move() {
            return Err(GameError::OutOfTurn);
        }
        let index = choose_move(
            &self.turn.board,
            self.turn.active,
            self.difficulty,
            &mut self.rng,
        )?;
        let status = self.play(index)?;
        Ok((index, status))
    }

    fn play(&mut self, index: usize) -> Result<GameStatus, GameError> {
        let status = self.turn.play(index)?;
        if status.is_terminal() {
            self.scores.record(status);
            info!(?status, turns = self.turn.turn_count, "game over");
        }
        Ok(status)
    }

    pub fn outcome_message(&self) -> Option<String> {
        self.status().message()
    }
}
