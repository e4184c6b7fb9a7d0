//! Tictac-Rust: tic-tac-toe rules and a perfect-play computer opponent.
//!
//! The core is two layers: a pure rules engine over 3x3 boards and an
//! exhaustive minimax search built on top of it. A session and a text
//! console drive the core for interactive play.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, win patterns, and search parameters
//! - [`board`] - Marks and the board value type
//! - [`rules`] - Legality, win and tie detection, turn bookkeeping
//! - [`search`] - Computer move selection by difficulty
//! - [`playout`] - Computer self-play
//! - [`session`] - Scores and difficulty across a series of games
//! - [`console`] - Line-oriented command console
//! - [`error`] - Error type for contract violations
//!
//! ## Example
//!
//! ```
//! use fastrand::Rng;
//! use tictac_rust::board::Mark;
//! use tictac_rust::rules::{GameStatus, TurnState};
//! use tictac_rust::search::{Difficulty, choose_move};
//!
//! let mut turn = TurnState::new();
//! turn.play(0).unwrap();
//!
//! // The computer answers a corner opening in the centre.
//! let mut rng = Rng::with_seed(1);
//! let reply = choose_move(&turn.board, turn.active, Difficulty::Hard, &mut rng).unwrap();
//! assert_eq!(reply, 4);
//! assert_eq!(turn.play(reply).unwrap(), GameStatus::InProgress);
//! assert_eq!(turn.active, Mark::First);
//! ```

pub mod board;
pub mod console;
pub mod constants;
pub mod error;
pub mod playout;
pub mod rules;
pub mod search;
pub mod session;
