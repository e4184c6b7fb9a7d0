//! Constants for board geometry, win patterns, and search parameters.
//!
//! The board is a flat array of [`CELLS`] cells in row-major order:
//!
//! ```text
//!  0 | 1 | 2
//! ---+---+---
//!  3 | 4 | 5
//! ---+---+---
//!  6 | 7 | 8
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Side length of the square board.
pub const SIDE: usize = 3;

/// Number of cells on the board.
pub const CELLS: usize = SIDE * SIDE;

/// The eight lines whose uniform occupation ends the game.
/// Order: rows, columns, diagonals.
pub const WIN_PATTERNS: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

// =============================================================================
// Search Parameters
// =============================================================================

/// Base score of a won terminal position. The ply depth is subtracted so
/// that faster wins (and slower losses) are preferred.
pub const WIN_SCORE: i32 = 10;

/// Probability that a Medium computer plays the Hard move on a given turn.
pub const MEDIUM_HARD_PROBABILITY: f64 = 0.5;

// =============================================================================
// Cell Symbols
// =============================================================================

/// First player's mark.
pub const SYMBOL_FIRST: char = 'X';

/// Second player's mark.
pub const SYMBOL_SECOND: char = 'O';

/// Empty cell.
pub const SYMBOL_EMPTY: char = '.';
