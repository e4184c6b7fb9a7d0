use std::fmt;
use std::str::FromStr;

use derive_more::{Display, Error};

use crate::constants::{CELLS, SIDE, SYMBOL_EMPTY, SYMBOL_FIRST, SYMBOL_SECOND};

/// Occupancy of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Moves first, shown as `X`.
    First,
    /// Moves second, shown as `O`.
    Second,
    #[default]
    Empty,
}

impl Mark {
    /// The other player. `Empty` has no opponent and maps to itself.
    pub fn opponent(self) -> Mark {
        match self {
            Mark::First => Mark::Second,
            Mark::Second => Mark::First,
            Mark::Empty => Mark::Empty,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::First => SYMBOL_FIRST,
            Mark::Second => SYMBOL_SECOND,
            Mark::Empty => SYMBOL_EMPTY,
        }
    }

    pub fn from_symbol(ch: char) -> Option<Mark> {
        match ch {
            'X' | 'x' => Some(Mark::First),
            'O' | 'o' => Some(Mark::Second),
            '.' | '-' | '_' => Some(Mark::Empty),
            _ => None,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The 3x3 grid, row-major, indices 0-8.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Mark; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Mark; CELLS]) -> Self {
        Self { cells }
    }

    /// Mark at `index`, or `None` when the index is off the board.
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[Mark; CELLS] {
        &self.cells
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&c| c == mark).count()
    }

    /// Write `mark` into `index` without any legality checks.
    ///
    /// Only the search uses this, always paired with [`Board::clear`] on the
    /// same cell before returning.
    pub(crate) fn place(&mut self, index: usize, mark: Mark) {
        self.cells[index] = mark;
    }

    pub(crate) fn clear(&mut self, index: usize) {
        self.cells[index] = Mark::Empty;
    }
}

/// Error returned when a board string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    #[display("unexpected character {found:?} in board")]
    BadCell { found: char },
    #[display("expected {} cells, found {found}", CELLS)]
    WrongLength { found: usize },
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parse nine cell symbols (`X`, `O`, `.`), ignoring whitespace and the
    /// separators `|`, `/` and `,`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [Mark::Empty; CELLS];
        let mut n = 0;
        for ch in s.chars() {
            if ch.is_whitespace() || matches!(ch, '|' | '/' | ',') {
                continue;
            }
            let mark = Mark::from_symbol(ch).ok_or(BoardParseError::BadCell { found: ch })?;
            if n < CELLS {
                cells[n] = mark;
            }
            n += 1;
        }
        if n != CELLS {
            return Err(BoardParseError::WrongLength { found: n });
        }
        Ok(Board { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIDE {
            for col in 0..SIDE {
                write!(f, "{} ", self.cells[row * SIDE + col])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
