//! Core domain types for tic-tac-toe.

use std::str::FromStr;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::Position;

/// A player's mark.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, strum::EnumIter,
)]
pub enum Mark {
    /// Mark X (always moves first).
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl FromStr for Mark {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Mark::X),
            "O" | "o" => Ok(Mark::O),
            other => Err(BoardParseError::UnknownSymbol(
                other.chars().next().unwrap_or(' '),
            )),
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell holds a mark.
    Marked(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Marked(mark) => Some(mark),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '_',
            Cell::Marked(Mark::X) => 'X',
            Cell::Marked(Mark::O) => 'O',
        }
    }
}

/// Error returned when a board string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// The string did not contain exactly nine cell symbols.
    #[display("expected 9 cells, found {_0}")]
    WrongLength(#[error(not(source))] usize),
    /// A symbol other than X, O, `_` or `.` was found.
    #[display("unknown cell symbol {_0:?}")]
    UnknownSymbol(#[error(not(source))] char),
}

/// 3x3 tic-tac-toe board.
///
/// Boards are plain values: placing a mark produces a new board and
/// leaves the original untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board directly from its nine cells.
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Sets the cell at the given position in place.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.to_index()] = cell;
    }

    /// Returns a copy of this board with `mark` placed at `pos`.
    #[must_use]
    pub fn with(&self, pos: Position, mark: Mark) -> Self {
        let mut next = *self;
        next.set(pos, Cell::Marked(mark));
        next
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Checks if every cell holds a mark.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Returns the empty positions in ascending index order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(move |pos| self.is_empty(*pos))
    }

    /// Counts the cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Marked(mark))
            .count()
    }

    /// Returns true if the mark counts are consistent with X moving first
    /// and the players alternating.
    #[instrument(skip(self))]
    pub fn is_alternating(&self) -> bool {
        let x = self.count(Mark::X);
        let o = self.count(Mark::O);
        x == o || x == o + 1
    }

    /// Formats the board as a 3x3 grid, numbering empty cells 1-9.
    pub fn grid(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let idx = row * 3 + col;
                match self.cells[idx] {
                    Cell::Empty => result.push_str(&(idx + 1).to_string()),
                    cell => result.push(cell.symbol()),
                }
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", cell.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses nine symbols (`X`, `O`, `_` or `.`), ignoring whitespace
    /// and `|` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();
        if symbols.len() != 9 {
            return Err(BoardParseError::WrongLength(symbols.len()));
        }

        let mut cells = [Cell::Empty; 9];
        for (cell, symbol) in cells.iter_mut().zip(symbols) {
            *cell = match symbol {
                'X' | 'x' => Cell::Marked(Mark::X),
                'O' | 'o' => Cell::Marked(Mark::O),
                '_' | '.' => Cell::Empty,
                other => return Err(BoardParseError::UnknownSymbol(other)),
            };
        }
        Ok(Self { cells })
    }
}
