//! Win lines and win detection.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{Board, Cell, Mark, Position};

/// One of the eight index triples that wins the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine([Position; 3]);

impl WinLine {
    /// All eight lines: rows, then columns, then diagonals.
    pub const ALL: [WinLine; 8] = [
        // Rows
        WinLine([Position::TopLeft, Position::TopCenter, Position::TopRight]),
        WinLine([Position::MiddleLeft, Position::Center, Position::MiddleRight]),
        WinLine([Position::BottomLeft, Position::BottomCenter, Position::BottomRight]),
        // Columns
        WinLine([Position::TopLeft, Position::MiddleLeft, Position::BottomLeft]),
        WinLine([Position::TopCenter, Position::Center, Position::BottomCenter]),
        WinLine([Position::TopRight, Position::MiddleRight, Position::BottomRight]),
        // Diagonals
        WinLine([Position::TopLeft, Position::Center, Position::BottomRight]),
        WinLine([Position::TopRight, Position::Center, Position::BottomLeft]),
    ];

    /// The three positions of this line.
    pub fn positions(&self) -> [Position; 3] {
        self.0
    }

    /// The three board indices of this line.
    pub fn indices(&self) -> [usize; 3] {
        self.0.map(Position::to_index)
    }

    /// Returns true if `pos` lies on this line.
    pub fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }

    /// Returns the mark filling all three cells, if any.
    pub fn owner(&self, board: &Board) -> Option<Mark> {
        let [a, b, c] = self.0;
        match board.get(a) {
            Cell::Marked(mark) if board.get(b) == board.get(a) && board.get(c) == board.get(a) => {
                Some(mark)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for WinLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.indices();
        write!(f, "{a}-{b}-{c}")
    }
}

/// Finds the first line (in [`WinLine::ALL`] order) owned by one mark.
#[instrument(skip(board), fields(board = %board))]
pub fn winning_line(board: &Board) -> Option<(Mark, WinLine)> {
    WinLine::ALL
        .iter()
        .find_map(|line| line.owner(board).map(|mark| (mark, *line)))
}
