//! Terminal-state classification.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::win::{WinLine, winning_line};
use crate::{Board, Mark};

/// Classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// Play continues.
    Ongoing,
    /// `mark` owns `line`.
    Won {
        /// The winning mark.
        mark: Mark,
        /// The line it completed.
        line: WinLine,
    },
    /// Board is full with no winning line.
    Tie,
}

impl Verdict {
    /// Returns true once no more moves may be played.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Verdict::Ongoing)
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Verdict::Won { mark, .. } => Some(*mark),
            _ => None,
        }
    }

    /// Returns the winning line, if any.
    pub fn line(&self) -> Option<WinLine> {
        match self {
            Verdict::Won { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Ongoing => write!(f, "Ongoing"),
            Verdict::Won { mark, line } => write!(f, "{mark} wins on {line}"),
            Verdict::Tie => write!(f, "Tie"),
        }
    }
}

/// Evaluates a board.
///
/// Scans the eight lines in order and reports the first one held by a
/// single mark. A full board without such a line is a tie.
#[instrument(skip(board), fields(board = %board))]
pub fn evaluate(board: &Board) -> Verdict {
    if let Some((mark, line)) = winning_line(board) {
        return Verdict::Won { mark, line };
    }
    if board.is_full() {
        Verdict::Tie
    } else {
        Verdict::Ongoing
    }
}
