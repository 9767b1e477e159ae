//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board) snapshot. Nothing here
//! stores state; verdicts are recomputed from the board every time.

mod verdict;
mod win;

pub use verdict::{Verdict, evaluate};
pub use win::{WinLine, winning_line};
