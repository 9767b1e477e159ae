//! Pure tic-tac-toe rules.
//!
//! - [`evaluate`] classifies a [`Board`] as ongoing, won (with the
//!   winning [`WinLine`]) or tied.
//! - [`recommend_move`] picks a move for the automated player using a
//!   greedy priority list.
//!
//! Both are side-effect free; boards are `Copy` values.
//!
//! # Example
//!
//! ```
//! use tictactoe_rules::{Board, Mark, Position, Verdict, evaluate, recommend_move};
//!
//! let board: Board = "XX_ OO_ ___".parse().unwrap();
//! assert_eq!(evaluate(&board), Verdict::Ongoing);
//! assert_eq!(recommend_move(&board, Mark::O, Mark::X), Some(Position::MiddleRight));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod position;
mod rules;
mod strategy;
mod types;

pub use position::Position;
pub use rules::{Verdict, WinLine, evaluate, winning_line};
pub use strategy::{Recommendation, Tier, recommend, recommend_move, recommend_move_with};
pub use types::{Board, BoardParseError, Cell, Mark};
