//! Terminal tic-tac-toe - game controller and configuration
//!
//! The rules live in the `tictactoe_rules` crate. This crate holds the
//! state around them: whose turn it is, which mode is active, and when
//! the computer should move.
//!
//! # Architecture
//!
//! - **Controller**: [`GameState`] transitions and the [`GameController`]
//!   that schedules the computer's moves
//! - **Config**: [`AppConfig`] loaded from TOML with command-line overrides
//! - **Errors**: [`MoveRejection`] and [`ConfigError`]
//!
//! # Example
//!
//! ```
//! use tictactoe::{AppConfig, GameController, Input, Phase};
//! use tictactoe_rules::Position;
//!
//! let mut controller = GameController::new(&AppConfig::default());
//! controller.handle(Input::CellClicked(Position::TopLeft));
//! assert_eq!(controller.view().phase, Phase::WaitingForHuman);
//! assert_eq!(controller.view().status, "Player O's turn");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod error;

// Crate-level exports - Configuration
pub use config::{AppConfig, DEFAULT_CONFIG_FILE, Overrides};

// Crate-level exports - Controller
pub use controller::{
    GameController, GameState, Input, Mode, Phase, STARTING_MARK, ScheduledMove, View, apply_move,
    next_turn,
};

// Crate-level exports - Errors
pub use error::{ConfigError, MoveRejection};
