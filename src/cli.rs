//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tictactoe::{Mode, Overrides};
use tictactoe_rules::{Board, Mark};

/// Tic-tac-toe in the terminal, with an optional computer opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Terminal tic-tac-toe with a greedy computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play(PlayArgs),

    /// Print the verdict for a board
    Evaluate {
        /// Nine cells, e.g. "XX_OO____" (X, O, and _ or . for empty)
        board: Board,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the computer's move for a board
    Recommend {
        /// Nine cells, e.g. "XX_OO____" (X, O, and _ or . for empty)
        board: Board,

        /// Mark to move
        #[arg(short, long)]
        mark: Mark,

        /// Seed for random tie-breaks
        #[arg(long)]
        seed: Option<u64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Options for the `play` command
#[derive(Args, Debug, Default)]
pub struct PlayArgs {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Starting mode
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Mark played by the computer
    #[arg(long)]
    pub automated_mark: Option<Mark>,

    /// Delay before the computer moves, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Seed for the computer's random tie-breaks
    #[arg(long)]
    pub seed: Option<u64>,
}

impl PlayArgs {
    /// Collects the flags that override the config file.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            mode: self.mode,
            automated_mark: self.automated_mark,
            ai_delay_ms: self.delay_ms,
            seed: self.seed,
        }
    }
}
