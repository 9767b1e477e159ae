//! Game state and its transitions.
//!
//! Every transition takes the state by value and returns the next one.
//! Inputs that are not legal in the current phase hand back the state
//! unchanged.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tictactoe_rules::{Board, Mark, Position, Verdict, WinLine, evaluate, recommend};
use tracing::{debug, info, instrument};

use crate::MoveRejection;

/// The mark that opens every game.
pub const STARTING_MARK: Mark = Mark::X;

/// Who the second seat belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Two humans share the keyboard.
    #[default]
    #[value(name = "pvp", alias = "player-vs-player")]
    PlayerVsPlayer,
    /// One human against the automated player.
    #[value(name = "pvai", alias = "player-vs-automated")]
    PlayerVsAutomated,
}

impl Mode {
    /// Returns the display label.
    pub fn label(self) -> &'static str {
        match self {
            Mode::PlayerVsPlayer => "Player vs Player",
            Mode::PlayerVsAutomated => "Player vs Computer",
        }
    }

    /// Returns the other mode.
    pub fn toggle(self) -> Self {
        match self {
            Mode::PlayerVsPlayer => Mode::PlayerVsAutomated,
            Mode::PlayerVsAutomated => Mode::PlayerVsPlayer,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Whose input the game is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Phase {
    /// A human may click a cell.
    WaitingForHuman,
    /// The automated player is due to move.
    WaitingForAutomated,
    /// The game has a verdict; only restart or a mode change apply.
    Terminal,
}

/// Places `mark` at `position` on a copy of `board`.
///
/// # Errors
///
/// Returns [`MoveRejection::GameOver`] if `board` already has a verdict and
/// [`MoveRejection::CellOccupied`] if the cell holds a mark.
#[instrument(skip(board), fields(board = %board))]
pub fn apply_move(board: &Board, position: Position, mark: Mark) -> Result<Board, MoveRejection> {
    if evaluate(board).is_terminal() {
        return Err(MoveRejection::GameOver);
    }
    if !board.is_empty(position) {
        return Err(MoveRejection::CellOccupied(position));
    }
    Ok(board.with(position, mark))
}

/// Returns the mark that moves after `mark`.
pub fn next_turn(mark: Mark) -> Mark {
    mark.opponent()
}

/// Board, turn and mode of the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct GameState {
    board: Board,
    turn: Mark,
    mode: Mode,
    automated_mark: Mark,
}

impl GameState {
    /// Creates a fresh game.
    ///
    /// `automated_mark` is only consulted in [`Mode::PlayerVsAutomated`].
    #[instrument]
    pub fn new(mode: Mode, automated_mark: Mark) -> Self {
        Self {
            board: Board::new(),
            turn: STARTING_MARK,
            mode,
            automated_mark,
        }
    }

    /// Current verdict, computed from the board.
    pub fn verdict(&self) -> Verdict {
        evaluate(&self.board)
    }

    /// Winning line to highlight, if the game was won.
    pub fn highlighted_line(&self) -> Option<WinLine> {
        self.verdict().line()
    }

    /// Returns true if the side to move is played by the computer.
    pub fn automated_to_move(&self) -> bool {
        self.mode == Mode::PlayerVsAutomated && self.turn == self.automated_mark
    }

    /// Derives the current phase.
    pub fn phase(&self) -> Phase {
        if self.verdict().is_terminal() {
            Phase::Terminal
        } else if self.automated_to_move() {
            Phase::WaitingForAutomated
        } else {
            Phase::WaitingForHuman
        }
    }

    /// Plays the side to move at `position` and passes the turn.
    fn place(self, position: Position) -> Result<Self, MoveRejection> {
        let board = apply_move(&self.board, position, self.turn)?;
        Ok(Self {
            board,
            turn: next_turn(self.turn),
            ..self
        })
    }

    /// Applies a human click.
    ///
    /// Ignored unless the phase is [`Phase::WaitingForHuman`] and the cell
    /// is empty.
    #[instrument(skip(self), fields(turn = %self.turn, phase = %self.phase()))]
    pub fn click(self, position: Position) -> Self {
        if self.phase() != Phase::WaitingForHuman {
            debug!("Click ignored outside human turn");
            return self;
        }
        match self.place(position) {
            Ok(next) => {
                info!(position = position.to_index(), mark = %self.turn, "Human move");
                next
            }
            Err(rejection) => {
                debug!(%rejection, "Move rejected");
                self
            }
        }
    }

    /// Plays the automated player's recommended move.
    ///
    /// Ignored unless the phase is [`Phase::WaitingForAutomated`].
    #[instrument(skip(self, rng), fields(turn = %self.turn, phase = %self.phase()))]
    pub fn automated_move<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        if self.phase() != Phase::WaitingForAutomated {
            debug!("Automated move skipped");
            return self;
        }
        let Some(rec) = recommend(&self.board, self.turn, self.turn.opponent(), rng) else {
            debug!("No move available");
            return self;
        };
        match self.place(rec.position) {
            Ok(next) => {
                info!(
                    position = rec.position.to_index(),
                    mark = %self.turn,
                    tier = %rec.tier,
                    "Automated move"
                );
                next
            }
            Err(rejection) => {
                debug!(%rejection, "Recommended move rejected");
                self
            }
        }
    }

    /// Switches mode and starts a new game.
    #[instrument(skip(self))]
    pub fn select_mode(self, mode: Mode) -> Self {
        info!(%mode, "Mode selected");
        Self::new(mode, self.automated_mark)
    }

    /// Starts a new game in the current mode.
    #[instrument(skip(self))]
    pub fn restart(self) -> Self {
        info!("Restarting game");
        Self::new(self.mode, self.automated_mark)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Mode::default(), Mark::O)
    }
}
