//! Game controller: owns the current game and drives the automated player.

mod state;

pub use state::{GameState, Mode, Phase, STARTING_MARK, apply_move, next_turn};

use std::time::Duration;

use derive_getters::Getters;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tictactoe_rules::{Board, Mark, Position, Verdict, WinLine};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, instrument};

use crate::AppConfig;

/// An input from the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A cell was clicked.
    CellClicked(Position),
    /// A mode was chosen.
    ModeSelected(Mode),
    /// The player asked for a new game.
    RestartRequested,
}

/// An automated move waiting for its cosmetic delay to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct ScheduledMove {
    /// When the move becomes due.
    pub due: Instant,
    /// The mark that will play.
    pub mark: Mark,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    /// Board snapshot.
    pub board: Board,
    /// Verdict of `board`.
    pub verdict: Verdict,
    /// Line to emphasise when the game was won.
    pub highlighted: Option<WinLine>,
    /// Mark to move.
    pub turn: Mark,
    /// Current mode.
    pub mode: Mode,
    /// Current phase.
    pub phase: Phase,
    /// One-line status text.
    pub status: String,
}

/// Owns the game state, the RNG and the pending automated move.
#[derive(Debug, Getters)]
pub struct GameController {
    state: GameState,
    #[getter(skip)]
    rng: ChaCha8Rng,
    delay: Duration,
    pending: Option<ScheduledMove>,
}

impl GameController {
    /// Creates a controller from configuration.
    #[instrument(skip(config))]
    pub fn new(config: &AppConfig) -> Self {
        let rng = match config.seed() {
            Some(seed) => ChaCha8Rng::seed_from_u64(*seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut controller = Self {
            state: GameState::new(*config.mode(), *config.automated_mark()),
            rng,
            delay: Duration::from_millis(*config.ai_delay_ms()),
            pending: None,
        };
        controller.schedule(Instant::now());
        controller
    }

    /// Handles one front-end input. Returns true if the state changed.
    #[instrument(skip(self))]
    pub fn handle(&mut self, input: Input) -> bool {
        let before = self.state;
        self.state = match input {
            Input::CellClicked(position) => before.click(position),
            Input::ModeSelected(mode) => before.select_mode(mode),
            Input::RestartRequested => before.restart(),
        };
        if matches!(input, Input::ModeSelected(_) | Input::RestartRequested) {
            self.pending = None;
        }
        self.schedule(Instant::now());
        let changed = self.state != before || !matches!(input, Input::CellClicked(_));
        debug!(changed, phase = %self.state.phase(), "Input handled");
        changed
    }

    /// Fires the pending automated move if it is due at `now`.
    ///
    /// Returns the position played, if any.
    #[instrument(skip(self))]
    pub fn tick(&mut self, now: Instant) -> Option<Position> {
        match self.pending {
            Some(scheduled) if now >= scheduled.due => self.fire(now),
            _ => None,
        }
    }

    /// Waits for the pending automated move and plays it.
    ///
    /// Returns `None` immediately when nothing is scheduled.
    pub async fn run_pending(&mut self) -> Option<Position> {
        let scheduled = self.pending?;
        sleep_until(scheduled.due).await;
        self.fire(Instant::now())
    }

    /// Returns a render snapshot.
    pub fn view(&self) -> View {
        let verdict = self.state.verdict();
        let phase = self.state.phase();
        let turn = *self.state.turn();
        let status = match verdict {
            Verdict::Won { mark, .. } => format!("{mark} wins!"),
            Verdict::Tie => "It's a tie!".to_string(),
            Verdict::Ongoing if phase == Phase::WaitingForAutomated => {
                format!("Computer ({turn}) is thinking...")
            }
            Verdict::Ongoing => format!("Player {turn}'s turn"),
        };
        View {
            board: *self.state.board(),
            verdict,
            highlighted: verdict.line(),
            turn,
            mode: *self.state.mode(),
            phase,
            status,
        }
    }

    /// Plays the automated move after re-checking that it is still due.
    fn fire(&mut self, now: Instant) -> Option<Position> {
        let scheduled = self.pending.take()?;
        let gate_holds = self.state.phase() == Phase::WaitingForAutomated
            && *self.state.turn() == scheduled.mark;
        if !gate_holds {
            debug!(mark = %scheduled.mark, "Dropping stale automated move");
            return None;
        }

        let before = *self.state.board();
        self.state = self.state.automated_move(&mut self.rng);
        let played = Position::ALL
            .into_iter()
            .find(|pos| before.get(*pos) != self.state.board().get(*pos));
        self.schedule(now);
        played
    }

    /// Schedules an automated move if one is due and none is pending.
    fn schedule(&mut self, now: Instant) {
        if self.pending.is_some() || self.state.phase() != Phase::WaitingForAutomated {
            return;
        }
        let scheduled = ScheduledMove::new(now + self.delay, *self.state.turn());
        info!(mark = %scheduled.mark, delay_ms = self.delay.as_millis() as u64, "Automated move scheduled");
        self.pending = Some(scheduled);
    }
}
