//! Terminal front end.

mod input;
mod ui;

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tictactoe::{AppConfig, GameController, Input};
use tictactoe_rules::Position;
use tokio::time::{Duration, Instant};
use tracing::{debug, error, info, instrument};

use input::{Action, map_key};

/// Runs the game until the player quits.
#[instrument(skip(config))]
pub async fn run_tui(config: &AppConfig) -> Result<()> {
    info!("Starting terminal UI");

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_game(&mut terminal, GameController::new(config)).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Draw, fire due automated moves, poll the keyboard.
async fn run_game(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut controller: GameController,
) -> Result<()> {
    let mut cursor = Position::Center;

    loop {
        let view = controller.view();
        terminal.draw(|f| ui::draw(f, &view, cursor))?;

        if let Some(pos) = controller.tick(Instant::now()) {
            debug!(position = pos.to_index(), "Automated move played");
            continue;
        }

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            // Skip key release events (crossterm fires both press and release on some platforms).
            if key.kind == KeyEventKind::Release {
                continue;
            }

            match map_key(key.code, cursor, view.mode) {
                Some(Action::Quit) => {
                    info!("User quit");
                    return Ok(());
                }
                Some(Action::Cursor(pos)) => cursor = pos,
                Some(Action::Game(input)) => {
                    if let Input::CellClicked(pos) = input {
                        cursor = pos;
                    }
                    controller.handle(input);
                }
                None => {}
            }
        }

        tokio::task::yield_now().await;
    }
}
