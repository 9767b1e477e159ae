//! Keyboard mapping.

use crossterm::event::KeyCode;
use tictactoe::{Input, Mode};
use tictactoe_rules::Position;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Forward to the controller.
    Game(Input),
    /// Move the cursor.
    Cursor(Position),
    /// Leave the game.
    Quit,
}

/// Maps a key to an action given the cursor and current mode.
pub fn map_key(key: KeyCode, cursor: Position, mode: Mode) -> Option<Action> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('r') => Some(Action::Game(Input::RestartRequested)),
        KeyCode::Char('p') => Some(Action::Game(Input::ModeSelected(Mode::PlayerVsPlayer))),
        KeyCode::Char('a') => Some(Action::Game(Input::ModeSelected(Mode::PlayerVsAutomated))),
        KeyCode::Char('m') => Some(Action::Game(Input::ModeSelected(mode.toggle()))),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .and_then(|d| Position::from_index(d as usize - 1))
            .map(|pos| Action::Game(Input::CellClicked(pos))),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Game(Input::CellClicked(cursor))),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Some(Action::Cursor(move_cursor(cursor, key)))
        }
        _ => None,
    }
}

/// Moves the cursor one step, stopping at the board edge.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let target = match key {
        KeyCode::Up => Position::from_row_col(row.wrapping_sub(1), col),
        KeyCode::Down => Position::from_row_col(row + 1, col),
        KeyCode::Left => Position::from_row_col(row, col.wrapping_sub(1)),
        KeyCode::Right => Position::from_row_col(row, col + 1),
        _ => None,
    };
    target.unwrap_or(cursor)
}
