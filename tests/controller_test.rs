//! Tests for the game controller and its automated-move scheduling.

use std::time::Duration;

use tictactoe::{AppConfig, GameController, Input, Mode, Overrides, Phase};
use tictactoe_rules::{Board, Mark, Position, Verdict};
use tokio::time::Instant;

fn config(mode: Mode, automated_mark: Mark) -> AppConfig {
    AppConfig::default().with_overrides(Overrides {
        mode: Some(mode),
        automated_mark: Some(automated_mark),
        ai_delay_ms: Some(500),
        seed: Some(42),
    })
}

fn click(controller: &mut GameController, idx: usize) -> bool {
    controller.handle(Input::CellClicked(Position::from_index(idx).unwrap()))
}

#[test]
fn test_pvp_first_click() {
    let mut controller = GameController::new(&config(Mode::PlayerVsPlayer, Mark::O));
    assert!(click(&mut controller, 0));

    let view = controller.view();
    assert_eq!(view.board, "X________".parse::<Board>().unwrap());
    assert_eq!(view.turn, Mark::O);
    assert_eq!(view.verdict, Verdict::Ongoing);
    assert!(controller.pending().is_none());
}

#[test]
fn test_pvp_win_highlights_line_and_blocks_input() {
    let mut controller = GameController::new(&config(Mode::PlayerVsPlayer, Mark::O));
    for idx in [0, 3, 4, 5, 8] {
        click(&mut controller, idx);
    }
    let view = controller.view();
    assert_eq!(view.phase, Phase::Terminal);
    assert_eq!(view.verdict.winner(), Some(Mark::X));
    assert_eq!(view.highlighted.map(|l| l.indices()), Some([0, 4, 8]));
    assert_eq!(view.status, "X wins!");

    assert!(!click(&mut controller, 1));
    assert_eq!(controller.view().board, view.board);
}

#[test]
fn test_pvp_tie() {
    let mut controller = GameController::new(&config(Mode::PlayerVsPlayer, Mark::O));
    // Ends as X O X / X X O / O X O.
    for idx in [0, 1, 2, 5, 3, 6, 4, 8, 7] {
        click(&mut controller, idx);
    }
    let view = controller.view();
    assert_eq!(view.verdict, Verdict::Tie);
    assert_eq!(view.status, "It's a tie!");
    assert_eq!(view.highlighted, None);
}

#[test]
fn test_occupied_click_is_noop() {
    let mut controller = GameController::new(&config(Mode::PlayerVsPlayer, Mark::O));
    click(&mut controller, 4);
    let before = controller.view();
    assert!(!click(&mut controller, 4));
    assert_eq!(controller.view(), before);
}

#[test]
fn test_automated_move_waits_for_delay() {
    let mut controller = GameController::new(&config(Mode::PlayerVsAutomated, Mark::O));
    let start = Instant::now();
    click(&mut controller, 0);

    let view = controller.view();
    assert_eq!(view.phase, Phase::WaitingForAutomated);
    assert_eq!(view.status, "Computer (O) is thinking...");
    let scheduled = controller.pending().expect("move scheduled");
    assert_eq!(scheduled.mark, Mark::O);

    // Clicks are ignored while the computer is due.
    assert!(!click(&mut controller, 1));

    assert_eq!(controller.tick(start), None);
    let played = controller.tick(scheduled.due + Duration::from_millis(1));
    assert_eq!(played, Some(Position::Center));
    assert_eq!(controller.view().phase, Phase::WaitingForHuman);
    assert!(controller.pending().is_none());
}

#[test]
fn test_restart_drops_pending_move() {
    let mut controller = GameController::new(&config(Mode::PlayerVsAutomated, Mark::O));
    click(&mut controller, 0);
    assert!(controller.pending().is_some());

    controller.handle(Input::RestartRequested);
    assert!(controller.pending().is_none());
    assert_eq!(controller.view().board, Board::new());
    assert_eq!(controller.view().turn, Mark::X);
    assert_eq!(controller.tick(Instant::now() + Duration::from_secs(5)), None);
}

#[test]
fn test_mode_switch_resets_board() {
    let mut controller = GameController::new(&config(Mode::PlayerVsPlayer, Mark::O));
    click(&mut controller, 4);
    controller.handle(Input::ModeSelected(Mode::PlayerVsAutomated));
    let view = controller.view();
    assert_eq!(view.mode, Mode::PlayerVsAutomated);
    assert_eq!(view.board, Board::new());
    assert_eq!(view.phase, Phase::WaitingForHuman);
}

#[test]
fn test_automated_x_opens_after_restart() {
    let mut controller = GameController::new(&config(Mode::PlayerVsAutomated, Mark::X));
    assert_eq!(controller.pending().map(|s| s.mark), Some(Mark::X));

    controller.handle(Input::RestartRequested);
    assert_eq!(controller.pending().map(|s| s.mark), Some(Mark::X));
}

#[tokio::test(start_paused = true)]
async fn test_run_pending_sleeps_until_due() {
    let mut controller = GameController::new(&config(Mode::PlayerVsAutomated, Mark::O));
    let start = Instant::now();
    click(&mut controller, 0);

    let played = controller.run_pending().await;
    assert_eq!(played, Some(Position::Center));
    assert!(Instant::now() - start >= Duration::from_millis(500));

    // Nothing scheduled now, so this returns at once.
    assert_eq!(controller.run_pending().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_computer_blocks_open_threat() {
    let mut controller = GameController::new(&config(Mode::PlayerVsAutomated, Mark::O));
    // X takes two corners of the top row; O took the center in between.
    click(&mut controller, 0);
    controller.run_pending().await;
    click(&mut controller, 2);
    let played = controller.run_pending().await;
    assert_eq!(played, Some(Position::TopCenter));
    assert_eq!(controller.view().verdict, Verdict::Ongoing);
}

#[tokio::test(start_paused = true)]
async fn test_game_against_computer_finishes() {
    // Human plays the first open cell each turn; the game must end.
    let mut controller = GameController::new(&config(Mode::PlayerVsAutomated, Mark::O));
    for _ in 0..9 {
        if controller.view().phase == Phase::Terminal {
            break;
        }
        let open = controller
            .view()
            .board
            .empty_positions()
            .next()
            .expect("open cell");
        controller.handle(Input::CellClicked(open));
        controller.run_pending().await;
    }
    let verdict = controller.view().verdict;
    assert!(verdict.is_terminal());
    assert_ne!(verdict.winner(), Some(Mark::X));
}
