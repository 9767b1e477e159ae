//! Exhaustive checks over every board reachable by legal play.

use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tictactoe_rules::{Board, Cell, Mark, Position, Tier, Verdict, WinLine, evaluate, recommend};

/// Collects every board reachable from the empty board with X moving first
/// and play stopping at a terminal verdict.
fn reachable_boards() -> Vec<Board> {
    let mut seen = HashSet::new();
    let mut stack = vec![(Board::new(), Mark::X)];
    while let Some((board, to_move)) = stack.pop() {
        if !seen.insert(board) {
            continue;
        }
        if evaluate(&board).is_terminal() {
            continue;
        }
        for pos in board.empty_positions() {
            stack.push((board.with(pos, to_move), to_move.opponent()));
        }
    }
    seen.into_iter().collect()
}

fn mover(board: &Board) -> Mark {
    if board.count(Mark::X) == board.count(Mark::O) {
        Mark::X
    } else {
        Mark::O
    }
}

fn lines_owned_by(board: &Board) -> Vec<(Mark, WinLine)> {
    WinLine::ALL
        .iter()
        .filter_map(|line| {
            let [a, b, c] = line.positions();
            match (board.get(a), board.get(b), board.get(c)) {
                (Cell::Marked(x), Cell::Marked(y), Cell::Marked(z)) if x == y && y == z => {
                    Some((x, *line))
                }
                _ => None,
            }
        })
        .collect()
}

#[test]
fn test_reachable_board_count() {
    // Well-known count of positions reachable in legal play.
    assert_eq!(reachable_boards().len(), 5478);
}

#[test]
fn test_evaluate_agrees_with_brute_force() {
    for board in reachable_boards() {
        assert!(board.is_alternating(), "{board}");
        let owned = lines_owned_by(&board);
        let expected = match owned.first() {
            Some((mark, line)) => Verdict::Won { mark: *mark, line: *line },
            None if board.is_full() => Verdict::Tie,
            None => Verdict::Ongoing,
        };
        assert_eq!(evaluate(&board), expected, "{board}");
    }
}

#[test]
fn test_recommendation_is_legal_and_respects_priorities() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for board in reachable_boards() {
        if evaluate(&board).is_terminal() {
            continue;
        }
        let me = mover(&board);
        let before = board;
        let rec = recommend(&board, me, me.opponent(), &mut rng)
            .unwrap_or_else(|| panic!("no move on open board {board}"));

        assert_eq!(board, before);
        assert!(board.is_empty(rec.position), "{board} -> {:?}", rec);

        let can_win = board
            .empty_positions()
            .any(|p| evaluate(&board.with(p, me)).winner() == Some(me));
        let must_block = board
            .empty_positions()
            .any(|p| evaluate(&board.with(p, me.opponent())).winner() == Some(me.opponent()));

        let after = evaluate(&board.with(rec.position, me));
        if can_win {
            assert_eq!(rec.tier, Tier::Win, "{board}");
            assert_eq!(after.winner(), Some(me), "{board}");
        } else if must_block {
            assert_eq!(rec.tier, Tier::Block, "{board}");
            let threat = board.with(rec.position, me.opponent());
            assert_eq!(evaluate(&threat).winner(), Some(me.opponent()), "{board}");
        } else if board.is_empty(Position::Center) {
            assert_eq!(rec.tier, Tier::Center, "{board}");
        } else if Position::CORNERS.iter().any(|p| board.is_empty(*p)) {
            assert_eq!(rec.tier, Tier::Corner, "{board}");
        } else {
            assert_eq!(rec.tier, Tier::Side, "{board}");
        }
    }
}

#[test]
fn test_full_boards_have_no_recommendation() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for board in reachable_boards().into_iter().filter(Board::is_full) {
        assert_eq!(recommend(&board, Mark::X, Mark::O, &mut rng), None);
    }
}

#[test]
fn test_win_before_block_and_tie_examples() {
    let board: Board = "XX_ OO_ ___".parse().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let rec = recommend(&board, Mark::O, Mark::X, &mut rng).unwrap();
    assert_eq!(rec.position.to_index(), 5);

    let tie: Board = "XOX OXO OXO".parse().unwrap();
    assert_eq!(evaluate(&tie), Verdict::Tie);
}

#[test]
fn test_seeded_tie_breaks_are_reproducible() {
    let board: Board = "___ _X_ ___".parse().unwrap();
    let a: Vec<_> = (0..20)
        .map(|seed| recommend(&board, Mark::O, Mark::X, &mut ChaCha8Rng::seed_from_u64(seed)))
        .collect();
    let b: Vec<_> = (0..20)
        .map(|seed| recommend(&board, Mark::O, Mark::X, &mut ChaCha8Rng::seed_from_u64(seed)))
        .collect();
    assert_eq!(a, b);
}

#[test]
fn test_every_open_corner_gets_chosen() {
    let board: Board = "___ _X_ ___".parse().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let chosen: HashSet<Position> = (0..200)
        .filter_map(|_| recommend(&board, Mark::O, Mark::X, &mut rng))
        .map(|r| r.position)
        .collect();
    assert_eq!(chosen, Position::CORNERS.into_iter().collect());
}
