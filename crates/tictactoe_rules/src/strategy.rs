//! Greedy move selection for the automated player.
//!
//! This is a fixed priority list, not a search: take a winning cell,
//! otherwise block the opponent's winning cell, otherwise the center,
//! otherwise a random corner, otherwise a random side.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{Board, Mark, Position, Verdict, evaluate};

/// Priority level that produced a recommendation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Completes a line for the mover.
    Win,
    /// Stops the opponent completing a line.
    Block,
    /// Takes the center.
    Center,
    /// Random empty corner.
    Corner,
    /// Random empty side.
    Side,
}

/// A recommended move and the tier that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Where to play.
    pub position: Position,
    /// Why.
    pub tier: Tier,
}

/// Recommends a move for `self_mark` using the thread-local RNG for
/// tie-breaks.
///
/// Returns `None` only when the board is full.
pub fn recommend_move(board: &Board, self_mark: Mark, opponent_mark: Mark) -> Option<Position> {
    recommend_move_with(board, self_mark, opponent_mark, &mut rand::thread_rng())
}

/// Like [`recommend_move`], drawing tie-breaks from `rng`.
pub fn recommend_move_with<R: Rng + ?Sized>(
    board: &Board,
    self_mark: Mark,
    opponent_mark: Mark,
    rng: &mut R,
) -> Option<Position> {
    recommend(board, self_mark, opponent_mark, rng).map(|r| r.position)
}

/// Runs the priority search and reports which tier decided the move.
#[instrument(skip(board, rng), fields(board = %board))]
pub fn recommend<R: Rng + ?Sized>(
    board: &Board,
    self_mark: Mark,
    opponent_mark: Mark,
    rng: &mut R,
) -> Option<Recommendation> {
    let choice = completing_cell(board, self_mark)
        .map(|position| Recommendation {
            position,
            tier: Tier::Win,
        })
        .or_else(|| {
            completing_cell(board, opponent_mark).map(|position| Recommendation {
                position,
                tier: Tier::Block,
            })
        })
        .or_else(|| {
            board.is_empty(Position::Center).then_some(Recommendation {
                position: Position::Center,
                tier: Tier::Center,
            })
        })
        .or_else(|| {
            random_empty(board, &Position::CORNERS, rng).map(|position| Recommendation {
                position,
                tier: Tier::Corner,
            })
        })
        .or_else(|| {
            random_empty(board, &Position::SIDES, rng).map(|position| Recommendation {
                position,
                tier: Tier::Side,
            })
        });

    match &choice {
        Some(r) => debug!(position = r.position.to_index(), tier = %r.tier, "Recommended move"),
        None => debug!("Board full, no move to recommend"),
    }
    choice
}

/// First empty cell (ascending index) where placing `mark` wins for `mark`.
fn completing_cell(board: &Board, mark: Mark) -> Option<Position> {
    board.empty_positions().find(|pos| {
        matches!(evaluate(&board.with(*pos, mark)), Verdict::Won { mark: m, .. } if m == mark)
    })
}

fn random_empty<R: Rng + ?Sized>(board: &Board, group: &[Position], rng: &mut R) -> Option<Position> {
    let open: Vec<Position> = group.iter().copied().filter(|p| board.is_empty(*p)).collect();
    open.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn pick(board: &str, me: Mark) -> Option<Recommendation> {
        let board: Board = board.parse().unwrap();
        recommend(&board, me, me.opponent(), &mut rng())
    }

    #[test]
    fn test_takes_win_before_block() {
        // O can finish the middle row; X threatens the top row.
        let r = pick("XX_ OO_ ___", Mark::O).unwrap();
        assert_eq!(r.position, Position::MiddleRight);
        assert_eq!(r.tier, Tier::Win);
    }

    #[test]
    fn test_blocks_opponent() {
        let r = pick("XX_ _O_ ___", Mark::O).unwrap();
        assert_eq!(r.position, Position::TopRight);
        assert_eq!(r.tier, Tier::Block);
    }

    #[test]
    fn test_prefers_center() {
        let r = pick("X__ ___ ___", Mark::O).unwrap();
        assert_eq!(r, Recommendation { position: Position::Center, tier: Tier::Center });
    }

    #[test]
    fn test_corner_when_center_taken() {
        let r = pick("___ _X_ ___", Mark::O).unwrap();
        assert_eq!(r.tier, Tier::Corner);
        assert!(Position::CORNERS.contains(&r.position));
    }

    #[test]
    fn test_side_when_corners_taken() {
        // Corners and center filled, no open line for either mark.
        let r = pick("XOX _X_ OXO", Mark::O).unwrap();
        assert_eq!(r.tier, Tier::Side);
        assert!(Position::SIDES.contains(&r.position));
    }

    #[test]
    fn test_full_board_has_no_move() {
        assert_eq!(pick("XOX OXO OXO", Mark::X), None);
    }

    #[test]
    fn test_does_not_mutate_input() {
        let board: Board = "XX_ OO_ ___".parse().unwrap();
        let before = board;
        let _ = recommend_move(&board, Mark::O, Mark::X);
        assert_eq!(board, before);
    }
}
