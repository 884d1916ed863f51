//! Lifecycle invariants checked after each transition in debug builds.

use crate::typestate::GameInProgress;
use crate::{Board, Square};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// A set of invariants checked together.
pub trait InvariantSet<S> {
    /// Returns the descriptions of every violated invariant.
    fn check_all(state: &S) -> Result<(), Vec<&'static str>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<&'static str>> {
        let violations: Vec<&'static str> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
        ]
        .into_iter()
        .filter_map(|(ok, description)| (!ok).then_some(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Replaying the history onto an empty board reproduces the board, and no
/// square is written twice.
pub struct HistoryMatchesBoard;

impl Invariant<GameInProgress> for HistoryMatchesBoard {
    fn holds(game: &GameInProgress) -> bool {
        let mut reconstructed = Board::new();
        for mov in game.history() {
            if reconstructed.get(mov.position) != Square::Empty {
                return false;
            }
            reconstructed = reconstructed.placed(mov.position, mov.marker);
        }
        reconstructed == *game.board()
    }

    fn description() -> &'static str {
        "Board matches move history"
    }
}

/// Markers alternate, starting with the first mover.
pub struct AlternatingTurn;

impl Invariant<GameInProgress> for AlternatingTurn {
    fn holds(game: &GameInProgress) -> bool {
        let mut expected = game.first();
        for mov in game.history() {
            if mov.marker != expected {
                return false;
            }
            expected = expected.opponent();
        }
        game.to_move() == expected
    }

    fn description() -> &'static str {
        "Markers alternate turns"
    }
}

/// All lifecycle invariants.
pub type LifecycleInvariants = (HistoryMatchesBoard, AlternatingTurn);
