//! Error types for the board model, the move policy engine and configuration.

use crate::position::Position;
use crate::types::Marker;
use derive_more::{Display, Error};

/// A move that the board cannot accept.
///
/// Always recoverable: the caller rejects the input and asks again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum IllegalMoveError {
    /// Index outside 0-8.
    #[display("Position {} is out of bounds (must be 0-8)", index)]
    OutOfBounds {
        /// The rejected index.
        index: usize,
    },

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    Occupied(#[error(not(source))] Position),
}

/// The move policy engine was asked for a move it cannot produce.
///
/// This is a bug in the caller, which must check for a terminal board first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PreconditionViolation {
    /// The board is terminal or has no empty squares.
    #[display("No legal moves: the board is terminal")]
    NoLegalMoves,

    /// Both sides were given the same marker.
    #[display("Engine and opponent share marker {}", _0)]
    SameMarker(#[error(not(source))] Marker),
}

/// Error from a turn applied through the game lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The board rejected the cell.
    #[display("{}", _0)]
    Illegal(IllegalMoveError),

    /// It's not this marker's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(#[error(not(source))] Marker),

    /// A lifecycle invariant failed after the move (debug builds only).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}

impl From<IllegalMoveError> for MoveError {
    fn from(err: IllegalMoveError) -> Self {
        Self::Illegal(err)
    }
}

/// A board string that does not describe nine cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// A character other than `X`, `O`, `_` or `.`.
    #[display("Invalid cell character {:?}", _0)]
    InvalidCell(#[error(not(source))] char),

    /// Wrong number of cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(#[error(not(source))] usize),
}

/// Configuration that could not be loaded.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum ConfigError {
    /// The TOML text did not parse.
    #[display("Failed to parse config: {}", _0)]
    Parse(#[error(not(source))] String),

    /// Blend probability outside `[0, 1]`.
    #[display("Blend probability {} is outside [0, 1]", _0)]
    BlendProbability(#[error(not(source))] f64),
}
