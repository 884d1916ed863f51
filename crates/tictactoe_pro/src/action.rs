//! Moves as first-class values.

use crate::{Marker, Position};
use serde::{Deserialize, Serialize};

/// A marker placed at a position.
///
/// Moves can be validated before application and replayed from history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The marker making the move.
    pub marker: Marker,
    /// Where the marker is placed.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(marker: Marker, position: Position) -> Self {
        Self { marker, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.marker, self.position.label())
    }
}
