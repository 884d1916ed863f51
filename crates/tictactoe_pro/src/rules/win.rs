//! Win detection logic for tic-tac-toe.

use crate::{Board, Marker, Position, Square};
use serde::{Deserialize, Serialize};

/// The 8 lines that win the game: rows, then columns, then diagonals.
pub const WINNING_LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A completed line and the marker that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine {
    /// The marker occupying all three cells.
    pub owner: Marker,
    /// The three cells, in table order.
    pub cells: [Position; 3],
}

/// Returns the first line fully owned by one marker.
pub fn winning_line(board: &Board) -> Option<WinningLine> {
    WINNING_LINES.iter().find_map(|&cells| {
        let [a, b, c] = cells.map(|pos| board.get(pos));
        match a {
            Square::Occupied(owner) if a == b && b == c => Some(WinningLine { owner, cells }),
            _ => None,
        }
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(marker)` if the marker has three in a row,
/// `None` otherwise.
pub fn winner(board: &Board) -> Option<Marker> {
    winning_line(board).map(|line| line.owner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board: Board = "XXX OO_ ___".parse().unwrap();
        assert_eq!(winner(&board), Some(Marker::X));
        assert_eq!(
            winning_line(&board).map(|l| l.cells),
            Some([Position::TopLeft, Position::TopCenter, Position::TopRight])
        );
    }

    #[test]
    fn test_winner_column() {
        let board: Board = "XO_ XO_ _O_".parse().unwrap();
        assert_eq!(winner(&board), Some(Marker::O));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board: Board = "XXO _O_ O_X".parse().unwrap();
        let line = winning_line(&board).unwrap();
        assert_eq!(line.owner, Marker::O);
        assert_eq!(
            line.cells,
            [Position::TopRight, Position::Center, Position::BottomLeft]
        );
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board: Board = "XX_ O__ O__".parse().unwrap();
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_table_covers_every_cell() {
        for pos in Position::ALL {
            assert!(WINNING_LINES.iter().any(|line| line.contains(&pos)));
        }
    }
}
