//! Core domain types for the board model.

use crate::error::{BoardParseError, IllegalMoveError};
use crate::position::Position;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Marker placed on the board by one side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Marker {
    /// Marker X (moves first by default).
    X,
    /// Marker O.
    O,
}

impl Marker {
    /// Returns the other marker.
    pub fn opponent(self) -> Self {
        match self {
            Marker::X => Marker::O,
            Marker::O => Marker::X,
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a marker.
    Occupied(Marker),
}

impl Square {
    /// Returns the occupying marker, if any.
    pub fn marker(self) -> Option<Marker> {
        match self {
            Square::Empty => None,
            Square::Occupied(marker) => Some(marker),
        }
    }
}

/// 3x3 board.
///
/// The board is `Copy`: the search derives hypothetical boards by value and
/// never touches the caller's instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Gets the square at a raw index, `None` when out of range.
    pub fn square(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Checks if the square at the position is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// True iff `index` is on the board and that cell is empty.
    #[instrument(level = "trace", skip(self))]
    pub fn is_legal(&self, index: usize) -> bool {
        matches!(self.square(index), Some(Square::Empty))
    }

    /// Places `marker` at `index` on this board.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMoveError`] if the index is out of range or the cell
    /// is occupied. The board is left untouched in that case.
    #[instrument(skip(self))]
    pub fn apply(&mut self, index: usize, marker: Marker) -> Result<(), IllegalMoveError> {
        let pos = Position::from_index(index).ok_or(IllegalMoveError::OutOfBounds { index })?;
        if !self.is_empty(pos) {
            return Err(IllegalMoveError::Occupied(pos));
        }
        self.squares[index] = Square::Occupied(marker);
        Ok(())
    }

    /// Returns a copy of this board with `marker` placed at `index`.
    ///
    /// # Errors
    ///
    /// Same as [`Board::apply`].
    #[instrument(skip(self))]
    pub fn with_move(&self, index: usize, marker: Marker) -> Result<Self, IllegalMoveError> {
        let mut next = *self;
        next.apply(index, marker)?;
        Ok(next)
    }

    /// Copy with `marker` at `pos`, for positions already known to be empty.
    pub(crate) fn placed(mut self, pos: Position, marker: Marker) -> Self {
        self.squares[pos.to_index()] = Square::Occupied(marker);
        self
    }

    /// Empty positions in ascending index order.
    pub fn legal_moves(&self) -> Vec<Position> {
        Position::valid_moves(self)
    }

    /// Number of occupied squares, i.e. plies played so far.
    pub fn plies(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Number of squares holding `marker`.
    pub fn count(&self, marker: Marker) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(marker))
            .count()
    }

    /// Returns the winning marker, if any.
    pub fn winner(&self) -> Option<Marker> {
        crate::rules::winner(self)
    }

    /// Clears every square.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.squares = [Square::Empty; 9];
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-based cell number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(marker) => marker.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl std::str::FromStr for Board {
    type Err = BoardParseError;

    /// Parses nine cells (`X`, `O`, `_` or `.`), ignoring whitespace and `|`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<Square> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .map(|c| match c {
                'X' | 'x' => Ok(Square::Occupied(Marker::X)),
                'O' | 'o' => Ok(Square::Occupied(Marker::O)),
                '_' | '.' => Ok(Square::Empty),
                _ => Err(BoardParseError::InvalidCell(c)),
            })
            .collect::<Result<_, _>>()?;
        let squares: [Square; 9] = cells
            .try_into()
            .map_err(|v: Vec<Square>| BoardParseError::WrongLength(v.len()))?;
        Ok(Self { squares })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_occupies_cell() {
        let mut board = Board::new();
        board.apply(4, Marker::X).unwrap();
        assert_eq!(board.get(Position::Center), Square::Occupied(Marker::X));
        assert!(!board.is_legal(4));
        assert_eq!(board.plies(), 1);
    }

    #[test]
    fn test_apply_rejects_occupied() {
        let mut board = Board::new();
        board.apply(0, Marker::X).unwrap();
        let err = board.apply(0, Marker::O).unwrap_err();
        assert_eq!(err, IllegalMoveError::Occupied(Position::TopLeft));
        assert_eq!(board.get(Position::TopLeft), Square::Occupied(Marker::X));
    }

    #[test]
    fn test_apply_rejects_out_of_range() {
        let mut board = Board::new();
        assert_eq!(
            board.apply(9, Marker::X),
            Err(IllegalMoveError::OutOfBounds { index: 9 })
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_with_move_leaves_original() {
        let board = Board::new();
        let next = board.with_move(8, Marker::O).unwrap();
        assert!(board.is_legal(8));
        assert!(!next.is_legal(8));
    }

    #[test]
    fn test_legal_moves_ascending() {
        let board: Board = "X_O _X_ ___".parse().unwrap();
        let moves: Vec<usize> = board.legal_moves().iter().map(|p| p.to_index()).collect();
        assert_eq!(moves, vec![1, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn test_parse_rejects_short_input() {
        assert!("XO_".parse::<Board>().is_err());
        assert!("XO_XO_XOZ".parse::<Board>().is_err());
    }

    #[test]
    fn test_display() {
        let board: Board = "X__ _O_ ___".parse().unwrap();
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_winner_delegates_to_rules() {
        let board: Board = "OOO XX_ X__".parse().unwrap();
        assert_eq!(board.winner(), Some(Marker::O));
        assert_eq!(board.count(Marker::X), 3);
    }

    #[test]
    fn test_reset() {
        let mut board: Board = "XOX OXO ___".parse().unwrap();
        board.reset();
        assert_eq!(board.plies(), 0);
    }
}
