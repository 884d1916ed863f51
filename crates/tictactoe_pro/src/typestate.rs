//! Phase-specific typestate structs for one game.
//!
//! Each phase is its own type: a `GameFinished` always has an outcome, and
//! only a `GameInProgress` accepts moves. This is the live-board side of the
//! board model; the turn coordinator owns the value and is its only writer.

use crate::error::MoveError;
#[cfg(debug_assertions)]
use crate::invariants::{InvariantSet, LifecycleInvariants};
use crate::phases::Outcome;
use crate::rules::{WinningLine, is_full, winning_line};
use crate::{Board, Marker, Move, Position};
use tracing::{debug, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Game in setup phase - the board is always empty.
#[derive(Debug, Clone, Default)]
pub struct GameSetup {
    board: Board,
}

impl GameSetup {
    /// Creates a new game in setup phase.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Starts the game with the first marker to move.
    #[instrument(skip(self))]
    pub fn start(self, first: Marker) -> GameInProgress {
        GameInProgress {
            board: self.board,
            history: Vec::new(),
            first,
            to_move: first,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Game in progress - accepts moves from the marker to move.
#[derive(Debug, Clone)]
pub struct GameInProgress {
    pub(crate) board: Board,
    pub(crate) history: Vec<Move>,
    pub(crate) first: Marker,
    pub(crate) to_move: Marker,
}

impl GameInProgress {
    /// Makes a move, consuming self and transitioning to the next state.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::WrongPlayer`] if `action` is not by the marker to
    /// move and [`MoveError::Illegal`] if the cell is taken. In debug builds a
    /// broken lifecycle invariant yields [`MoveError::InvariantViolation`].
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn make_move(self, action: Move) -> Result<GameResult, MoveError> {
        if action.marker != self.to_move {
            warn!(marker = %action.marker, "Move out of turn");
            return Err(MoveError::WrongPlayer(action.marker));
        }

        let mut game = self;
        if let Err(e) = game.board.apply(action.position.to_index(), action.marker) {
            warn!(error = %e, "Illegal move rejected");
            return Err(e.into());
        }
        game.history.push(action);

        if let Some(line) = winning_line(&game.board) {
            debug!(winner = %line.owner, "Game won");
            return Ok(GameResult::Finished(game.finish(Outcome::Winner(line.owner), Some(line))));
        }

        if is_full(&game.board) {
            debug!("Game drawn");
            return Ok(GameResult::Finished(game.finish(Outcome::Draw, None)));
        }

        game.to_move = game.to_move.opponent();

        #[cfg(debug_assertions)]
        LifecycleInvariants::check_all(&game).map_err(|violations| {
            MoveError::InvariantViolation(format!(
                "Postcondition failed: {}",
                violations.join("; ")
            ))
        })?;

        Ok(GameResult::InProgress(game))
    }

    /// Places the marker to move at `position`.
    ///
    /// # Errors
    ///
    /// Same as [`GameInProgress::make_move`].
    pub fn place(self, position: Position) -> Result<GameResult, MoveError> {
        let action = Move::new(self.to_move, position);
        self.make_move(action)
    }

    /// Plays `moves` in order, stopping early if the game ends.
    ///
    /// # Errors
    ///
    /// Returns the first move error encountered.
    #[instrument(skip(self, moves), fields(count = moves.len()))]
    pub fn replay(self, moves: &[Move]) -> Result<GameResult, MoveError> {
        let mut game = self;
        for action in moves {
            match game.make_move(*action)? {
                GameResult::InProgress(g) => game = g,
                finished @ GameResult::Finished(_) => return Ok(finished),
            }
        }
        Ok(GameResult::InProgress(game))
    }

    fn finish(self, outcome: Outcome, winning_line: Option<WinningLine>) -> GameFinished {
        GameFinished {
            board: self.board,
            history: self.history,
            outcome,
            winning_line,
        }
    }

    /// Returns the marker to move.
    pub fn to_move(&self) -> Marker {
        self.to_move
    }

    /// Returns the marker that moved first.
    pub fn first(&self) -> Marker {
        self.first
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns valid positions.
    pub fn valid_moves(&self) -> Vec<Position> {
        self.board.legal_moves()
    }

    /// Abandons the game, returning a fresh setup.
    pub fn reset(self) -> GameSetup {
        GameSetup::new()
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Game finished - outcome determined.
#[derive(Debug, Clone)]
pub struct GameFinished {
    board: Board,
    history: Vec<Move>,
    outcome: Outcome,
    winning_line: Option<WinningLine>,
}

impl GameFinished {
    /// Returns the outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns the completed line for wins, `None` for draws.
    pub fn winning_line(&self) -> Option<&WinningLine> {
        self.winning_line.as_ref()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Restarts the game (consumes finished, returns setup).
    #[instrument(skip(self))]
    pub fn restart(self) -> GameSetup {
        GameSetup::new()
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// Result of making a move.
#[derive(Debug)]
pub enum GameResult {
    /// Game continues.
    InProgress(GameInProgress),
    /// Game finished.
    Finished(GameFinished),
}
