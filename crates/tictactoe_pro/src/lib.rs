//! Tic-tac-toe board model and move policy engine.
//!
//! # Architecture
//!
//! - **Board model**: [`Board`], [`rules`] and the typestate lifecycle
//!   ([`GameSetup`] → [`GameInProgress`] → [`GameFinished`]).
//! - **Move policy engine**: [`MovePolicy`] picks a cell under a
//!   [`DifficultyTier`] and computes hints.
//! - **Plain values for the caller**: [`Scoreboard`], [`PlayerStats`] and
//!   [`EngineConfig`].
//!
//! The crate performs no I/O. Rendering, persistence and presentation delays
//! belong to the caller.
//!
//! # Example
//!
//! ```
//! use tictactoe_pro::{Board, DifficultyTier, Marker, MovePolicy};
//! use rand::SeedableRng;
//!
//! let mut board = Board::new();
//! board.apply(4, Marker::X)?;
//!
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
//! let reply = MovePolicy::new().select_move(
//!     &board,
//!     Marker::O,
//!     Marker::X,
//!     DifficultyTier::Optimal,
//!     &mut rng,
//! )?;
//! assert!(reply.is_corner());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod config;
mod error;
mod invariants;
mod phases;
mod position;
mod stats;
mod typestate;
mod types;

pub mod policy;
pub mod rules;

pub use action::Move;
pub use config::EngineConfig;
pub use error::{BoardParseError, ConfigError, IllegalMoveError, MoveError, PreconditionViolation};
pub use invariants::{AlternatingTurn, HistoryMatchesBoard, Invariant, InvariantSet, LifecycleInvariants};
pub use phases::Outcome;
pub use policy::{DifficultyTier, GameMode, MovePolicy};
pub use position::Position;
pub use rules::{WinningLine, is_draw, is_terminal, winner};
pub use stats::{PlayerResult, PlayerStats, Scoreboard};
pub use typestate::{GameFinished, GameInProgress, GameResult, GameSetup};
pub use types::{Board, Marker, Square};
