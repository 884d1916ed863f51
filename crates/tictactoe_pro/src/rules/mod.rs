//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). They work on any board,
//! live or hypothetical, and never mutate it.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full, is_terminal};
pub use win::{WINNING_LINES, WinningLine, winner, winning_line};
