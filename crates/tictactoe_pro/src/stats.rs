//! Session scores and cumulative player statistics.
//!
//! Plain values: the caller decides where and whether to persist them.

use crate::Marker;
use crate::phases::Outcome;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Per-session tallies, one column per marker plus draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct Scoreboard {
    x: u32,
    o: u32,
    draws: u32,
}

impl Scoreboard {
    /// Creates an empty scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a finished game to the tallies.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Winner(Marker::X) => self.x += 1,
            Outcome::Winner(Marker::O) => self.o += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    /// Returns the wins for `marker`.
    pub fn wins(&self, marker: Marker) -> u32 {
        match marker {
            Marker::X => self.x,
            Marker::O => self.o,
        }
    }

    /// Zeroes every tally.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A finished game from the human's side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerResult {
    /// The human won.
    Win,
    /// The engine won.
    Loss,
    /// Nobody won.
    Draw,
}

impl PlayerResult {
    /// Maps an outcome to the result for the player holding `human`.
    pub fn from_outcome(outcome: &Outcome, human: Marker) -> Self {
        match outcome.winner() {
            Some(winner) if winner == human => Self::Win,
            Some(_) => Self::Loss,
            None => Self::Draw,
        }
    }
}

/// Cumulative statistics across games against the engine.
///
/// Fields missing from serialized input default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerStats {
    games_played: u32,
    wins: u32,
    losses: u32,
    draws: u32,
    current_streak: u32,
    best_streak: u32,
}

impl PlayerStats {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one game.
    ///
    /// Wins extend the current streak, losses end it, draws leave it alone.
    #[instrument(skip(self))]
    pub fn record(&mut self, result: PlayerResult) {
        self.games_played += 1;
        match result {
            PlayerResult::Win => {
                self.wins += 1;
                self.current_streak += 1;
                self.best_streak = self.best_streak.max(self.current_streak);
            }
            PlayerResult::Loss => {
                self.losses += 1;
                self.current_streak = 0;
            }
            PlayerResult::Draw => self.draws += 1,
        }
        debug!(
            games = self.games_played,
            streak = self.current_streak,
            "Stats updated"
        );
    }

    /// Win rate as a whole percentage, rounded half up; 0 with no games.
    pub fn win_rate(&self) -> u32 {
        if self.games_played == 0 {
            0
        } else {
            (f64::from(self.wins) * 100.0 / f64::from(self.games_played)).round() as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoreboard_tallies() {
        let mut board = Scoreboard::new();
        board.record(&Outcome::Winner(Marker::X));
        board.record(&Outcome::Winner(Marker::X));
        board.record(&Outcome::Winner(Marker::O));
        board.record(&Outcome::Draw);
        assert_eq!(board.wins(Marker::X), 2);
        assert_eq!(*board.o(), 1);
        assert_eq!(*board.draws(), 1);

        board.reset();
        assert_eq!(board, Scoreboard::default());
    }

    #[test]
    fn test_result_from_outcome() {
        let won = Outcome::Winner(Marker::X);
        assert_eq!(PlayerResult::from_outcome(&won, Marker::X), PlayerResult::Win);
        assert_eq!(PlayerResult::from_outcome(&won, Marker::O), PlayerResult::Loss);
        assert_eq!(
            PlayerResult::from_outcome(&Outcome::Draw, Marker::O),
            PlayerResult::Draw
        );
    }

    #[test]
    fn test_streaks() {
        let mut stats = PlayerStats::new();
        for result in [
            PlayerResult::Win,
            PlayerResult::Win,
            PlayerResult::Draw,
            PlayerResult::Win,
            PlayerResult::Loss,
            PlayerResult::Win,
        ] {
            stats.record(result);
        }
        assert_eq!(*stats.games_played(), 6);
        assert_eq!(*stats.wins(), 4);
        assert_eq!(*stats.losses(), 1);
        assert_eq!(*stats.draws(), 1);
        assert_eq!(*stats.best_streak(), 3);
        assert_eq!(*stats.current_streak(), 1);
    }

    #[test]
    fn test_win_rate_rounds() {
        let mut stats = PlayerStats::new();
        assert_eq!(stats.win_rate(), 0);
        stats.record(PlayerResult::Win);
        stats.record(PlayerResult::Loss);
        stats.record(PlayerResult::Loss);
        assert_eq!(stats.win_rate(), 33);
        stats.record(PlayerResult::Win);
        stats.record(PlayerResult::Win);
        assert_eq!(stats.win_rate(), 60);
    }

    #[test]
    fn test_stats_missing_fields_default() {
        let stats: PlayerStats = serde_json::from_str(r#"{"wins": 2, "gamesPlayed": 3}"#).unwrap();
        assert_eq!(*stats.wins(), 2);
        assert_eq!(*stats.games_played(), 3);
        assert_eq!(*stats.best_streak(), 0);

        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"currentStreak\":0"));
    }
}
