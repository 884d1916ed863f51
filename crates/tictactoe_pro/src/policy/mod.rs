//! Move policy engine.
//!
//! Stateless between calls: every query receives the board by reference,
//! searches private copies, and returns a cell. Randomness is injected by the
//! caller so games can be replayed from a seed.

pub mod minimax;

use crate::error::{ConfigError, PreconditionViolation};
use crate::rules::is_terminal;
use crate::{Board, Marker, Position};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Probability that the blended tier plays the optimal move.
pub const DEFAULT_BLEND_PROBABILITY: f64 = 0.7;

/// Difficulty tier selecting the engine's behavior.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DifficultyTier {
    /// Uniformly random legal move.
    Random,
    /// Optimal with the blend probability, random otherwise.
    #[default]
    Blended,
    /// Exhaustive minimax.
    Optimal,
}

impl DifficultyTier {
    /// Returns the player-facing difficulty name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Random => "Easy",
            Self::Blended => "Medium",
            Self::Optimal => "Hard",
        }
    }

    /// Suggested presentation delay before showing the engine's move.
    ///
    /// Advisory only; move selection never waits.
    pub fn thinking_time(self) -> Duration {
        match self {
            Self::Random => Duration::from_millis(500),
            Self::Blended => Duration::from_millis(800),
            Self::Optimal => Duration::from_millis(1200),
        }
    }
}

/// Who sits across the board from the human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Two humans share the board.
    PlayerVsPlayer,
    /// A human against the engine at the given tier.
    VsEngine(DifficultyTier),
}

impl GameMode {
    /// Returns the engine tier, if the engine plays.
    pub fn tier(self) -> Option<DifficultyTier> {
        match self {
            Self::PlayerVsPlayer => None,
            Self::VsEngine(tier) => Some(tier),
        }
    }

    /// Hints are offered only against the engine.
    pub fn offers_hints(self) -> bool {
        self.tier().is_some()
    }

    /// Returns the display label for this mode.
    pub fn label(self) -> String {
        match self {
            Self::PlayerVsPlayer => "Player vs Player".to_string(),
            Self::VsEngine(tier) => format!("vs AI ({})", tier.label()),
        }
    }
}

/// Chooses moves for the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovePolicy {
    blend_probability: f64,
}

impl Default for MovePolicy {
    fn default() -> Self {
        Self {
            blend_probability: DEFAULT_BLEND_PROBABILITY,
        }
    }
}

impl MovePolicy {
    /// Creates a policy with the default blend probability.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a policy whose blended tier plays optimally with probability `p`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BlendProbability`] unless `0 <= p <= 1`.
    #[instrument]
    pub fn with_blend_probability(p: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::BlendProbability(p));
        }
        Ok(Self {
            blend_probability: p,
        })
    }

    /// Returns the blended tier's probability of playing optimally.
    pub fn blend_probability(&self) -> f64 {
        self.blend_probability
    }

    /// Selects a move for `engine` under `tier`.
    ///
    /// The result is always a currently legal cell.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionViolation`] if the board is terminal or both
    /// sides share a marker.
    #[instrument(skip(self, board, rng), fields(plies = board.plies()))]
    pub fn select_move<R>(
        &self,
        board: &Board,
        engine: Marker,
        opponent: Marker,
        tier: DifficultyTier,
        rng: &mut R,
    ) -> Result<Position, PreconditionViolation>
    where
        R: Rng + ?Sized,
    {
        check_preconditions(board, engine, opponent)?;

        let chosen = match tier {
            DifficultyTier::Random => random_move(board, rng)?,
            DifficultyTier::Blended => {
                if rng.gen_bool(self.blend_probability) {
                    optimal_move(board, engine, opponent)?
                } else {
                    random_move(board, rng)?
                }
            }
            DifficultyTier::Optimal => optimal_move(board, engine, opponent)?,
        };

        debug!(%tier, %engine, position = chosen.to_index(), "Engine chose move");
        Ok(chosen)
    }

    /// Suggests the optimal move for `asking` without touching the board.
    ///
    /// # Errors
    ///
    /// Same as [`MovePolicy::select_move`].
    #[instrument(skip(self, board), fields(plies = board.plies()))]
    pub fn hint(
        &self,
        board: &Board,
        asking: Marker,
        other: Marker,
    ) -> Result<Position, PreconditionViolation> {
        check_preconditions(board, asking, other)?;
        let hint = optimal_move(board, asking, other)?;
        debug!(%asking, position = hint.to_index(), "Hint computed");
        Ok(hint)
    }
}

fn check_preconditions(
    board: &Board,
    engine: Marker,
    opponent: Marker,
) -> Result<(), PreconditionViolation> {
    if engine == opponent {
        return Err(PreconditionViolation::SameMarker(engine));
    }
    if is_terminal(board) {
        return Err(PreconditionViolation::NoLegalMoves);
    }
    Ok(())
}

fn random_move<R>(board: &Board, rng: &mut R) -> Result<Position, PreconditionViolation>
where
    R: Rng + ?Sized,
{
    board
        .legal_moves()
        .choose(rng)
        .copied()
        .ok_or(PreconditionViolation::NoLegalMoves)
}

fn optimal_move(
    board: &Board,
    engine: Marker,
    opponent: Marker,
) -> Result<Position, PreconditionViolation> {
    let result = minimax::search(board, engine, opponent);
    debug!(score = result.score, "Search complete");
    result.best_move.ok_or(PreconditionViolation::NoLegalMoves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_tier_names_round_trip() {
        for tier in <DifficultyTier as strum::IntoEnumIterator>::iter() {
            assert_eq!(tier.to_string().parse::<DifficultyTier>().unwrap(), tier);
        }
        assert_eq!("optimal".parse::<DifficultyTier>().unwrap(), DifficultyTier::Optimal);
    }

    #[test]
    fn test_thinking_time_grows_with_difficulty() {
        assert!(DifficultyTier::Random.thinking_time() < DifficultyTier::Blended.thinking_time());
        assert!(DifficultyTier::Blended.thinking_time() < DifficultyTier::Optimal.thinking_time());
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(GameMode::PlayerVsPlayer.label(), "Player vs Player");
        assert_eq!(
            GameMode::VsEngine(DifficultyTier::Optimal).label(),
            "vs AI (Hard)"
        );
        assert!(!GameMode::PlayerVsPlayer.offers_hints());
        let labels: Vec<&str> = <DifficultyTier as strum::IntoEnumIterator>::iter()
            .map(DifficultyTier::label)
            .collect();
        assert_eq!(labels, vec!["Easy", "Medium", "Hard"]);
        assert_eq!(DifficultyTier::Optimal.to_string(), "optimal");
    }

    #[test]
    fn test_blend_probability_validated() {
        assert!(MovePolicy::with_blend_probability(1.5).is_err());
        assert!(MovePolicy::with_blend_probability(-0.1).is_err());
        assert!(MovePolicy::with_blend_probability(f64::NAN).is_err());
        assert_eq!(MovePolicy::new().blend_probability(), DEFAULT_BLEND_PROBABILITY);
    }

    #[test]
    fn test_same_marker_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = MovePolicy::new().select_move(
            &Board::new(),
            Marker::O,
            Marker::O,
            DifficultyTier::Random,
            &mut rng,
        );
        assert_eq!(result, Err(PreconditionViolation::SameMarker(Marker::O)));
    }

    #[test]
    fn test_blended_at_one_is_optimal() {
        let policy = MovePolicy::with_blend_probability(1.0).unwrap();
        let board: Board = "XX_ O__ ___".parse().unwrap();
        for seed in 0..10 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let pos = policy
                .select_move(&board, Marker::O, Marker::X, DifficultyTier::Blended, &mut rng)
                .unwrap();
            assert_eq!(pos, Position::TopRight);
        }
    }

    #[test]
    fn test_blended_default_mix() {
        // O must block at 2; the random branch also lands there 1 time in 6.
        let policy = MovePolicy::new();
        let board: Board = "XX_ O__ ___".parse().unwrap();
        let trials = 4000;
        let hits = (0..trials)
            .filter(|&seed| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                policy
                    .select_move(&board, Marker::O, Marker::X, DifficultyTier::Blended, &mut rng)
                    .unwrap()
                    == Position::TopRight
            })
            .count();
        let rate = hits as f64 / trials as f64;
        let expected = DEFAULT_BLEND_PROBABILITY + (1.0 - DEFAULT_BLEND_PROBABILITY) / 6.0;
        assert!((rate - expected).abs() < 0.03, "rate {} expected {}", rate, expected);
    }

    #[test]
    fn test_blended_at_zero_plays_randomly() {
        let policy = MovePolicy::with_blend_probability(0.0).unwrap();
        let board: Board = "X__ _O_ ___".parse().unwrap();
        let mut seen = std::collections::HashSet::new();
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let pos = policy
                .select_move(&board, Marker::X, Marker::O, DifficultyTier::Blended, &mut rng)
                .unwrap();
            assert!(board.is_legal(pos.to_index()));
            seen.insert(pos);
        }
        assert!(seen.len() > 1);
    }
}
