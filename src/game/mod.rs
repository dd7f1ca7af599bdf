//! # Game Module
//!
//! Core game state management for the guessing game.
//!
//! This module contains the fundamental building blocks of a round:
//! - Guess records and their comparison outcomes
//! - Game status and the rules a round is played under
//! - The [`GameState`] reducer and the actions it accepts

pub mod actions;
pub mod state;

pub use actions::*;
pub use state::*;

use crate::config::{MAX_GUESS, MIN_GUESS};
use crate::{OracleError, OracleResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// How a guess compares to the target.
///
/// `Lower` means the guess was below the target, `Higher` means it was above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuessOutcome {
    Higher,
    Lower,
    Correct,
}

impl GuessOutcome {
    /// Compares a guess against the target.
    ///
    /// # Examples
    ///
    /// ```
    /// use mystic_oracle::GuessOutcome;
    ///
    /// assert_eq!(GuessOutcome::evaluate(30, 50), GuessOutcome::Lower);
    /// assert_eq!(GuessOutcome::evaluate(70, 50), GuessOutcome::Higher);
    /// assert_eq!(GuessOutcome::evaluate(50, 50), GuessOutcome::Correct);
    /// ```
    pub fn evaluate(guess: u8, target: u8) -> Self {
        match guess.cmp(&target) {
            std::cmp::Ordering::Less => GuessOutcome::Lower,
            std::cmp::Ordering::Greater => GuessOutcome::Higher,
            std::cmp::Ordering::Equal => GuessOutcome::Correct,
        }
    }

    /// Returns the hint direction for a miss, or None for a correct guess.
    pub fn direction(self) -> Option<HintDirection> {
        match self {
            GuessOutcome::Higher => Some(HintDirection::Higher),
            GuessOutcome::Lower => Some(HintDirection::Lower),
            GuessOutcome::Correct => None,
        }
    }
}

impl fmt::Display for GuessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuessOutcome::Higher => write!(f, "higher"),
            GuessOutcome::Lower => write!(f, "lower"),
            GuessOutcome::Correct => write!(f, "correct"),
        }
    }
}

/// Direction of a missed guess. A correct guess never asks for a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintDirection {
    Higher,
    Lower,
}

impl HintDirection {
    /// Phrase used when describing the miss to the oracle.
    pub fn describe(self) -> &'static str {
        match self {
            HintDirection::Higher => "too high",
            HintDirection::Lower => "too low",
        }
    }
}

impl From<HintDirection> for GuessOutcome {
    fn from(direction: HintDirection) -> Self {
        match direction {
            HintDirection::Higher => GuessOutcome::Higher,
            HintDirection::Lower => GuessOutcome::Lower,
        }
    }
}

/// A single guess. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuessRecord {
    value: u8,
    result: GuessOutcome,
    sequence: u64,
}

impl GuessRecord {
    pub(crate) fn new(value: u8, result: GuessOutcome, sequence: u64) -> Self {
        Self {
            value,
            result,
            sequence,
        }
    }

    /// The guessed number.
    pub fn value(&self) -> u8 {
        self.value
    }

    /// How the guess compared to the target.
    pub fn result(&self) -> GuessOutcome {
        self.result
    }

    /// Creation order within the round; strictly increasing.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Lifecycle of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// No round has been started yet
    Idle,
    /// Accepting guesses
    Playing,
    /// The target was found
    Won,
    /// The guess limit ran out
    Lost,
}

impl GameStatus {
    /// Whether the round has ended.
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// Parameters a round is played under.
///
/// Fields are private so every value goes through the same checks, including
/// values read back with serde.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameRules")]
pub struct GameRules {
    min: u8,
    max: u8,
    max_guesses: Option<usize>,
}

/// Unchecked wire form of [`GameRules`].
#[derive(Deserialize)]
struct RawGameRules {
    min: u8,
    max: u8,
    #[serde(default)]
    max_guesses: Option<usize>,
}

impl TryFrom<RawGameRules> for GameRules {
    type Error = OracleError;

    fn try_from(raw: RawGameRules) -> OracleResult<Self> {
        let rules = GameRules::new(raw.min, raw.max)?;
        match raw.max_guesses {
            Some(limit) => rules.with_max_guesses(limit),
            None => Ok(rules),
        }
    }
}

impl GameRules {
    /// Creates rules for a custom range.
    pub fn new(min: u8, max: u8) -> OracleResult<Self> {
        if min > max {
            return Err(OracleError::InvalidConfig(format!(
                "range start {} is greater than range end {}",
                min, max
            )));
        }
        Ok(Self {
            min,
            max,
            max_guesses: None,
        })
    }

    /// Limits the number of guesses per round.
    pub fn with_max_guesses(mut self, max_guesses: usize) -> OracleResult<Self> {
        if max_guesses == 0 {
            return Err(OracleError::InvalidConfig(
                "max guesses must be at least 1".to_string(),
            ));
        }
        self.max_guesses = Some(max_guesses);
        Ok(self)
    }

    /// Smallest valid guess and target.
    pub fn min(&self) -> u8 {
        self.min
    }

    /// Largest valid guess and target.
    pub fn max(&self) -> u8 {
        self.max
    }

    /// Number of guesses before the round is lost; None means unlimited.
    pub fn max_guesses(&self) -> Option<usize> {
        self.max_guesses
    }

    /// Whether a number lies inside the playable range.
    pub fn contains(&self, value: i64) -> bool {
        value >= i64::from(self.min) && value <= i64::from(self.max)
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            min: MIN_GUESS,
            max: MAX_GUESS,
            max_guesses: None,
        }
    }
}

/// Unique identifier for a round.
pub type GameId = Uuid;

/// Creates a new unique game ID.
pub fn new_game_id() -> GameId {
    Uuid::new_v4()
}
