//! # Game Actions
//!
//! Actions accepted by the game reducer and the effects a transition reports.

use crate::game::{GameRules, GameState, HintDirection};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::IntErrorKind;

/// An input to [`GameState::reduce`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Begin the first round
    Start,
    /// Throw the current round away and begin a new one
    Reset,
    /// Submit raw player text as a guess
    SubmitGuess(String),
}

/// Why a submitted guess was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The text is not an integer
    NotANumber,
    /// The integer lies outside the playable range
    OutOfRange,
    /// The number was already guessed this round
    Duplicate,
    /// The round has already ended
    GameOver,
    /// No round has been started
    NotStarted,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::NotANumber => "not a number",
            RejectReason::OutOfRange => "out of range",
            RejectReason::Duplicate => "already guessed",
            RejectReason::GameOver => "game is over",
            RejectReason::NotStarted => "game not started",
        };
        write!(f, "{}", text)
    }
}

/// Everything the oracle needs to phrase a hint for a missed guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintRequest {
    /// The secret number
    pub target: u8,
    /// The guess that just missed
    pub last_guess: u8,
    /// Whether the guess was too high or too low
    pub direction: HintDirection,
    /// All guessed values this round, most recent first
    pub history: Vec<u8>,
}

/// Side effect reported by a transition for the caller to act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEffect {
    /// A fresh round began
    Started,
    /// The action was a no-op
    Ignored(RejectReason),
    /// The guess missed and the oracle should be consulted
    RequestHint(HintRequest),
    /// The guess hit the target
    Won { target: u8, attempts: usize },
    /// The guess limit ran out
    Lost { target: u8 },
}

/// Result of applying an action: the next state plus what happened.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: GameState,
    pub effect: GameEffect,
}

impl Transition {
    /// Returns the hint request carried by this transition, if any.
    pub fn hint_request(&self) -> Option<&HintRequest> {
        match &self.effect {
            GameEffect::RequestHint(request) => Some(request),
            _ => None,
        }
    }
}

/// Parses raw player text into a guess within the rules' range.
///
/// Surrounding whitespace is ignored. Anything that is not a plain base-10
/// integer is rejected; integers too large to represent count as out of range.
///
/// # Examples
///
/// ```
/// use mystic_oracle::{parse_guess, GameRules, RejectReason};
///
/// let rules = GameRules::default();
/// assert_eq!(parse_guess(" 42 ", &rules), Ok(42));
/// assert_eq!(parse_guess("0", &rules), Err(RejectReason::OutOfRange));
/// assert_eq!(parse_guess("4.2", &rules), Err(RejectReason::NotANumber));
/// ```
pub fn parse_guess(raw: &str, rules: &GameRules) -> Result<u8, RejectReason> {
    let value = match raw.trim().parse::<i64>() {
        Ok(value) => value,
        Err(e) => {
            return Err(match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => RejectReason::OutOfRange,
                _ => RejectReason::NotANumber,
            })
        }
    };

    if !rules.contains(value) {
        return Err(RejectReason::OutOfRange);
    }

    u8::try_from(value).map_err(|_| RejectReason::OutOfRange)
}
