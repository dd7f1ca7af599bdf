//! # Game State Module
//!
//! The state of a single guessing round and the pure transition that advances it.
//!
//! [`GameState`] is never mutated in place by callers. Every change goes through
//! [`GameState::reduce`], which consumes the old state and returns a
//! [`Transition`] holding the new state and the effect the caller should act on
//! (asking the oracle for a hint, announcing a win, and so on).

use crate::game::{
    new_game_id, parse_guess, GameAction, GameEffect, GameId, GameRules, GameStatus, GuessOutcome,
    GuessRecord, HintRequest, RejectReason, Transition,
};
use crate::{OracleError, OracleResult};
use log::{debug, info};
use rand::Rng;
use std::fmt;

/// State of one round of the guessing game.
///
/// The target stays private until the round is over; see
/// [`GameState::revealed_target`].
#[derive(Clone, PartialEq, Eq)]
pub struct GameState {
    id: GameId,
    rules: GameRules,
    target: Option<u8>,
    /// Guesses this round, most recent first
    guesses: Vec<GuessRecord>,
    is_game_over: bool,
    status: GameStatus,
    next_sequence: u64,
}

impl GameState {
    /// Creates an idle state that accepts no guesses until started.
    ///
    /// # Examples
    ///
    /// ```
    /// use mystic_oracle::{GameRules, GameState, GameStatus};
    ///
    /// let state = GameState::new(GameRules::default());
    /// assert_eq!(state.status(), GameStatus::Idle);
    /// assert!(state.guesses().is_empty());
    /// ```
    pub fn new(rules: GameRules) -> Self {
        Self {
            id: new_game_id(),
            rules,
            target: None,
            guesses: Vec::new(),
            is_game_over: false,
            status: GameStatus::Idle,
            next_sequence: 0,
        }
    }

    /// Starts a round with a target drawn uniformly from the rules' range.
    ///
    /// # Examples
    ///
    /// ```
    /// use mystic_oracle::{GameRules, GameState, GameStatus};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let state = GameState::start(GameRules::default(), &mut rng);
    /// assert_eq!(state.status(), GameStatus::Playing);
    /// assert_eq!(state.revealed_target(), None);
    /// ```
    pub fn start<R: Rng + ?Sized>(rules: GameRules, rng: &mut R) -> Self {
        let target = rng.gen_range(rules.min()..=rules.max());
        Self::playing(rules, target)
    }

    /// Starts a round with a fixed target, for seeded replays and tests.
    pub fn with_target(rules: GameRules, target: u8) -> OracleResult<Self> {
        if !rules.contains(i64::from(target)) {
            return Err(OracleError::InvalidState(format!(
                "target {} outside range {}..={}",
                target,
                rules.min(),
                rules.max()
            )));
        }
        Ok(Self::playing(rules, target))
    }

    fn playing(rules: GameRules, target: u8) -> Self {
        let state = Self {
            id: new_game_id(),
            rules,
            target: Some(target),
            guesses: Vec::new(),
            is_game_over: false,
            status: GameStatus::Playing,
            next_sequence: 0,
        };
        info!("Started game {}", state.id);
        state
    }

    /// Applies an action and returns the next state with its effect.
    ///
    /// `Start` and `Reset` both discard the current round and draw a new target
    /// from `rng`. `SubmitGuess` never touches `rng`.
    pub fn reduce<R: Rng + ?Sized>(self, action: GameAction, rng: &mut R) -> Transition {
        match action {
            GameAction::Start | GameAction::Reset => Transition {
                state: Self::start(self.rules, rng),
                effect: GameEffect::Started,
            },
            GameAction::SubmitGuess(raw) => self.submit_guess(&raw),
        }
    }

    /// Evaluates a guess.
    ///
    /// Invalid input, a repeated number, or a guess outside a running round
    /// leaves the state unchanged and reports [`GameEffect::Ignored`].
    pub fn submit_guess(self, raw: &str) -> Transition {
        let target = match (self.status, self.target) {
            (GameStatus::Playing, Some(target)) => target,
            (GameStatus::Idle, _) | (GameStatus::Playing, None) => {
                return self.ignore(RejectReason::NotStarted)
            }
            (GameStatus::Won | GameStatus::Lost, _) => return self.ignore(RejectReason::GameOver),
        };

        let value = match parse_guess(raw, &self.rules) {
            Ok(value) => value,
            Err(reason) => return self.ignore(reason),
        };

        if self.has_guessed(value) {
            return self.ignore(RejectReason::Duplicate);
        }

        let mut state = self;
        let result = GuessOutcome::evaluate(value, target);
        let record = GuessRecord::new(value, result, state.next_sequence);
        state.next_sequence += 1;
        state.guesses.insert(0, record);
        debug!(
            "Game {}: guess #{} = {} ({})",
            state.id,
            state.guesses.len(),
            value,
            result
        );

        let effect = match result.direction() {
            None => {
                state.is_game_over = true;
                state.status = GameStatus::Won;
                info!(
                    "Game {} won in {} guesses",
                    state.id,
                    state.guesses.len()
                );
                GameEffect::Won {
                    target,
                    attempts: state.guesses.len(),
                }
            }
            Some(_) if state.limit_reached() => {
                state.is_game_over = true;
                state.status = GameStatus::Lost;
                info!("Game {} lost after {} guesses", state.id, state.guesses.len());
                GameEffect::Lost { target }
            }
            Some(direction) => GameEffect::RequestHint(HintRequest {
                target,
                last_guess: value,
                direction,
                history: state.history_values(),
            }),
        };

        Transition { state, effect }
    }

    fn ignore(self, reason: RejectReason) -> Transition {
        debug!("Game {}: ignored guess ({})", self.id, reason);
        Transition {
            state: self,
            effect: GameEffect::Ignored(reason),
        }
    }

    fn limit_reached(&self) -> bool {
        self.rules
            .max_guesses()
            .map_or(false, |limit| self.guesses.len() >= limit)
    }

    /// Whether a number was already guessed this round.
    pub fn has_guessed(&self, value: u8) -> bool {
        self.guesses.iter().any(|g| g.value() == value)
    }

    /// Unique identifier of this round.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// The rules this round is played under.
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Current lifecycle status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Whether the round has ended.
    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    /// Guesses this round, most recent first.
    pub fn guesses(&self) -> &[GuessRecord] {
        &self.guesses
    }

    /// Guessed values this round, most recent first.
    pub fn history_values(&self) -> Vec<u8> {
        self.guesses.iter().map(|g| g.value()).collect()
    }

    /// Number of guesses made this round.
    pub fn guess_count(&self) -> usize {
        self.guesses.len()
    }

    /// Guesses left before the round is lost, if a limit is set.
    pub fn remaining_guesses(&self) -> Option<usize> {
        self.rules
            .max_guesses()
            .map(|limit| limit.saturating_sub(self.guesses.len()))
    }

    /// The target, available only once the round is over.
    pub fn revealed_target(&self) -> Option<u8> {
        if self.is_game_over {
            self.target
        } else {
            None
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameRules::default())
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("id", &self.id)
            .field("rules", &self.rules)
            .field("target", &self.revealed_target())
            .field("guesses", &self.guesses)
            .field("is_game_over", &self.is_game_over)
            .field("status", &self.status)
            .finish()
    }
}
