//! # Scene Management System
//!
//! Coordinates the game state, the oracle message, and pending hint requests.
//!
//! The [`SceneManager`] is the single event handler allowed to advance the game.
//! It never performs I/O or network calls itself: handling an input returns a
//! [`SceneCommand`] telling the caller what to do next (ask the oracle, run the
//! connection check, quit). While a hint is pending, new guesses are refused.

use crate::game::{GameAction, GameEffect, GameRules, GameState, GameStatus, HintRequest};
use crate::input::{help_text, InputHandler, PlayerInput};
use crate::oracle::{ConnectionReport, Hint, HintProvider, TextGenerator};
use crate::rendering::TerminalDisplay;
use crate::OracleResult;
use log::debug;
use rand::Rng;
use std::io::Write;

/// Notice shown when a guess arrives while the oracle is still answering.
pub const HINT_PENDING_NOTICE: &str = "The oracle is still speaking. Wait for the hint.";

/// Notice shown when `test` is typed while a connection check is running.
pub const CONNECTION_CHECK_PENDING_NOTICE: &str =
    "A connection test is already running. Wait for its result.";

/// Represents the current scene in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneType {
    /// Accepting guesses
    Playing,
    /// A hint request is in flight; guesses are disabled
    AwaitingHint,
    /// The round ended (won or lost)
    GameOver(GameStatus),
}

/// Work the caller must perform after an input is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneCommand {
    /// Nothing further to do
    None,
    /// Ask the oracle for this hint, then call [`SceneManager::finish_hint`]
    RequestHint(HintRequest),
    /// Run the connection check, then call [`SceneManager::show_connection_report`]
    TestConnection,
    /// Leave the game
    Quit,
}

/// Opening line for the first round.
pub fn welcome_message(rules: &GameRules) -> String {
    format!(
        "Welcome to the Mystic Oracle. Can you guess the number between {} and {}?",
        rules.min(),
        rules.max()
    )
}

/// Opening line for every later round.
pub fn new_game_message(rules: &GameRules) -> String {
    format!(
        "A new mystery begins. {} to {}. Go!",
        rules.min(),
        rules.max()
    )
}

/// Line shown when the target is found.
pub fn victory_message(target: u8) -> String {
    format!(
        "Incredible! You pierced the veil. The number was indeed {}.",
        target
    )
}

/// Line shown when the guess limit runs out.
pub fn defeat_message(target: u8) -> String {
    format!("The mists close in. The number was {}.", target)
}

/// The main scene manager that coordinates all game scenes
pub struct SceneManager<R> {
    current_scene: SceneType,
    game_state: GameState,
    oracle_message: String,
    display: TerminalDisplay,
    input_handler: InputHandler,
    connection_check_pending: bool,
    rng: R,
}

impl<R: Rng> SceneManager<R> {
    /// Creates a scene manager and starts the first round.
    pub fn new(rules: GameRules, mut rng: R) -> Self {
        let oracle_message = welcome_message(&rules);
        let transition = GameState::new(rules).reduce(GameAction::Start, &mut rng);

        Self {
            current_scene: SceneType::Playing,
            game_state: transition.state,
            oracle_message,
            display: TerminalDisplay::new(),
            input_handler: InputHandler::new(),
            connection_check_pending: false,
            rng,
        }
    }

    /// Parses a typed line and handles it.
    pub fn handle_line(&mut self, line: &str) -> SceneCommand {
        match self.input_handler.parse_line(line) {
            Some(input) => self.handle_input(input),
            None => SceneCommand::None,
        }
    }

    /// Handles one player input.
    pub fn handle_input(&mut self, input: PlayerInput) -> SceneCommand {
        match input {
            PlayerInput::Quit => SceneCommand::Quit,
            PlayerInput::Help => {
                self.display.add_message(help_text());
                SceneCommand::None
            }
            PlayerInput::TestConnection => {
                if self.connection_check_pending {
                    self.display
                        .add_message(CONNECTION_CHECK_PENDING_NOTICE.to_string());
                    return SceneCommand::None;
                }
                self.connection_check_pending = true;
                SceneCommand::TestConnection
            }
            other => {
                if self.is_hint_pending() {
                    self.display.add_message(HINT_PENDING_NOTICE.to_string());
                    return SceneCommand::None;
                }
                match other.to_action() {
                    Some(action) => self.apply(action),
                    None => SceneCommand::None,
                }
            }
        }
    }

    /// Runs an action through the game reducer and updates the scene.
    fn apply(&mut self, action: GameAction) -> SceneCommand {
        let state = std::mem::take(&mut self.game_state);
        let transition = state.reduce(action, &mut self.rng);
        self.game_state = transition.state;

        match transition.effect {
            GameEffect::Started => {
                self.current_scene = SceneType::Playing;
                self.oracle_message = new_game_message(self.game_state.rules());
                SceneCommand::None
            }
            GameEffect::Ignored(reason) => {
                debug!("Input ignored: {}", reason);
                SceneCommand::None
            }
            GameEffect::RequestHint(request) => {
                self.current_scene = SceneType::AwaitingHint;
                SceneCommand::RequestHint(request)
            }
            GameEffect::Won { target, .. } => {
                self.current_scene = SceneType::GameOver(GameStatus::Won);
                self.oracle_message = victory_message(target);
                SceneCommand::None
            }
            GameEffect::Lost { target } => {
                self.current_scene = SceneType::GameOver(GameStatus::Lost);
                self.oracle_message = defeat_message(target);
                SceneCommand::None
            }
        }
    }

    /// Shows a hint and re-enables guessing.
    pub fn finish_hint(&mut self, hint: Hint) {
        if self.current_scene != SceneType::AwaitingHint {
            debug!("Dropping hint that arrived outside of a pending request");
            return;
        }
        self.oracle_message = hint.text().to_string();
        self.current_scene = SceneType::Playing;
    }

    /// Asks the provider for a hint and shows it.
    pub async fn resolve_hint<G: TextGenerator>(
        &mut self,
        provider: &HintProvider<G>,
        request: &HintRequest,
    ) {
        let hint = provider.get_hint(request).await;
        self.finish_hint(hint);
    }

    /// Adds the connection check result to the message log and allows another check.
    pub fn show_connection_report(&mut self, report: &ConnectionReport) {
        self.connection_check_pending = false;
        let line = self.display.ui.connection_panel(report);
        self.display.add_message(line.trim_start().to_string());
    }

    /// Renders the current scene.
    pub fn render<W: Write>(&self, out: &mut W) -> OracleResult<()> {
        self.display.render_game(
            out,
            &self.game_state,
            &self.oracle_message,
            self.is_hint_pending(),
        )
    }

    /// Whether a hint request is in flight.
    pub fn is_hint_pending(&self) -> bool {
        self.current_scene == SceneType::AwaitingHint
    }

    /// Whether a connection check is in flight.
    pub fn is_connection_check_pending(&self) -> bool {
        self.connection_check_pending
    }

    /// The scene currently shown.
    pub fn current_scene(&self) -> SceneType {
        self.current_scene
    }

    /// The state of the current round.
    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    /// The line the oracle is currently saying.
    pub fn oracle_message(&self) -> &str {
        &self.oracle_message
    }

    /// Notices logged so far.
    pub fn messages(&self) -> &[String] {
        &self.display.messages
    }
}
