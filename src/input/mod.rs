//! # Input Module
//!
//! Turns lines typed at the terminal into player inputs.

pub mod commands;

pub use commands::*;

use crate::game::GameAction;

/// Player inputs that can be generated from a typed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    /// Anything that is not a command is treated as a guess
    Guess(String),
    NewGame,
    TestConnection,
    Help,
    Quit,
}

impl PlayerInput {
    /// The game action this input maps to, if it touches game state.
    pub fn to_action(&self) -> Option<GameAction> {
        match self {
            PlayerInput::Guess(raw) => Some(GameAction::SubmitGuess(raw.clone())),
            PlayerInput::NewGame => Some(GameAction::Reset),
            _ => None,
        }
    }
}

/// Input handler for processing typed lines.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use mystic_oracle::{InputHandler, PlayerInput};
    ///
    /// let input_handler = InputHandler::new();
    /// assert_eq!(input_handler.parse_line("quit"), Some(PlayerInput::Quit));
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Parses a line. Blank lines produce nothing.
    pub fn parse_line(&self, line: &str) -> Option<PlayerInput> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        let input = match Command::lookup(trimmed).map(|command| command.kind) {
            Some(CommandKind::NewGame) => PlayerInput::NewGame,
            Some(CommandKind::TestConnection) => PlayerInput::TestConnection,
            Some(CommandKind::Help) => PlayerInput::Help,
            Some(CommandKind::Quit) => PlayerInput::Quit,
            None => PlayerInput::Guess(trimmed.to_string()),
        };
        Some(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_is_ignored() {
        let handler = InputHandler::new();
        assert_eq!(handler.parse_line(""), None);
        assert_eq!(handler.parse_line("   \n"), None);
    }

    #[test]
    fn test_numbers_and_junk_are_guesses() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.parse_line(" 42\n"),
            Some(PlayerInput::Guess("42".to_string()))
        );
        assert_eq!(
            handler.parse_line("forty"),
            Some(PlayerInput::Guess("forty".to_string()))
        );
    }

    #[test]
    fn test_commands() {
        let handler = InputHandler::new();
        assert_eq!(handler.parse_line("new"), Some(PlayerInput::NewGame));
        assert_eq!(handler.parse_line("Ping"), Some(PlayerInput::TestConnection));
        assert_eq!(handler.parse_line("?"), Some(PlayerInput::Help));
        assert_eq!(handler.parse_line("exit"), Some(PlayerInput::Quit));
    }

    #[test]
    fn test_input_to_action() {
        assert_eq!(
            PlayerInput::Guess("7".into()).to_action(),
            Some(GameAction::SubmitGuess("7".into()))
        );
        assert_eq!(PlayerInput::NewGame.to_action(), Some(GameAction::Reset));
        assert_eq!(PlayerInput::Help.to_action(), None);
    }
}
