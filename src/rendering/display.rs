//! # Display Management
//!
//! Terminal output for the game screen and the message log.

use crate::config::MAX_MESSAGES;
use crate::game::GameState;
use crate::rendering::UI;
use crate::OracleResult;
use std::io::Write;

/// Number of log lines shown under the game screen.
const VISIBLE_MESSAGES: usize = 3;

/// Terminal display manager for the game.
///
/// Keeps a bounded log of notices and renders the full screen to any writer.
#[derive(Debug)]
pub struct TerminalDisplay {
    /// Message history, oldest first
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
    /// Panel builder
    pub ui: UI,
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalDisplay {
    /// Creates a display with an empty message log.
    ///
    /// # Examples
    ///
    /// ```
    /// use mystic_oracle::TerminalDisplay;
    ///
    /// let mut display = TerminalDisplay::new();
    /// display.add_message("Welcome!".to_string());
    /// assert_eq!(display.messages.len(), 1);
    /// ```
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            max_messages: MAX_MESSAGES,
            ui: UI::new(),
        }
    }

    /// Appends a notice, dropping the oldest past the limit.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);
        if self.messages.len() > self.max_messages {
            let overflow = self.messages.len() - self.max_messages;
            self.messages = self.messages.split_off(overflow);
        }
    }

    /// Most recent notices, oldest first.
    pub fn recent_messages(&self) -> &[String] {
        let start = self.messages.len().saturating_sub(VISIBLE_MESSAGES);
        &self.messages[start..]
    }

    /// Renders the complete game screen.
    pub fn render_game<W: Write>(
        &self,
        out: &mut W,
        state: &GameState,
        oracle_message: &str,
        hint_pending: bool,
    ) -> OracleResult<()> {
        writeln!(out)?;
        writeln!(out, "=== Mystic Oracle [{}] ===", self.ui.status_label(state.status()))?;
        writeln!(out, "{}", self.ui.oracle_panel(oracle_message, hint_pending))?;
        writeln!(out)?;
        writeln!(out, "  History")?;
        for row in self.ui.history_panel(state) {
            writeln!(out, "{}", row)?;
        }
        writeln!(out, "{}", self.ui.stats_panel(state))?;

        for message in self.recent_messages() {
            writeln!(out, "  · {}", message)?;
        }

        if state.is_game_over() {
            write!(out, "Type 'new' to play again or 'quit' to leave > ")?;
        } else {
            write!(out, "Your guess > ")?;
        }
        out.flush()?;
        Ok(())
    }
}
