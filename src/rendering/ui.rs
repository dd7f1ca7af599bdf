//! # User Interface Elements
//!
//! Text panels for the guess history, round stats, and the oracle banner.

use crate::game::{GameState, GameStatus, GuessOutcome, GuessRecord};
use crate::oracle::{ConnectionReport, ConnectionStatus};

/// Builds the text panels shown around the game.
#[derive(Debug, Default)]
pub struct UI;

impl UI {
    /// Creates a new UI instance.
    pub fn new() -> Self {
        Self
    }

    /// Oracle banner. Shows a waiting line while a hint is pending.
    pub fn oracle_panel(&self, message: &str, hint_pending: bool) -> String {
        if hint_pending {
            "  ✨ The oracle is gazing into the mists...".to_string()
        } else {
            format!("  ✨ \"{}\"", message)
        }
    }

    /// One row per guess, most recent first, numbered in guess order.
    pub fn history_panel(&self, state: &GameState) -> Vec<String> {
        let guesses = state.guesses();
        if guesses.is_empty() {
            return vec!["  No guesses yet".to_string()];
        }
        guesses
            .iter()
            .enumerate()
            .map(|(idx, record)| self.history_row(guesses.len() - idx, record))
            .collect()
    }

    fn history_row(&self, number: usize, record: &GuessRecord) -> String {
        let label = match record.result() {
            GuessOutcome::Correct => "WINNER!".to_string(),
            other => other.to_string().to_uppercase(),
        };
        format!("  #{:<3} {:>3}  {}", number, record.value(), label)
    }

    /// Guess count, range, and remaining guesses when limited.
    pub fn stats_panel(&self, state: &GameState) -> String {
        let rules = state.rules();
        let mut stats = format!(
            "  Guesses: {}   Range: {} - {}",
            state.guess_count(),
            rules.min(),
            rules.max()
        );
        match state.remaining_guesses() {
            Some(left) => stats.push_str(&format!("   Left: {}", left)),
            None => stats.push_str("   Difficulty: Normal"),
        }
        stats
    }

    /// Short status label for the round.
    pub fn status_label(&self, status: GameStatus) -> &'static str {
        match status {
            GameStatus::Idle => "IDLE",
            GameStatus::Playing => "PLAYING",
            GameStatus::Won => "WON",
            GameStatus::Lost => "LOST",
        }
    }

    /// Connection check result.
    pub fn connection_panel(&self, report: &ConnectionReport) -> String {
        let badge = match report.status {
            ConnectionStatus::Idle => "IDLE",
            ConnectionStatus::Testing => "TESTING",
            ConnectionStatus::Success => "OK",
            ConnectionStatus::Error => "ERROR",
        };
        format!("  [connection: {}] {}", badge, report.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameRules;

    #[test]
    fn test_history_rows_are_numbered() {
        let state = GameState::with_target(GameRules::default(), 50).unwrap();
        let state = state.submit_guess("20").state;
        let state = state.submit_guess("70").state;
        let state = state.submit_guess("50").state;

        let rows = UI::new().history_panel(&state);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains("#3") && rows[0].contains("WINNER!"));
        assert!(rows[1].contains("#2") && rows[1].contains("HIGHER"));
        assert!(rows[2].contains("#1") && rows[2].contains("LOWER"));
    }

    #[test]
    fn test_empty_history() {
        let rows = UI::new().history_panel(&GameState::default());
        assert_eq!(rows, vec!["  No guesses yet".to_string()]);
    }

    #[test]
    fn test_stats_show_limit() {
        let rules = GameRules::default().with_max_guesses(5).unwrap();
        let state = GameState::with_target(rules, 50).unwrap().submit_guess("1").state;
        let stats = UI::new().stats_panel(&state);
        assert!(stats.contains("Guesses: 1"));
        assert!(stats.contains("Left: 4"));
    }

    #[test]
    fn test_pending_oracle_panel() {
        let ui = UI::new();
        assert!(ui.oracle_panel("ignored", true).contains("gazing"));
        assert!(ui.oracle_panel("Seek higher.", false).contains("\"Seek higher.\""));
    }
}
