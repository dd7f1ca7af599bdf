//! # Oracle Prompts
//!
//! Prompt construction and the canned lines used when the model cannot answer.

use crate::game::HintRequest;

/// Minimal prompt sent by the connection check.
pub const PING_PROMPT: &str = "Ping";

/// Returned when the hint request fails in transport or at the API.
pub const FALLBACK_HINT: &str = "The connection to the oracle is flickering. Trust your intuition.";

/// Returned when the model replies without any text.
pub const SILENT_HINT: &str = "The stars are silent, try again.";

/// Upper bound on hint length requested from the model.
pub const HINT_WORD_LIMIT: usize = 20;

/// Builds the prompt asking the model for a hint about a missed guess.
///
/// # Examples
///
/// ```
/// use mystic_oracle::{hint_prompt, HintDirection, HintRequest};
///
/// let prompt = hint_prompt(&HintRequest {
///     target: 50,
///     last_guess: 30,
///     direction: HintDirection::Lower,
///     history: vec![30],
/// });
/// assert!(prompt.contains("too low"));
/// ```
pub fn hint_prompt(request: &HintRequest) -> String {
    let history = request
        .history
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are a mystical and slightly snarky game oracle.\n\
         The secret number is {target}.\n\
         The player just guessed {guess}, and it was {direction}.\n\
         Previous guesses: {history}.\n\
         Give a short, cryptic but helpful hint or a witty remark to encourage the player.\n\
         Never reveal the actual number. Keep it under {limit} words.",
        target = request.target,
        guess = request.last_guess,
        direction = request.direction.describe(),
        history = history,
        limit = HINT_WORD_LIMIT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HintDirection;

    fn request(direction: HintDirection, history: Vec<u8>) -> HintRequest {
        HintRequest {
            target: 64,
            last_guess: history[0],
            direction,
            history,
        }
    }

    #[test]
    fn test_prompt_mentions_direction() {
        let low = hint_prompt(&request(HintDirection::Lower, vec![12]));
        let high = hint_prompt(&request(HintDirection::Higher, vec![90]));
        assert!(low.contains("too low"));
        assert!(high.contains("too high"));
    }

    #[test]
    fn test_prompt_lists_history_in_order() {
        let prompt = hint_prompt(&request(HintDirection::Lower, vec![40, 90, 10]));
        assert!(prompt.contains("Previous guesses: 40, 90, 10."));
        assert!(prompt.contains("just guessed 40"));
    }

    #[test]
    fn test_prompt_sets_constraints() {
        let prompt = hint_prompt(&request(HintDirection::Lower, vec![1]));
        assert!(prompt.contains("The secret number is 64."));
        assert!(prompt.contains("Never reveal the actual number"));
        assert!(prompt.contains("under 20 words"));
    }
}
