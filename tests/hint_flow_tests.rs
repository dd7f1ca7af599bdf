//! Integration tests for the guess → hint round trip.

use async_trait::async_trait;
use mystic_oracle::{
    describe_connection_error, GameEffect, GameRules, GameState, HintDirection, HintProvider,
    HintRequest, HintSource, OracleError, OracleResult, SceneCommand, SceneManager, TextGenerator,
    FALLBACK_HINT, MISSING_CREDENTIAL_MESSAGE,
};
use rand::{rngs::StdRng, SeedableRng};
use std::sync::{Arc, Mutex};

/// Records prompts and answers with a fixed line, or fails when told to.
#[derive(Default)]
struct RecordingGenerator {
    prompts: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingGenerator {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(&self, _model: &str, prompt: &str) -> OracleResult<Option<String>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            Err(OracleError::Api {
                status: 500,
                message: "simulated network error".to_string(),
            })
        } else {
            Ok(Some("The veil thins upward.".to_string()))
        }
    }
}

/// Plays one guess and consults the oracle if the game asks for it.
async fn play(
    state: GameState,
    guess: &str,
    provider: &HintProvider<Arc<RecordingGenerator>>,
) -> (GameState, GameEffect, Option<String>) {
    let transition = state.submit_guess(guess);
    let hint = match transition.hint_request() {
        Some(request) => Some(provider.get_hint(request).await.text().to_string()),
        None => None,
    };
    (transition.state, transition.effect, hint)
}

#[tokio::test]
async fn test_low_guess_requests_hint() {
    let generator = Arc::new(RecordingGenerator::default());
    let provider = HintProvider::new(Arc::clone(&generator), "test-model");
    let state = GameState::with_target(GameRules::default(), 50).unwrap();

    let (state, effect, hint) = play(state, "30", &provider).await;

    assert_eq!(
        effect,
        GameEffect::RequestHint(HintRequest {
            target: 50,
            last_guess: 30,
            direction: HintDirection::Lower,
            history: vec![30],
        })
    );
    assert!(!state.is_game_over());
    assert_eq!(hint.as_deref(), Some("The veil thins upward."));
    assert_eq!(generator.calls(), 1);

    let prompt = generator.prompts.lock().unwrap()[0].clone();
    assert!(prompt.contains("The secret number is 50."));
    assert!(prompt.contains("just guessed 30, and it was too low"));
    assert!(prompt.contains("Previous guesses: 30."));
}

#[tokio::test]
async fn test_correct_guess_issues_no_hint_request() {
    let generator = Arc::new(RecordingGenerator::default());
    let provider = HintProvider::new(Arc::clone(&generator), "test-model");
    let state = GameState::with_target(GameRules::default(), 50).unwrap();

    let (state, effect, hint) = play(state, "50", &provider).await;

    assert_eq!(
        effect,
        GameEffect::Won {
            target: 50,
            attempts: 1
        }
    );
    assert!(state.is_game_over());
    assert!(hint.is_none());
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_provider_failure_returns_fallback() {
    let generator = Arc::new(RecordingGenerator::failing());
    let provider = HintProvider::new(Arc::clone(&generator), "test-model");
    let request = HintRequest {
        target: 12,
        last_guess: 80,
        direction: HintDirection::Higher,
        history: vec![80],
    };

    let hint = provider.get_hint(&request).await;
    assert_eq!(hint.text(), FALLBACK_HINT);
    assert_eq!(hint.source(), HintSource::Fallback);
}

#[tokio::test]
async fn test_connection_errors_are_surfaced() {
    let provider = HintProvider::new(RecordingGenerator::failing(), "test-model");
    let err = provider.test_connection().await.unwrap_err();
    assert_eq!(
        describe_connection_error(&err),
        "API error (500): simulated network error"
    );
    assert_eq!(
        describe_connection_error(&OracleError::MissingCredential("API_KEY unset".into())),
        MISSING_CREDENTIAL_MESSAGE
    );
}

#[tokio::test]
async fn test_scene_flow_with_failing_oracle() {
    let provider = HintProvider::new(RecordingGenerator::failing(), "test-model");
    let mut scenes = SceneManager::new(GameRules::default(), StdRng::seed_from_u64(77));

    // Walk the range until a miss triggers a hint request.
    let mut request = None;
    for guess in 1..=100u8 {
        if let SceneCommand::RequestHint(r) = scenes.handle_line(&guess.to_string()) {
            request = Some(r);
            break;
        }
        if scenes.game_state().is_game_over() {
            scenes.handle_line("new");
        }
    }
    let request = request.expect("a miss happens within the range");
    assert!(scenes.is_hint_pending());

    scenes.resolve_hint(&provider, &request).await;
    assert!(!scenes.is_hint_pending());
    assert_eq!(scenes.oracle_message(), FALLBACK_HINT);
}
