//! # Oracle Module
//!
//! LLM integration that turns missed guesses into hints.
//!
//! The [`HintProvider`] owns a [`TextGenerator`] and a model name. Hint
//! generation never fails: any transport or API error is logged and replaced
//! with [`FALLBACK_HINT`]. The connection check is the one place where errors
//! reach the caller, so they can be shown to the player.

pub mod gemini;
pub mod prompt;
pub mod traits;

pub use gemini::*;
pub use prompt::*;
pub use traits::*;

use crate::game::HintRequest;
use crate::{config, OracleError, OracleResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Configuration for the oracle backend.
#[derive(Clone, PartialEq, Eq)]
pub struct OracleConfig {
    /// Model identifier sent with every request
    pub model: String,
    /// Base URL of the text-generation API
    pub endpoint: String,
    /// API credential; None when the environment does not provide one
    pub api_key: Option<String>,
}

impl OracleConfig {
    /// Builds configuration from defaults and the `API_KEY` environment variable.
    pub fn from_env() -> Self {
        Self {
            api_key: env::var(config::API_KEY_ENV).ok(),
            ..Self::default()
        }
    }

    /// Overrides the model if one is given.
    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        self
    }

    /// Overrides the endpoint if one is given.
    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        self
    }

    /// Checks that the configured values are usable.
    pub fn validate(&self) -> OracleResult<()> {
        if self.model.trim().is_empty() {
            return Err(OracleError::InvalidConfig("model must not be empty".to_string()));
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(OracleError::InvalidConfig(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        Ok(())
    }
}

/// Stand-in printed for a configured API key.
pub(crate) const REDACTED: &str = "<redacted>";

impl fmt::Debug for OracleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OracleConfig")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .finish()
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            model: config::DEFAULT_MODEL.to_string(),
            endpoint: config::DEFAULT_ENDPOINT.to_string(),
            api_key: None,
        }
    }
}

/// Where a hint's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HintSource {
    /// Generated by the model
    Oracle,
    /// The model answered with no text
    EmptyResponse,
    /// The request failed
    Fallback,
}

/// A hint ready to show to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    text: String,
    source: HintSource,
}

impl Hint {
    fn oracle(text: &str) -> Self {
        Self {
            text: text.to_string(),
            source: HintSource::Oracle,
        }
    }

    fn silent() -> Self {
        Self {
            text: SILENT_HINT.to_string(),
            source: HintSource::EmptyResponse,
        }
    }

    /// The canned hint used when the oracle cannot be reached.
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_HINT.to_string(),
            source: HintSource::Fallback,
        }
    }

    /// The hint text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Where the text came from.
    pub fn source(&self) -> HintSource {
        self.source
    }
}

/// Produces hints and runs the connection check against a text generator.
pub struct HintProvider<G> {
    generator: G,
    model: String,
}

impl<G: TextGenerator> HintProvider<G> {
    /// Creates a provider that asks `model` through `generator`.
    pub fn new(generator: G, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    /// The model this provider asks.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Asks the model for a hint about a missed guess.
    ///
    /// Never fails. A transport or API error yields [`FALLBACK_HINT`]; a reply
    /// without text yields [`SILENT_HINT`].
    pub async fn get_hint(&self, request: &HintRequest) -> Hint {
        let prompt = hint_prompt(request);
        match self.generator.generate(&self.model, &prompt).await {
            Ok(Some(text)) if !text.trim().is_empty() => Hint::oracle(text.trim()),
            Ok(_) => {
                warn!("Oracle returned an empty hint");
                Hint::silent()
            }
            Err(e) => {
                warn!("Hint request failed: {}", e);
                Hint::fallback()
            }
        }
    }

    /// Sends a minimal prompt and reports whether any text came back.
    ///
    /// Errors, including a missing credential, are returned to the caller.
    pub async fn test_connection(&self) -> OracleResult<bool> {
        let reply = self.generator.generate(&self.model, PING_PROMPT).await?;
        Ok(reply.map_or(false, |text| !text.trim().is_empty()))
    }
}

/// Outcome of the connection check as shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Idle,
    Testing,
    Success,
    Error,
}

/// Connection check status plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionReport {
    pub status: ConnectionStatus,
    pub message: String,
}

/// Message shown when the connection check succeeds.
pub const CONNECTION_OK_MESSAGE: &str = "The oracle answers. Every feature is available.";

/// Message shown when the connection check gets no text back.
pub const CONNECTION_EMPTY_MESSAGE: &str = "No response from the API.";

/// Message shown when no credential is configured.
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "The API_KEY environment variable is not configured.";

/// Runs the connection check and turns the result into a report.
pub async fn check_connection<G: TextGenerator>(provider: &HintProvider<G>) -> ConnectionReport {
    info!("Testing connection to model {}", provider.model());
    match provider.test_connection().await {
        Ok(true) => ConnectionReport {
            status: ConnectionStatus::Success,
            message: CONNECTION_OK_MESSAGE.to_string(),
        },
        Ok(false) => ConnectionReport {
            status: ConnectionStatus::Error,
            message: CONNECTION_EMPTY_MESSAGE.to_string(),
        },
        Err(e) => {
            warn!("Connection test failed: {}", e);
            ConnectionReport {
                status: ConnectionStatus::Error,
                message: describe_connection_error(&e),
            }
        }
    }
}

/// User-facing text for a connection check error.
///
/// A missing credential gets a dedicated message; anything else is shown raw.
pub fn describe_connection_error(error: &OracleError) -> String {
    match error {
        OracleError::MissingCredential(_) => MISSING_CREDENTIAL_MESSAGE.to_string(),
        other => {
            let message = other.to_string();
            if message.contains(config::API_KEY_ENV) {
                MISSING_CREDENTIAL_MESSAGE.to_string()
            } else {
                message
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HintDirection;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies with a fixed result and records every prompt.
    struct ScriptedGenerator {
        reply: fn() -> OracleResult<Option<String>>,
        prompts: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedGenerator {
        fn new(reply: fn() -> OracleResult<Option<String>>) -> Self {
            Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, model: &str, prompt: &str) -> OracleResult<Option<String>> {
            self.prompts
                .lock()
                .unwrap()
                .push((model.to_string(), prompt.to_string()));
            (self.reply)()
        }
    }

    fn request() -> HintRequest {
        HintRequest {
            target: 50,
            last_guess: 30,
            direction: HintDirection::Lower,
            history: vec![30],
        }
    }

    #[tokio::test]
    async fn test_hint_from_model_is_trimmed() {
        let provider = HintProvider::new(
            ScriptedGenerator::new(|| Ok(Some("  Climb, seeker.\n".to_string()))),
            "test-model",
        );
        let hint = provider.get_hint(&request()).await;
        assert_eq!(hint.text(), "Climb, seeker.");
        assert_eq!(hint.source(), HintSource::Oracle);

        let prompts = provider.generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].0, "test-model");
        assert!(prompts[0].1.contains("too low"));
    }

    #[tokio::test]
    async fn test_empty_reply_uses_silent_hint() {
        let provider = HintProvider::new(ScriptedGenerator::new(|| Ok(None)), "m");
        let hint = provider.get_hint(&request()).await;
        assert_eq!(hint.text(), SILENT_HINT);
        assert_eq!(hint.source(), HintSource::EmptyResponse);

        let provider = HintProvider::new(ScriptedGenerator::new(|| Ok(Some("   ".into()))), "m");
        assert_eq!(provider.get_hint(&request()).await.text(), SILENT_HINT);
    }

    #[tokio::test]
    async fn test_failure_uses_fallback_hint() {
        let provider = HintProvider::new(
            ScriptedGenerator::new(|| {
                Err(OracleError::Api {
                    status: 503,
                    message: "overloaded".to_string(),
                })
            }),
            "m",
        );
        let hint = provider.get_hint(&request()).await;
        assert_eq!(hint.text(), FALLBACK_HINT);
        assert_eq!(hint.source(), HintSource::Fallback);
    }

    #[tokio::test]
    async fn test_connection_check_sends_ping() {
        let provider = HintProvider::new(ScriptedGenerator::new(|| Ok(Some("Pong".into()))), "m");
        assert!(provider.test_connection().await.unwrap());
        assert_eq!(provider.generator.prompts.lock().unwrap()[0].1, PING_PROMPT);
    }

    #[tokio::test]
    async fn test_connection_check_empty_reply_is_false() {
        let provider = HintProvider::new(ScriptedGenerator::new(|| Ok(None)), "m");
        assert!(!provider.test_connection().await.unwrap());

        let report = check_connection(&provider).await;
        assert_eq!(report.status, ConnectionStatus::Error);
        assert_eq!(report.message, CONNECTION_EMPTY_MESSAGE);
    }

    #[tokio::test]
    async fn test_connection_check_reports_missing_credential() {
        let provider = HintProvider::new(
            ScriptedGenerator::new(|| Err(OracleError::MissingCredential("unset".into()))),
            "m",
        );
        let err = provider.test_connection().await.unwrap_err();
        assert!(matches!(err, OracleError::MissingCredential(_)));

        let report = check_connection(&provider).await;
        assert_eq!(report.status, ConnectionStatus::Error);
        assert_eq!(report.message, MISSING_CREDENTIAL_MESSAGE);
    }

    #[test]
    fn test_describe_connection_error_raw_message() {
        let err = OracleError::Api {
            status: 403,
            message: "permission denied".to_string(),
        };
        assert_eq!(describe_connection_error(&err), "API error (403): permission denied");

        let err = OracleError::Api {
            status: 400,
            message: "API_KEY invalid".to_string(),
        };
        assert_eq!(describe_connection_error(&err), MISSING_CREDENTIAL_MESSAGE);
    }

    #[test]
    fn test_config_overrides() {
        let config = OracleConfig::default()
            .with_model(Some("other-model".to_string()))
            .with_endpoint(None);
        assert_eq!(config.model, "other-model");
        assert_eq!(config.endpoint, config::DEFAULT_ENDPOINT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = OracleConfig::default().with_endpoint(Some("ftp://nope".into()));
        assert!(config.validate().is_err());

        let config = OracleConfig::default().with_model(Some(" ".into()));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_debug_hides_api_key() {
        let config = OracleConfig {
            api_key: Some("sk-very-secret".to_string()),
            ..OracleConfig::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk-very-secret"));
        assert!(printed.contains(REDACTED));
        assert!(printed.contains(config::DEFAULT_MODEL));

        let printed = format!("{:?}", OracleConfig::default());
        assert!(printed.contains("api_key: None"));
    }
}
