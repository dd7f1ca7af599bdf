//! # Mystic Oracle
//!
//! A number-guessing game where a remote LLM "oracle" answers every miss with a
//! short, cryptic hint.
//!
//! ## Architecture Overview
//!
//! The crate is split along the two collaborators of the game:
//!
//! - **Game State**: an explicit [`GameState`] value advanced by a reducer-style
//!   transition ([`GameState::reduce`]). Randomness is injected so games can be
//!   replayed from a seed.
//! - **Oracle**: the [`HintProvider`] turns a [`HintRequest`] into a [`Hint`] by
//!   delegating to a [`TextGenerator`]. Hint generation never fails; transport
//!   errors collapse into a fixed fallback line.
//!
//! Around them sit the terminal front end: [`input`] parses lines into
//! [`PlayerInput`], [`scenes`] coordinates state and pending hint requests, and
//! [`rendering`] prints the oracle, the history, and the stats.

pub mod game;
pub mod input;
pub mod oracle;
pub mod rendering;
pub mod scenes;

pub use game::*;
pub use input::*;
pub use oracle::*;
pub use rendering::*;
pub use scenes::*;

/// Core error type for the Mystic Oracle game.
#[derive(thiserror::Error, Debug)]
pub enum OracleError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// HTTP transport failed before a response was read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The text-generation API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// No API credential is available
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Configuration value is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type used throughout the Mystic Oracle codebase.
pub type OracleResult<T> = Result<T, OracleError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Smallest number the target can be
    pub const MIN_GUESS: u8 = 1;

    /// Largest number the target can be
    pub const MAX_GUESS: u8 = 100;

    /// Environment variable holding the API credential
    pub const API_KEY_ENV: &str = "API_KEY";

    /// Model used when none is configured
    pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

    /// Base URL of the hosted text-generation API
    pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

    /// Maximum number of lines kept in the message log
    pub const MAX_MESSAGES: usize = 100;
}
