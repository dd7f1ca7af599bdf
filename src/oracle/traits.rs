//! # Oracle Traits
//!
//! Trait definitions for text-generation backends.

use crate::OracleResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Sends a prompt to a text-generation model and returns its reply.
///
/// Implementors hide transport, serialization, and vendor details. `Ok(None)`
/// means the model answered without any text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for `prompt` using `model`.
    async fn generate(&self, model: &str, prompt: &str) -> OracleResult<Option<String>>;
}

#[async_trait]
impl<G: TextGenerator + ?Sized> TextGenerator for Arc<G> {
    async fn generate(&self, model: &str, prompt: &str) -> OracleResult<Option<String>> {
        (**self).generate(model, prompt).await
    }
}
