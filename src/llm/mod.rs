//! LLM integration for PrimeVitality.
//!
//! The service delegates all "intelligence" to Google's generative-language
//! API. Gateways depend on the `GenerativeClient` trait; `GeminiClient` is
//! the one production implementation, speaking `generateContent` over REST.

pub mod client;
pub mod gemini;

pub use client::{
    GenerativeClient, GroundedAnswer, GroundedRequest, GroundingChunk, StructuredRequest,
    WebSource,
};
pub use gemini::GeminiClient;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::LlmError;

/// Create a generative client from configuration.
pub fn create_client(config: &AppConfig) -> Result<Arc<dyn GenerativeClient>, LlmError> {
    let client = GeminiClient::new(config)?;
    tracing::info!(model = %config.model, "Using Gemini generative backend");
    Ok(Arc::new(client))
}
