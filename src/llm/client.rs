//! Provider seam for the hosted generative-language service.
//!
//! The two gateways depend on this trait rather than on the wire client, so
//! tests can script responses without touching the network.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::GeoPoint;
use crate::error::LlmError;

/// Request for a schema-constrained JSON generation call.
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    /// System instruction establishing the model's role.
    pub system_instruction: String,
    /// User-facing prompt text.
    pub prompt: String,
    /// JSON schema the model output must conform to.
    pub response_schema: serde_json::Value,
}

/// Request for a geographically grounded free-text call.
#[derive(Debug, Clone)]
pub struct GroundedRequest {
    pub prompt: String,
    /// Fallback center point supplied to the retrieval tool.
    pub center: GeoPoint,
}

/// A citation fragment attached by the retrieval tool.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebSource>,
}

/// Link data inside a grounding chunk. Either field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Answer from a grounded call: free text plus citation chunks.
#[derive(Debug, Clone, Default)]
pub struct GroundedAnswer {
    /// Free-text answer, absent when the model produced none.
    pub text: Option<String>,
    pub chunks: Vec<GroundingChunk>,
}

/// A client for the external generative-language service.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Generate text constrained to `response_schema`.
    ///
    /// Returns the raw model text, or `None` when the call succeeded but the
    /// response carried no content.
    async fn generate_structured(
        &self,
        request: StructuredRequest,
    ) -> Result<Option<String>, LlmError>;

    /// Answer a query with the geographic retrieval tool enabled.
    async fn generate_grounded(&self, request: GroundedRequest)
    -> Result<GroundedAnswer, LlmError>;
}
