//! Gemini wire client — speaks the `generateContent` REST API.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::LlmError;

use super::client::{
    GenerativeClient, GroundedAnswer, GroundedRequest, GroundingChunk, StructuredRequest,
};

/// Gemini client over the REST `generateContent` endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: SecretString,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| LlmError::Http(e.to_string()))?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: config.endpoint.clone(),
        })
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint,
            self.model,
            self.api_key.expose_secret()
        )
    }

    async fn dispatch(
        &self,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        let response = self
            .client
            .post(self.request_url())
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Http(e.to_string()))?;
        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;

        if let Some(error) = parsed.error {
            return Err(LlmError::Api(error.message));
        }

        Ok(parsed)
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate_structured(
        &self,
        request: StructuredRequest,
    ) -> Result<Option<String>, LlmError> {
        let body = GenerateContentRequest {
            contents: vec![Content::user(request.prompt)],
            system_instruction: Some(SystemInstruction {
                parts: vec![Part {
                    text: request.system_instruction,
                }],
            }),
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: request.response_schema,
            }),
            tools: None,
            tool_config: None,
        };

        let response = self.dispatch(&body).await?;
        Ok(response.into_first_candidate().and_then(candidate_text))
    }

    async fn generate_grounded(
        &self,
        request: GroundedRequest,
    ) -> Result<GroundedAnswer, LlmError> {
        let body = GenerateContentRequest {
            contents: vec![Content::user(request.prompt)],
            system_instruction: None,
            generation_config: None,
            tools: Some(vec![Tool {
                google_maps: GoogleMapsTool {},
            }]),
            tool_config: Some(ToolConfig {
                retrieval_config: RetrievalConfig {
                    lat_lng: LatLng {
                        latitude: request.center.latitude,
                        longitude: request.center.longitude,
                    },
                },
            }),
        };

        let response = self.dispatch(&body).await?;
        let Some(mut candidate) = response.into_first_candidate() else {
            return Ok(GroundedAnswer::default());
        };

        let chunks = candidate
            .grounding_metadata
            .take()
            .map(|m| m.grounding_chunks)
            .unwrap_or_default();
        let text = candidate_text(candidate);

        Ok(GroundedAnswer { text, chunks })
    }
}

/// Join the text parts of a candidate, or `None` when there are none.
fn candidate_text(candidate: Candidate) -> Option<String> {
    let parts = candidate.content?.parts;
    let text: String = parts.into_iter().filter_map(|p| p.text).collect();
    if text.is_empty() { None } else { Some(text) }
}

// Wire structures for the generateContent API.

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    #[serde(rename = "toolConfig", skip_serializing_if = "Option::is_none")]
    tool_config: Option<ToolConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn user(text: String) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part { text }],
        }
    }
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(rename = "googleMaps")]
    google_maps: GoogleMapsTool,
}

#[derive(Debug, Serialize)]
struct GoogleMapsTool {}

#[derive(Debug, Serialize)]
struct ToolConfig {
    #[serde(rename = "retrievalConfig")]
    retrieval_config: RetrievalConfig,
}

#[derive(Debug, Serialize)]
struct RetrievalConfig {
    #[serde(rename = "latLng")]
    lat_lng: LatLng,
}

#[derive(Debug, Serialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiErrorDetail>,
}

impl GenerateContentResponse {
    fn into_first_candidate(self) -> Option<Candidate> {
        self.candidates.and_then(|c| c.into_iter().next())
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[allow(dead_code)]
    code: Option<i32>,
}
