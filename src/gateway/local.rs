//! Local resource gateway — best-effort search for nearby wellness spots.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::GeoPoint;
use crate::llm::{GenerativeClient, GroundedRequest, GroundingChunk};

/// Answer returned when the search fails for any reason.
pub const FALLBACK_ANSWER: &str = "Unable to fetch local resources at the moment.";

/// Answer substituted when the model returned places but no prose.
const NO_TEXT_ANSWER: &str = "I couldn't find specific places, but here are some general tips.";

/// A titled link extracted from the response's grounding metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalPlace {
    pub title: String,
    pub uri: String,
}

/// Result of a local search: free-text answer plus zero or more places.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalResourcesResponse {
    pub answer: String,
    pub places: Vec<LocalPlace>,
}

/// Best-effort lookup of local wellness resources.
///
/// Never fails outward: every internal error degrades to a static fallback
/// response rather than surfacing to the caller.
pub struct LocalResourceGateway {
    llm: Arc<dyn GenerativeClient>,
    fallback_center: GeoPoint,
}

impl LocalResourceGateway {
    pub fn new(llm: Arc<dyn GenerativeClient>, fallback_center: GeoPoint) -> Self {
        Self {
            llm,
            fallback_center,
        }
    }

    /// Find top-rated spots matching `query` near `location`.
    pub async fn find_local_spots(&self, location: &str, query: &str) -> LocalResourcesResponse {
        let request = GroundedRequest {
            prompt: local_prompt(location, query),
            center: self.fallback_center,
        };

        match self.llm.generate_grounded(request).await {
            Ok(answer) => {
                let text = answer
                    .text
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| NO_TEXT_ANSWER.to_string());
                LocalResourcesResponse {
                    answer: text,
                    places: collect_places(&answer.chunks),
                }
            }
            Err(e) => {
                warn!(error = %e, query = query, "Local search failed; returning fallback");
                LocalResourcesResponse {
                    answer: FALLBACK_ANSWER.to_string(),
                    places: Vec::new(),
                }
            }
        }
    }
}

fn local_prompt(location: &str, query: &str) -> String {
    format!("Find top rated {query} in or near {location}. suitable for people over 50.")
}

/// Collect places from grounding chunks. A chunk contributes only when both
/// a non-empty uri and title are present; others are skipped silently.
/// Duplicates are kept.
fn collect_places(chunks: &[GroundingChunk]) -> Vec<LocalPlace> {
    chunks
        .iter()
        .filter_map(|chunk| {
            let web = chunk.web.as_ref()?;
            let uri = web.uri.as_deref().filter(|s| !s.is_empty())?;
            let title = web.title.as_deref().filter(|s| !s.is_empty())?;
            Some(LocalPlace {
                title: title.to_string(),
                uri: uri.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::error::LlmError;
    use crate::llm::{GroundedAnswer, StructuredRequest, WebSource};

    struct ScriptedClient {
        answer: Option<GroundedAnswer>,
    }

    #[async_trait]
    impl GenerativeClient for ScriptedClient {
        async fn generate_structured(
            &self,
            _request: StructuredRequest,
        ) -> Result<Option<String>, LlmError> {
            Ok(None)
        }

        async fn generate_grounded(
            &self,
            _request: GroundedRequest,
        ) -> Result<GroundedAnswer, LlmError> {
            match &self.answer {
                Some(answer) => Ok(answer.clone()),
                None => Err(LlmError::Http("network unreachable".to_string())),
            }
        }
    }

    fn gateway(answer: Option<GroundedAnswer>) -> LocalResourceGateway {
        LocalResourceGateway::new(
            Arc::new(ScriptedClient { answer }),
            GeoPoint {
                latitude: 37.7749,
                longitude: -122.4194,
            },
        )
    }

    fn chunk(uri: Option<&str>, title: Option<&str>) -> GroundingChunk {
        GroundingChunk {
            web: Some(WebSource {
                uri: uri.map(String::from),
                title: title.map(String::from),
            }),
        }
    }

    #[test]
    fn prompt_matches_original_wording() {
        assert_eq!(
            local_prompt("Sarasota, FL", "walking groups"),
            "Find top rated walking groups in or near Sarasota, FL. suitable for people over 50."
        );
    }

    #[tokio::test]
    async fn network_failure_degrades_to_fallback() {
        let response = gateway(None).find_local_spots("Sarasota, FL", "gyms").await;
        assert_eq!(response.answer, FALLBACK_ANSWER);
        assert!(response.places.is_empty());
    }

    #[tokio::test]
    async fn chunks_missing_uri_or_title_are_skipped() {
        let answer = GroundedAnswer {
            text: Some("Found a couple of options.".to_string()),
            chunks: vec![
                chunk(Some("a"), Some("A")),
                chunk(None, Some("B")),
                chunk(Some("c"), None),
                chunk(Some(""), Some("D")),
                GroundingChunk { web: None },
            ],
        };
        let response = gateway(Some(answer))
            .find_local_spots("Sarasota, FL", "pools")
            .await;
        assert_eq!(
            response.places,
            vec![LocalPlace {
                title: "A".to_string(),
                uri: "a".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn duplicates_are_kept() {
        let answer = GroundedAnswer {
            text: Some("Same place twice.".to_string()),
            chunks: vec![chunk(Some("a"), Some("A")), chunk(Some("a"), Some("A"))],
        };
        let response = gateway(Some(answer))
            .find_local_spots("Sarasota, FL", "yoga studios")
            .await;
        assert_eq!(response.places.len(), 2);
    }

    #[tokio::test]
    async fn missing_answer_text_gets_generic_line() {
        let answer = GroundedAnswer {
            text: None,
            chunks: vec![chunk(Some("a"), Some("A"))],
        };
        let response = gateway(Some(answer))
            .find_local_spots("Sarasota, FL", "trainers")
            .await;
        assert_eq!(response.answer, NO_TEXT_ANSWER);
        assert_eq!(response.places.len(), 1);
    }
}
