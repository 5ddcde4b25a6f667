//! Best-effort fix suggestions from the Gemini generateContent API.
//!
//! Every failure mode here (missing key, network error, non-200, quota,
//! unparseable body) degrades to [`Suggestions::Unavailable`]; this call must
//! never gate the status report.

use std::fmt;
use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ReviewerError;

pub const GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Outcome of the suggestion call. The unavailable variant renders as the
/// placeholder text surfaced in CI logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestions {
    Available(String),
    Unavailable(String),
}

impl Suggestions {
    pub fn is_available(&self) -> bool {
        matches!(self, Suggestions::Available(_))
    }
}

impl fmt::Display for Suggestions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestions::Available(text) => f.write_str(text),
            Suggestions::Unavailable(message) => {
                write!(f, "Error fetching suggestions: {}", message)
            }
        }
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

pub struct SuggestionClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl SuggestionClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ReviewerError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            ReviewerError::ConfigError(format!("Failed to create suggestion client: {}", e))
        })?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key,
        })
    }

    /// Request fix suggestions for a flagged pull request. Never fails: any
    /// error is folded into the unavailable variant.
    pub async fn fix_suggestions(&self, title: &str, description: &str) -> Suggestions {
        match self.request_suggestions(title, description).await {
            Ok(text) => Suggestions::Available(text),
            Err(e) => {
                warn!("Suggestion request failed: {}", e);
                Suggestions::Unavailable(e.to_string())
            }
        }
    }

    async fn request_suggestions(&self, title: &str, description: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("GEMINI_API_KEY is not set"))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, GEMINI_MODEL
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(title, description),
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP {}", status.as_u16()));
        }

        let body: GenerateContentResponse = response.json().await?;
        let text: String = body
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(anyhow!("response contained no candidates"));
        }

        Ok(text)
    }
}

fn build_prompt(title: &str, description: &str) -> String {
    format!(
        "You are a code reviewer AI. A pull request has been flagged as 'buggy'. \n\
         Here is the PR title and description:\n\
         \n\
         Title: {}\n\
         Description: {}\n\
         \n\
         Suggest specific improvements or bug fixes in concise points.\n",
        title, description
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_title_and_description() {
        let prompt = build_prompt("Fix login", "Handles empty passwords");
        assert!(prompt.contains("Title: Fix login\n"));
        assert!(prompt.contains("Description: Handles empty passwords\n"));
        assert!(prompt.starts_with("You are a code reviewer AI."));
        assert!(prompt.ends_with("concise points.\n"));
    }

    #[test]
    fn test_unavailable_renders_placeholder() {
        let suggestions = Suggestions::Unavailable("HTTP 429".to_string());
        assert_eq!(
            suggestions.to_string(),
            "Error fetching suggestions: HTTP 429"
        );
        assert!(!suggestions.is_available());
    }

    #[test]
    fn test_available_renders_text_verbatim() {
        let suggestions = Suggestions::Available("- add a test".to_string());
        assert_eq!(suggestions.to_string(), "- add a test");
        assert!(suggestions.is_available());
    }
}
