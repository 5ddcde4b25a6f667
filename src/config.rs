use std::env;
use std::time::Duration;

use crate::error::ReviewerError;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL_PATH: &str = "model/buggy_pr_classifier.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub repository: String,
    pub commit_sha: String,
    pub github_token: String,
    pub gemini_api_key: Option<String>,
    pub github_api_url: String,
    pub gemini_api_url: String,
    pub model_path: String,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self, ReviewerError> {
        let repository = required_var("GITHUB_REPOSITORY")?;
        let commit_sha = required_var("GITHUB_SHA")?;
        let github_token = required_var("GITHUB_TOKEN")?;

        // Optional: without a key the suggestion step degrades to its
        // unavailable variant instead of failing the run.
        let gemini_api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());

        let github_api_url = env::var("GITHUB_API_URL")
            .unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string());

        let gemini_api_url = env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string());

        let model_path = env::var("MODEL_PATH")
            .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string());

        let request_timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|e| {
                ReviewerError::ConfigError(format!("Invalid HTTP_TIMEOUT_SECS: {}", e))
            })?;

        Ok(AppConfig {
            repository,
            commit_sha,
            github_token,
            gemini_api_key,
            github_api_url,
            gemini_api_url,
            model_path,
            request_timeout_secs,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn required_var(name: &str) -> Result<String, ReviewerError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ReviewerError::ConfigError(format!("{} must be set", name))),
    }
}
