use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use tracing::{debug, info};

use crate::error::ReviewerError;
use crate::github::types::{CommitStatus, PullRequestRecord, PullRequestSummary};

/// Preview media type required by the commit→PR association endpoint.
const COMMIT_PULLS_ACCEPT: &str = "application/vnd.github.groot-preview+json";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("bug-reviewer/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ReviewerError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ReviewerError::ConfigError(format!("Failed to create GitHub client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    /// List the pull requests associated with a commit. Returns the list in
    /// platform order; the caller takes the first entry as the candidate.
    pub async fn pulls_for_commit(
        &self,
        repo: &str,
        sha: &str,
    ) -> Result<Vec<PullRequestSummary>, ReviewerError> {
        let url = format!("{}/repos/{}/commits/{}/pulls", self.base_url, repo, sha);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, format!("token {}", self.token))
            .header(header::ACCEPT, COMMIT_PULLS_ACCEPT)
            .send()
            .await
            .map_err(|e| ReviewerError::ResolutionError(format!("request failed: {}", e)))?;

        if response.status() != StatusCode::OK {
            return Err(ReviewerError::ResolutionError(format!(
                "HTTP {}",
                response.status().as_u16()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ReviewerError::ResolutionError(format!("invalid response body: {}", e)))
    }

    /// Fetch the full pull request record by number.
    pub async fn pull_request(
        &self,
        repo: &str,
        number: u64,
    ) -> Result<PullRequestRecord, ReviewerError> {
        let url = format!("{}/repos/{}/pulls/{}", self.base_url, repo, number);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, format!("token {}", self.token))
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .send()
            .await
            .map_err(|e| ReviewerError::FetchError(format!("request failed: {}", e)))?;

        if response.status() != StatusCode::OK {
            return Err(ReviewerError::FetchError(format!(
                "HTTP {}",
                response.status().as_u16()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ReviewerError::FetchError(format!("invalid response body: {}", e)))
    }

    /// Post a commit status. The platform answers 201 on success; anything
    /// else is a ReportError carrying the status code and response body.
    pub async fn post_commit_status(
        &self,
        repo: &str,
        sha: &str,
        status: &CommitStatus,
    ) -> Result<(), ReviewerError> {
        let url = format!("{}/repos/{}/statuses/{}", self.base_url, repo, sha);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .json(status)
            .send()
            .await
            .map_err(|e| ReviewerError::ReportError(format!("request failed: {}", e)))?;

        let code = response.status();
        if code != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(ReviewerError::ReportError(format!(
                "HTTP {}: {}",
                code.as_u16(),
                body
            )));
        }

        info!("Status set to: {}", status.state);
        Ok(())
    }
}
