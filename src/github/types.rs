use std::fmt;

use serde::{Deserialize, Serialize};

/// Entry from the commit→PR association endpoint. That endpoint returns a
/// partial projection without additions/deletions/changed_files, so only the
/// number is consumed; the full record is fetched separately.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestSummary {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub state: String,
}

/// Full pull request record as returned by the "get pull request" endpoint.
/// Counts the platform omits default to 0, except `changed_files` which
/// defaults to 1 at feature-extraction time.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestRecord {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub commits: u64,
    #[serde(default)]
    pub changed_files: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    Success,
    Failure,
    Pending,
}

impl StatusState {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusState::Success => "success",
            StatusState::Failure => "failure",
            StatusState::Pending => "pending",
        }
    }
}

impl fmt::Display for StatusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /repos/{repo}/statuses/{sha}`.
#[derive(Debug, Clone, Serialize)]
pub struct CommitStatus {
    pub state: StatusState,
    pub description: String,
    pub context: String,
}
