//! The single linear review workflow: resolve the PR for a commit, fetch its
//! full record, extract features, score, request suggestions, report a
//! commit status.

use tracing::{error, info};

use crate::classifier::{PredictionResult, RiskClassifier};
use crate::error::ReviewerError;
use crate::features::extract_features;
use crate::github::client::GitHubClient;
use crate::github::types::{CommitStatus, StatusState};
use crate::suggestions::{SuggestionClient, Suggestions};

/// Risk scores strictly above this mark the commit as failed.
pub const RISK_THRESHOLD: f64 = 0.9;

/// Context label shown next to the check in the platform UI.
pub const STATUS_CONTEXT: &str = "AI Bug Reviewer";

const FAILURE_DESCRIPTION: &str = "Bug risk > 90%. Fix required.";
const SUCCESS_DESCRIPTION: &str = "PR looks clean";

#[derive(Debug)]
pub struct ReviewOutcome {
    pub pr_number: u64,
    pub result: PredictionResult,
    pub suggestions: Suggestions,
    pub status: StatusState,
    /// False when the status POST failed; the failure is logged but does not
    /// fail the run.
    pub status_posted: bool,
}

/// Map a risk score to the reported status.
pub fn status_for_score(risk_score: f64) -> (StatusState, &'static str) {
    if risk_score > RISK_THRESHOLD {
        (StatusState::Failure, FAILURE_DESCRIPTION)
    } else {
        (StatusState::Success, SUCCESS_DESCRIPTION)
    }
}

pub async fn run_review(
    github: &GitHubClient,
    classifier: &RiskClassifier,
    suggestions: &SuggestionClient,
    repo: &str,
    sha: &str,
) -> Result<ReviewOutcome, ReviewerError> {
    let pulls = github.pulls_for_commit(repo, sha).await?;
    let candidate = pulls.first().ok_or_else(|| {
        ReviewerError::ResolutionError("no pull requests found for this commit".to_string())
    })?;
    info!("Commit {} resolved to PR #{}", sha, candidate.number);

    let pr = github.pull_request(repo, candidate.number).await?;

    let features = extract_features(&pr);
    let result = classifier.score(&features.to_vector())?;
    info!(
        "PR #{} scored: prediction={} risk_score={:.4}",
        pr.number, result.prediction, result.risk_score
    );

    let body = pr.body.as_deref().unwrap_or("");
    let fix_suggestions = suggestions.fix_suggestions(&pr.title, body).await;

    let (state, description) = status_for_score(result.risk_score);
    let status = CommitStatus {
        state,
        description: description.to_string(),
        context: STATUS_CONTEXT.to_string(),
    };

    // Best-effort: the prediction is already computed, so a failed POST is
    // surfaced to the operator but does not fail the run.
    let status_posted = match github.post_commit_status(repo, sha, &status).await {
        Ok(()) => true,
        Err(e) => {
            error!("{}", e);
            false
        }
    };

    Ok(ReviewOutcome {
        pr_number: pr.number,
        result,
        suggestions: fix_suggestions,
        status: state,
        status_posted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_risk_fails_the_commit() {
        let (state, description) = status_for_score(0.95);
        assert_eq!(state, StatusState::Failure);
        assert_eq!(description, "Bug risk > 90%. Fix required.");
    }

    #[test]
    fn test_low_risk_passes() {
        let (state, description) = status_for_score(0.2);
        assert_eq!(state, StatusState::Success);
        assert_eq!(description, "PR looks clean");
    }

    #[test]
    fn test_threshold_boundary_is_inclusive_success() {
        let (state, _) = status_for_score(RISK_THRESHOLD);
        assert_eq!(state, StatusState::Success);
    }
}
