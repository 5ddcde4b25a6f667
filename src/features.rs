//! Feature extraction for the pull request risk model.
//!
//! The vector layout is a trained-model contract: the classifier was fitted
//! on features in exactly this order, so reordering fields here silently
//! corrupts every prediction.

use crate::github::types::PullRequestRecord;

/// Number of scalars the model consumes.
pub const FEATURE_COUNT: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrFeatures {
    pub title_len: i64,
    pub desc_len: i64,
    pub status: i64,
    pub num_comments: i64,
    pub num_additions: i64,
    pub num_deletions: i64,
    pub num_commits: i64,
    pub was_closed: i64,
    pub num_changed_files: i64,
}

impl PrFeatures {
    /// Flatten into the order the classifier was trained on.
    pub fn to_vector(&self) -> Vec<f64> {
        vec![
            self.title_len as f64,
            self.desc_len as f64,
            self.status as f64,
            self.num_comments as f64,
            self.num_additions as f64,
            self.num_deletions as f64,
            self.num_commits as f64,
            self.was_closed as f64,
            self.num_changed_files as f64,
        ]
    }
}

/// Derive the feature set from a pull request record. Pure and total: every
/// missing field has a default, so this never fails.
pub fn extract_features(pr: &PullRequestRecord) -> PrFeatures {
    let body = pr.body.as_deref().unwrap_or("");

    // Case-insensitive, unlike was_closed below. The divergence matches the
    // data the model was trained on and must not be "fixed" on its own.
    let status = match pr.state.to_lowercase().as_str() {
        "open" => 0,
        "closed" => 1,
        _ => -1,
    };

    let was_closed = if pr.state == "closed" { 1 } else { 0 };

    PrFeatures {
        title_len: pr.title.chars().count() as i64,
        desc_len: body.chars().count() as i64,
        status,
        num_comments: pr.comments as i64,
        num_additions: pr.additions as i64,
        num_deletions: pr.deletions as i64,
        num_commits: pr.commits as i64,
        was_closed,
        num_changed_files: pr.changed_files.unwrap_or(1) as i64,
    }
}
