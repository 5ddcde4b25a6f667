//! Pre-trained binary risk classifier.
//!
//! The artifact is a logistic regression head exported to JSON: per-feature
//! coefficients, an intercept, and the feature-name order it was fitted on.
//! It is loaded once at process start and handed to the pipeline explicitly;
//! nothing here trains or mutates the model.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ReviewerError;
use crate::features::FEATURE_COUNT;

#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Result of scoring a single pull request.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub prediction: i64,
    pub risk_score: f64,
}

pub struct RiskClassifier {
    artifact: ModelArtifact,
}

impl RiskClassifier {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ReviewerError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ReviewerError::ClassificationError(format!(
                "Failed to read model artifact {}: {}",
                path.display(),
                e
            ))
        })?;

        let artifact: ModelArtifact = serde_json::from_str(&raw).map_err(|e| {
            ReviewerError::ClassificationError(format!("Invalid model artifact: {}", e))
        })?;

        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ReviewerError> {
        if artifact.coefficients.len() != artifact.feature_names.len() {
            return Err(ReviewerError::ClassificationError(format!(
                "Model artifact has {} coefficients for {} features",
                artifact.coefficients.len(),
                artifact.feature_names.len()
            )));
        }

        if artifact.coefficients.len() != FEATURE_COUNT {
            return Err(ReviewerError::ClassificationError(format!(
                "Model expects {} features, artifact has {}",
                FEATURE_COUNT,
                artifact.coefficients.len()
            )));
        }

        Ok(Self { artifact })
    }

    /// Probability of the positive (buggy) class.
    pub fn predict_proba(&self, vector: &[f64]) -> Result<f64, ReviewerError> {
        Ok(sigmoid(self.decision_value(vector)?))
    }

    /// Class label: 1 when P(buggy) >= 0.5, else 0.
    pub fn predict(&self, vector: &[f64]) -> Result<i64, ReviewerError> {
        let proba = self.predict_proba(vector)?;
        Ok(if proba >= 0.5 { 1 } else { 0 })
    }

    /// Label and probability in one pass.
    pub fn score(&self, vector: &[f64]) -> Result<PredictionResult, ReviewerError> {
        let risk_score = self.predict_proba(vector)?;
        Ok(PredictionResult {
            prediction: if risk_score >= 0.5 { 1 } else { 0 },
            risk_score,
        })
    }

    fn decision_value(&self, vector: &[f64]) -> Result<f64, ReviewerError> {
        if vector.len() != self.artifact.coefficients.len() {
            return Err(ReviewerError::ClassificationError(format!(
                "Feature vector has {} values, model expects {}",
                vector.len(),
                self.artifact.coefficients.len()
            )));
        }

        let dot: f64 = self
            .artifact
            .coefficients
            .iter()
            .zip(vector)
            .map(|(w, x)| w * x)
            .sum();

        Ok(dot + self.artifact.intercept)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
