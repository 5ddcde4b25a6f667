use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to resolve pull request: {0}")]
    ResolutionError(String),

    #[error("Failed to fetch PR data: {0}")]
    FetchError(String),

    #[error("Classification error: {0}")]
    ClassificationError(String),

    #[error("Failed to set status: {0}")]
    ReportError(String),
}

impl ReviewerError {
    /// Report failures are logged and swallowed by the pipeline; everything
    /// else terminates the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::ReportError(_))
    }
}
