//! Error types for the label-decision engine

use thiserror::Error;

use crate::collaborators::PrNumber;

/// Failures reported by the source-control host (label store, diff source).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostingError {
    /// The addressed resource does not exist (e.g. label not on the PR)
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Host answered with a non-success status
    #[error("Hosting API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Request never produced a response
    #[error("Hosting request failed: {0}")]
    Transport(String),
}

impl HostingError {
    /// Whether this failure means "the thing is already absent".
    pub fn is_not_found(&self) -> bool {
        matches!(self, HostingError::NotFound { .. })
    }
}

/// Result type for hosting operations
pub type HostingResult<T> = std::result::Result<T, HostingError>;

/// Failures reported by an LLM classifier binding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    /// Provider answered with a non-success status
    #[error("{provider} error: {status}")]
    Status { provider: String, status: u16 },

    /// Request never produced a response
    #[error("{provider} request failed: {message}")]
    Transport { provider: String, message: String },

    /// Response body was not the expected JSON shape
    #[error("{provider} returned an unreadable response: {message}")]
    Decode { provider: String, message: String },
}

/// Run-level failures. Every variant renders as a single readable line that
/// already names its cause, which is what the CI runtime gets to see.
#[derive(Error, Debug)]
pub enum LabelerError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("This action must run on a pull_request event.")]
    NotAPullRequestEvent,

    #[error("Failed to read event payload: {0}")]
    Event(String),

    #[error("Failed to fetch diff for PR {pr}: {cause}")]
    Diff { pr: PrNumber, cause: HostingError },

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error("Failed to apply label '{label}' to PR {pr}: {cause}")]
    LabelAddition {
        label: String,
        pr: PrNumber,
        cause: HostingError,
    },
}

/// Result type for labeler runs
pub type Result<T> = std::result::Result<T, LabelerError>;
