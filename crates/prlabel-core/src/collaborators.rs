//! Collaborator trait definitions
//!
//! The engine never talks to a network directly. It consumes:
//! - `LabelStore`: add/remove label names on a PR
//! - `DiffSource`: the unified diff of a PR
//! - `Classifier`: free-text answer to a (system, user) prompt pair
//!
//! All traits are async and backend-agnostic. In-memory fakes are provided
//! for testing via the `fakes` module.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, HostingResult};
use crate::size::ChangeVolume;

/// Pull request number within a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PrNumber(pub u64);

impl std::fmt::Display for PrNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Snapshot of the PR fields the engine needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: PrNumber,
    pub title: String,
    pub additions: u64,
    pub deletions: u64,
}

impl PullRequest {
    pub fn new(number: u64, title: impl Into<String>, additions: u64, deletions: u64) -> Self {
        Self {
            number: PrNumber(number),
            title: title.into(),
            additions,
            deletions,
        }
    }

    pub fn volume(&self) -> ChangeVolume {
        ChangeVolume::new(self.additions, self.deletions)
    }
}

/// Label storage on the hosting side.
///
/// Contract:
/// - `add_labels` attaches every name given; existing labels are untouched.
/// - `remove_label` detaches one name. A label that is not on the PR must be
///   reported as `HostingError::NotFound` or treated as success, never as
///   another error kind.
#[async_trait]
pub trait LabelStore: Send + Sync {
    async fn add_labels(&self, pr: PrNumber, labels: &[String]) -> HostingResult<()>;

    async fn remove_label(&self, pr: PrNumber, label: &str) -> HostingResult<()>;
}

/// Source of a PR's unified diff. An empty diff is valid.
#[async_trait]
pub trait DiffSource: Send + Sync {
    async fn fetch_diff(&self, pr: PrNumber) -> HostingResult<String>;
}

/// Free-text classifier, typically an LLM.
///
/// Output is untrusted; callers normalize it before use.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Provider name used in logs.
    fn name(&self) -> &str;

    async fn classify(&self, system: &str, user: &str) -> Result<String, ClassifierError>;
}
