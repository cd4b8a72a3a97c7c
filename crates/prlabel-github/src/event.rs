//! GitHub Actions event payload and repository coordinates.

use std::path::Path;
use std::str::FromStr;

use prlabel_core::{LabelerError, PullRequest, Result};
use serde::Deserialize;

/// `owner/repo` pair, as found in `GITHUB_REPOSITORY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl FromStr for Repository {
    type Err = LabelerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Repository {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(LabelerError::Configuration(format!(
                "repository must look like 'owner/repo', got '{}'",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    additions: Option<u64>,
    #[serde(default)]
    deletions: Option<u64>,
}

/// The pull request that triggered the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    pub pull_request: PullRequest,
}

impl PullRequestEvent {
    /// Read the payload file named by `GITHUB_EVENT_PATH`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| LabelerError::Event(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }

    /// Parse a payload. Events without a `pull_request` object are rejected;
    /// missing counts read as 0 and a missing title as empty.
    pub fn from_json(raw: &str) -> Result<Self> {
        let payload: EventPayload =
            serde_json::from_str(raw).map_err(|e| LabelerError::Event(e.to_string()))?;
        let pr = payload
            .pull_request
            .ok_or(LabelerError::NotAPullRequestEvent)?;

        Ok(PullRequestEvent {
            pull_request: PullRequest::new(
                pr.number,
                pr.title.unwrap_or_default(),
                pr.additions.unwrap_or(0),
                pr.deletions.unwrap_or(0),
            ),
        })
    }
}
