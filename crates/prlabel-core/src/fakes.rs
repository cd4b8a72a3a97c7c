//! In-memory fakes for collaborator traits (testing only)
//!
//! Provides `MemoryLabelStore`, `StaticDiffSource` and `ScriptedClassifier`
//! that satisfy the trait contracts without any network access. Each fake
//! records what it was asked so tests can assert on call order and payloads.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::collaborators::{Classifier, DiffSource, LabelStore, PrNumber};
use crate::error::{ClassifierError, HostingError, HostingResult};

// ---------------------------------------------------------------------------
// MemoryLabelStore
// ---------------------------------------------------------------------------

/// A call received by [`MemoryLabelStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Add { pr: PrNumber, labels: Vec<String> },
    Remove { pr: PrNumber, label: String },
}

#[derive(Debug, Default)]
struct StoreState {
    labels: HashMap<PrNumber, BTreeSet<String>>,
    calls: Vec<StoreCall>,
    failing_removals: HashMap<String, HostingError>,
    failing_additions: Option<HostingError>,
}

/// In-memory label store backed by a `HashMap<PrNumber, BTreeSet<label>>`.
///
/// Removing a label that is not attached returns `HostingError::NotFound`,
/// the way the GitHub API answers 404.
#[derive(Debug, Default)]
pub struct MemoryLabelStore {
    state: Mutex<StoreState>,
}

impl MemoryLabelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with labels on one PR.
    pub fn with_labels(pr: PrNumber, labels: &[&str]) -> Self {
        let store = Self::new();
        store
            .state
            .lock()
            .unwrap()
            .labels
            .insert(pr, labels.iter().map(|l| l.to_string()).collect());
        store
    }

    /// Current labels on `pr`, sorted.
    pub fn labels(&self, pr: PrNumber) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state
            .labels
            .get(&pr)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Every call received so far, in arrival order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Make removal of `label` fail with `error` (label stays attached).
    pub fn fail_removal_of(&self, label: &str, error: HostingError) {
        let mut state = self.state.lock().unwrap();
        state.failing_removals.insert(label.to_string(), error);
    }

    /// Make every `add_labels` call fail with `error`.
    pub fn fail_additions(&self, error: HostingError) {
        self.state.lock().unwrap().failing_additions = Some(error);
    }
}

#[async_trait]
impl LabelStore for MemoryLabelStore {
    async fn add_labels(&self, pr: PrNumber, labels: &[String]) -> HostingResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(StoreCall::Add {
            pr,
            labels: labels.to_vec(),
        });
        if let Some(error) = state.failing_additions.clone() {
            return Err(error);
        }
        state
            .labels
            .entry(pr)
            .or_default()
            .extend(labels.iter().cloned());
        Ok(())
    }

    async fn remove_label(&self, pr: PrNumber, label: &str) -> HostingResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(StoreCall::Remove {
            pr,
            label: label.to_string(),
        });
        if let Some(error) = state.failing_removals.get(label).cloned() {
            return Err(error);
        }
        let removed = state
            .labels
            .get_mut(&pr)
            .map(|set| set.remove(label))
            .unwrap_or(false);
        if removed {
            Ok(())
        } else {
            Err(HostingError::NotFound {
                resource: format!("label '{}' on PR {}", label, pr),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// StaticDiffSource
// ---------------------------------------------------------------------------

/// Diff source returning one fixed answer for every PR.
#[derive(Debug)]
pub struct StaticDiffSource {
    answer: HostingResult<String>,
    fetches: Mutex<Vec<PrNumber>>,
}

impl StaticDiffSource {
    pub fn new(diff: impl Into<String>) -> Self {
        Self {
            answer: Ok(diff.into()),
            fetches: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: HostingError) -> Self {
        Self {
            answer: Err(error),
            fetches: Mutex::new(Vec::new()),
        }
    }

    /// PRs whose diff was requested.
    pub fn fetches(&self) -> Vec<PrNumber> {
        self.fetches.lock().unwrap().clone()
    }
}

#[async_trait]
impl DiffSource for StaticDiffSource {
    async fn fetch_diff(&self, pr: PrNumber) -> HostingResult<String> {
        self.fetches.lock().unwrap().push(pr);
        self.answer.clone()
    }
}

// ---------------------------------------------------------------------------
// ScriptedClassifier
// ---------------------------------------------------------------------------

/// A prompt received by [`ScriptedClassifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Classifier returning one fixed answer and recording every prompt.
#[derive(Debug)]
pub struct ScriptedClassifier {
    answer: Result<String, ClassifierError>,
    prompts: Mutex<Vec<Prompt>>,
}

impl ScriptedClassifier {
    pub fn answering(text: impl Into<String>) -> Self {
        Self {
            answer: Ok(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ClassifierError) -> Self {
        Self {
            answer: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Classifier for ScriptedClassifier {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn classify(&self, system: &str, user: &str) -> Result<String, ClassifierError> {
        self.prompts.lock().unwrap().push(Prompt {
            system: system.to_string(),
            user: user.to_string(),
        });
        self.answer.clone()
    }
}
