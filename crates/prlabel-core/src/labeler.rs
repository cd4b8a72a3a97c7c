//! Labeler orchestrator.
//!
//! Runs the enabled categories for one PR snapshot, size first, then type.
//! The first failure ends the run; labels already reconciled stay applied.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use crate::category::LabelCategory;
use crate::collaborators::{Classifier, DiffSource, LabelStore, PrNumber, PullRequest};
use crate::error::{LabelerError, Result};
use crate::pr_type::{normalize_type, TypeLabel};
use crate::prompt::{build_user_prompt, SYSTEM_PROMPT};
use crate::reconcile::reconcile;
use crate::size::SizeLabel;

/// Which categories a run applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelerOptions {
    pub size_labels: bool,
    pub type_labels: bool,
}

impl Default for LabelerOptions {
    fn default() -> Self {
        Self {
            size_labels: true,
            type_labels: true,
        }
    }
}

/// Labels applied by a run (`None` for a disabled category).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelOutcome {
    pub size: Option<SizeLabel>,
    #[serde(rename = "type")]
    pub kind: Option<TypeLabel>,
}

/// Applies size and type labels to pull requests.
pub struct Labeler {
    store: Arc<dyn LabelStore>,
    diffs: Arc<dyn DiffSource>,
    classifier: Arc<dyn Classifier>,
    options: LabelerOptions,
}

impl Labeler {
    pub fn new(
        store: Arc<dyn LabelStore>,
        diffs: Arc<dyn DiffSource>,
        classifier: Arc<dyn Classifier>,
        options: LabelerOptions,
    ) -> Self {
        Self {
            store,
            diffs,
            classifier,
            options,
        }
    }

    /// Label `pr` for every enabled category.
    #[instrument(skip(self, pr), fields(pr = %pr.number))]
    pub async fn run(&self, pr: &PullRequest) -> Result<LabelOutcome> {
        let mut outcome = LabelOutcome::default();

        if self.options.size_labels {
            let size = pr.volume().size();
            self.apply(pr.number, size).await?;
            info!("Applied size label: {}", size);
            outcome.size = Some(size);
        }

        if self.options.type_labels {
            let kind = self.classify(pr).await?;
            self.apply(pr.number, kind).await?;
            info!("Applied type label: {}", kind);
            outcome.kind = Some(kind);
        }

        Ok(outcome)
    }

    /// Fetch the diff, ask the classifier, normalize its answer.
    pub async fn classify(&self, pr: &PullRequest) -> Result<TypeLabel> {
        let diff = self
            .diffs
            .fetch_diff(pr.number)
            .await
            .map_err(|cause| LabelerError::Diff {
                pr: pr.number,
                cause,
            })?;

        let user = build_user_prompt(&pr.title, &diff);
        let raw = self.classifier.classify(SYSTEM_PROMPT, &user).await?;
        let kind = normalize_type(&raw);
        info!(
            classifier = self.classifier.name(),
            raw = %raw.trim(),
            "Classified PR {} as {}",
            pr.number,
            kind.name()
        );
        Ok(kind)
    }

    async fn apply<C: LabelCategory>(&self, pr: PrNumber, chosen: C) -> Result<()> {
        reconcile(self.store.as_ref(), pr, chosen)
            .await
            .map(|_| ())
            .map_err(|cause| LabelerError::LabelAddition {
                label: chosen.label().to_string(),
                pr,
                cause,
            })
    }
}
