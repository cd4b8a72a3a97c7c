//! Label reconciliation: one active label per category.
//!
//! Order on the store:
//! 1. `remove_label` for every member of the category (concurrently). Each
//!    failure is logged and dropped; none of them stop the others.
//! 2. `add_labels` with the chosen label. A failure here is returned.
//!
//! Removing first means the PR never shows two labels of one category; it may
//! briefly show none.

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::category::LabelCategory;
use crate::collaborators::{LabelStore, PrNumber};
use crate::error::HostingResult;

/// Store operations needed to make `add` the only active label of its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPlan {
    pub remove: Vec<&'static str>,
    pub add: &'static str,
}

impl LabelPlan {
    pub fn for_label<C: LabelCategory>(chosen: C) -> Self {
        Self {
            remove: C::all_labels(),
            add: chosen.label(),
        }
    }
}

/// What a successful reconciliation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Label now active for the category.
    pub applied: &'static str,

    /// Removal attempts that failed and were ignored.
    pub removal_failures: usize,
}

/// Make `chosen` the single active label of its category on `pr`.
pub async fn reconcile<C: LabelCategory>(
    store: &dyn LabelStore,
    pr: PrNumber,
    chosen: C,
) -> HostingResult<Reconciliation> {
    let plan = LabelPlan::for_label(chosen);

    let removals = plan.remove.iter().map(|label| async move {
        (*label, store.remove_label(pr, label).await)
    });

    let mut removal_failures = 0;
    for (label, outcome) in join_all(removals).await {
        match outcome {
            Ok(()) => debug!("Removed label '{}' from PR {}", label, pr),
            Err(e) if e.is_not_found() => {
                removal_failures += 1;
                debug!("Label '{}' not on PR {} (nothing to remove)", label, pr);
            }
            Err(e) => {
                removal_failures += 1;
                warn!("Ignoring failed removal of '{}' from PR {}: {}", label, pr, e);
            }
        }
    }

    store.add_labels(pr, &[plan.add.to_string()]).await?;
    info!(category = C::NAME, label = plan.add, "Reconciled labels on PR {}", pr);

    Ok(Reconciliation {
        applied: plan.add,
        removal_failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostingError;
    use crate::fakes::{MemoryLabelStore, StoreCall};
    use crate::pr_type::TypeLabel;
    use crate::size::SizeLabel;

    const PR: PrNumber = PrNumber(7);

    fn category_labels<C: LabelCategory>(store: &MemoryLabelStore) -> Vec<String> {
        let all = C::all_labels();
        store
            .labels(PR)
            .into_iter()
            .filter(|l| all.contains(&l.as_str()))
            .collect()
    }

    #[test]
    fn test_plan_removes_whole_category() {
        let plan = LabelPlan::for_label(SizeLabel::M);
        assert_eq!(plan.remove.len(), 6);
        assert!(plan.remove.contains(&"size/M"));
        assert_eq!(plan.add, "size/M");
    }

    #[tokio::test]
    async fn test_no_prior_labels() {
        let store = MemoryLabelStore::new();
        let result = reconcile(&store, PR, SizeLabel::XL).await.unwrap();

        assert_eq!(result.applied, "size/XL");
        assert_eq!(result.removal_failures, 6);
        assert_eq!(category_labels::<SizeLabel>(&store), vec!["size/XL"]);
    }

    #[tokio::test]
    async fn test_one_stale_label_replaced() {
        let store = MemoryLabelStore::with_labels(PR, &["size/S", "needs-review"]);
        reconcile(&store, PR, SizeLabel::L).await.unwrap();

        assert_eq!(category_labels::<SizeLabel>(&store), vec!["size/L"]);
        assert!(store.labels(PR).contains(&"needs-review".to_string()));
    }

    #[tokio::test]
    async fn test_all_prior_labels_present() {
        let all = TypeLabel::all_labels();
        let store = MemoryLabelStore::with_labels(PR, &all);
        let result = reconcile(&store, PR, TypeLabel::Docs).await.unwrap();

        assert_eq!(result.removal_failures, 0);
        assert_eq!(category_labels::<TypeLabel>(&store), vec!["type/docs"]);
    }

    #[tokio::test]
    async fn test_removals_precede_addition() {
        let store = MemoryLabelStore::with_labels(PR, &["type/fix"]);
        reconcile(&store, PR, TypeLabel::Fix).await.unwrap();

        let calls = store.calls();
        assert_eq!(calls.len(), 7);
        assert!(calls[..6]
            .iter()
            .all(|c| matches!(c, StoreCall::Remove { .. })));
        assert_eq!(
            calls[6],
            StoreCall::Add {
                pr: PR,
                labels: vec!["type/fix".to_string()]
            }
        );
    }

    #[tokio::test]
    async fn test_removal_failure_tolerated() {
        let store = MemoryLabelStore::with_labels(PR, &["size/XS", "size/M"]);
        store.fail_removal_of(
            "size/XS",
            HostingError::Api {
                status: 500,
                message: "boom".to_string(),
            },
        );

        let result = reconcile(&store, PR, SizeLabel::XXL).await.unwrap();

        assert_eq!(result.removal_failures, 5);
        let labels = category_labels::<SizeLabel>(&store);
        assert!(labels.contains(&"size/XXL".to_string()));
        assert!(!labels.contains(&"size/M".to_string()));
        // the failed removal leaves its label behind; nothing else does
        assert_eq!(labels.len(), 2);
    }

    #[tokio::test]
    async fn test_addition_failure_propagates() {
        let store = MemoryLabelStore::with_labels(PR, &["size/S"]);
        store.fail_additions(HostingError::Api {
            status: 403,
            message: "forbidden".to_string(),
        });

        let err = reconcile(&store, PR, SizeLabel::M).await.unwrap_err();

        assert_eq!(
            err,
            HostingError::Api {
                status: 403,
                message: "forbidden".to_string()
            }
        );
        assert!(category_labels::<SizeLabel>(&store).is_empty());
    }
}
