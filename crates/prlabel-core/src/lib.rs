//! prlabel Core - label-decision engine
//!
//! Decides which size and type label a pull request should carry and applies
//! them so that exactly one label per category is active:
//! - `classify_size`: line-change volume to a `SizeLabel` bucket
//! - `normalize_type`: untrusted classifier text to a `TypeLabel`
//! - `reconcile`: remove the whole category, then add the chosen label
//! - `Labeler`: runs both categories for one PR snapshot
//!
//! Hosting and LLM integrations plug in through the traits in `collaborators`.
//! In-memory implementations for tests live in `fakes`.

pub mod category;
pub mod collaborators;
pub mod error;
pub mod fakes;
pub mod labeler;
pub mod pr_type;
pub mod prompt;
pub mod reconcile;
pub mod size;
pub mod telemetry;

pub use category::LabelCategory;
pub use collaborators::{Classifier, DiffSource, LabelStore, PrNumber, PullRequest};
pub use error::{ClassifierError, HostingError, HostingResult, LabelerError, Result};
pub use labeler::{LabelOutcome, Labeler, LabelerOptions};
pub use pr_type::{normalize_type, TypeLabel};
pub use prompt::{build_user_prompt, truncate_diff, MAX_DIFF_CHARS, SYSTEM_PROMPT};
pub use reconcile::{reconcile, LabelPlan, Reconciliation};
pub use size::{classify_size, ChangeVolume, SizeLabel};
pub use telemetry::init_tracing;

/// prlabel core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
