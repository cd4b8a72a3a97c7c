//! prlabel GitHub - hosting bindings
//!
//! - `GitHubClient`: `LabelStore` and `DiffSource` over the GitHub REST API
//! - `PullRequestEvent`: PR snapshot read from the Actions event payload
//! - `Repository`: `owner/repo` coordinates

pub mod client;
pub mod event;

pub use client::{GitHubClient, GitHubConfig, DEFAULT_API_URL};
pub use event::{PullRequestEvent, Repository};
