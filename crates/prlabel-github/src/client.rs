//! # GitHub REST client
//!
//! Label and diff operations on a single repository. Removing a label that
//! is not on the PR (404) counts as success.

use std::time::Duration;

use async_trait::async_trait;
use prlabel_core::{DiffSource, HostingError, HostingResult, LabelStore, PrNumber};
use reqwest::{header, Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::event::Repository;

/// Public GitHub API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const DIFF_MEDIA_TYPE: &str = "application/vnd.github.v3.diff";
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";

#[derive(Debug, Deserialize)]
struct GitHubError {
    message: String,
}

/// Connection settings for [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub api_url: String,
    /// Token for the `Authorization` header; empty sends no header.
    pub token: String,
    pub repository: Repository,
}

impl GitHubConfig {
    pub fn new(repository: Repository, token: &str) -> Self {
        GitHubConfig {
            api_url: DEFAULT_API_URL.to_string(),
            token: token.to_string(),
            repository,
        }
    }

    /// Point the client at another API root (GHES, tests)
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }
}

/// GitHub API client for one repository
#[derive(Clone)]
pub struct GitHubClient {
    http_client: HttpClient,
    config: GitHubConfig,
}

impl GitHubClient {
    pub fn new(config: GitHubConfig) -> HostingResult<Self> {
        let http_client = HttpClient::builder()
            .user_agent(concat!("prlabel/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(transport)?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn repository(&self) -> &Repository {
        &self.config.repository
    }

    fn issue_labels_url(&self, pr: PrNumber) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}/labels",
            self.config.api_url, self.config.repository.owner, self.config.repository.name, pr.0
        )
    }

    fn request(&self, method: Method, url: &str, accept: &str) -> RequestBuilder {
        let builder = self
            .http_client
            .request(method, url)
            .header(header::ACCEPT, accept)
            .header("X-GitHub-Api-Version", API_VERSION);
        if self.config.token.is_empty() {
            builder
        } else {
            builder.bearer_auth(&self.config.token)
        }
    }
}

#[async_trait]
impl LabelStore for GitHubClient {
    #[instrument(skip(self), fields(pr = %pr, labels = ?labels))]
    async fn add_labels(&self, pr: PrNumber, labels: &[String]) -> HostingResult<()> {
        if labels.is_empty() {
            return Ok(());
        }

        let body = serde_json::json!({ "labels": labels });
        let response = self
            .request(Method::POST, &self.issue_labels_url(pr), JSON_MEDIA_TYPE)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        if response.status().is_success() {
            info!("Added {} label(s) to PR {}", labels.len(), pr);
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }

    #[instrument(skip(self), fields(pr = %pr, label = %label))]
    async fn remove_label(&self, pr: PrNumber, label: &str) -> HostingResult<()> {
        let url = format!(
            "{}/{}",
            self.issue_labels_url(pr),
            urlencoding::encode(label)
        );
        let response = self
            .request(Method::DELETE, &url, JSON_MEDIA_TYPE)
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            status if status.is_success() => {
                debug!("Removed label '{}' from PR {}", label, pr);
                Ok(())
            }
            StatusCode::NOT_FOUND => {
                debug!("Label '{}' not found on PR {} (already removed)", label, pr);
                Ok(())
            }
            _ => Err(api_error(response).await),
        }
    }
}

#[async_trait]
impl DiffSource for GitHubClient {
    #[instrument(skip(self), fields(pr = %pr))]
    async fn fetch_diff(&self, pr: PrNumber) -> HostingResult<String> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}",
            self.config.api_url, self.config.repository.owner, self.config.repository.name, pr.0
        );
        let response = self
            .request(Method::GET, &url, DIFF_MEDIA_TYPE)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let diff = response.text().await.map_err(transport)?;
        debug!("Fetched {} byte diff for PR {}", diff.len(), pr);
        Ok(diff)
    }
}

fn transport(err: reqwest::Error) -> HostingError {
    HostingError::Transport(err.to_string())
}

/// Turn a non-success response into `HostingError::Api`, preferring GitHub's
/// `message` field over the raw body.
async fn api_error(response: Response) -> HostingError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<GitHubError>(&body) {
        Ok(error) => error.message,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    HostingError::Api {
        status: status.as_u16(),
        message,
    }
}
