//! prlabel LLM - classifier bindings
//!
//! Two providers implement `prlabel_core::Classifier`:
//! - `OpenAiClassifier`: chat completions, system + user messages
//! - `AnthropicClassifier`: messages API, top-level system instruction
//!
//! Both return the model's text trimmed and lowercased, or `"chore"` when the
//! response carries no text. Non-success statuses become
//! `ClassifierError::Status`.

pub mod anthropic;
pub mod openai;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use prlabel_core::{Classifier, ClassifierError};

pub use anthropic::AnthropicClassifier;
pub use openai::OpenAiClassifier;

/// Model output budget; a single label fits easily.
pub const MAX_TOKENS: u32 = 20;

/// Answer used when a response parses but holds no text.
pub const FALLBACK_ANSWER: &str = "chore";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Supported LLM providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Anthropic,
}

impl Provider {
    /// Human-readable name used in error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Anthropic => "Anthropic",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::OpenAi => write!(f, "openai"),
            Provider::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "anthropic" => Ok(Provider::Anthropic),
            other => Err(format!(
                "unsupported provider '{}' (expected 'openai' or 'anthropic')",
                other
            )),
        }
    }
}

/// Settings shared by both provider bindings.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub provider: Provider,
    pub model: String,
    pub api_key: String,
    /// Override of the provider's API root (proxies, tests).
    pub base_url: Option<String>,
}

impl ClassifierConfig {
    pub fn new(provider: Provider, model: &str, api_key: &str) -> Self {
        ClassifierConfig {
            provider,
            model: model.to_string(),
            api_key: api_key.to_string(),
            base_url: None,
        }
    }

    /// Point the client at another API root
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.trim_end_matches('/').to_string());
        self
    }
}

/// Build the classifier binding selected by `config.provider`.
pub fn classifier_for(config: ClassifierConfig) -> Result<Arc<dyn Classifier>, ClassifierError> {
    Ok(match config.provider {
        Provider::OpenAi => Arc::new(OpenAiClassifier::new(config)?),
        Provider::Anthropic => Arc::new(AnthropicClassifier::new(config)?),
    })
}

fn http_client(provider: Provider) -> Result<reqwest::Client, ClassifierError> {
    reqwest::Client::builder()
        .user_agent(concat!("prlabel/", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| ClassifierError::Transport {
            provider: provider.display_name().to_string(),
            message: e.to_string(),
        })
}

/// Send a prepared request and decode the JSON body as `T`.
async fn send_json<T: serde::de::DeserializeOwned>(
    provider: Provider,
    request: reqwest::RequestBuilder,
) -> Result<T, ClassifierError> {
    let name = provider.display_name();
    let response = request
        .send()
        .await
        .map_err(|e| ClassifierError::Transport {
            provider: name.to_string(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ClassifierError::Status {
            provider: name.to_string(),
            status: status.as_u16(),
        });
    }

    response.json::<T>().await.map_err(|e| ClassifierError::Decode {
        provider: name.to_string(),
        message: e.to_string(),
    })
}

/// Trim and lowercase model text; missing or blank text becomes the fallback.
fn finish(text: Option<String>) -> String {
    match text.map(|t| t.trim().to_lowercase()) {
        Some(t) if !t.is_empty() => t,
        _ => FALLBACK_ANSWER.to_string(),
    }
}
