//! Anthropic messages binding

use async_trait::async_trait;
use prlabel_core::{Classifier, ClassifierError};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{finish, http_client, send_json, ClassifierConfig, Provider, MAX_TOKENS};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [UserMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Classifier backed by `POST /v1/messages`.
pub struct AnthropicClassifier {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl AnthropicClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassifierError> {
        let base = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            http: http_client(Provider::Anthropic)?,
            endpoint: format!("{}/v1/messages", base),
            model: config.model,
            api_key: config.api_key,
        })
    }
}

#[async_trait]
impl Classifier for AnthropicClassifier {
    fn name(&self) -> &str {
        "anthropic"
    }

    #[instrument(skip_all, fields(model = %self.model))]
    async fn classify(&self, system: &str, user: &str) -> Result<String, ClassifierError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system,
            messages: [UserMessage {
                role: "user",
                content: user,
            }],
        };

        let request = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body);
        let response: MessagesResponse = send_json(Provider::Anthropic, request).await?;

        let text = response
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text);
        debug!("Anthropic answered {:?}", text);
        Ok(finish(text))
    }
}
