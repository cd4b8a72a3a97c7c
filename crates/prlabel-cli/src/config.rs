//! Action inputs and their validation.
//!
//! Every input can come from a flag or from the `INPUT_*` variable GitHub
//! Actions sets for a step's `with:` block. Actions passes unset inputs as
//! empty strings, so blank values are treated as absent throughout.

use std::path::PathBuf;

use clap::Args;
use prlabel_core::{LabelerError, LabelerOptions, Result};
use prlabel_github::{Repository, DEFAULT_API_URL};
use prlabel_llm::{ClassifierConfig, Provider};

/// Model used when the `model` input is blank.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Raw inputs as received from flags or the environment.
#[derive(Args, Debug, Clone, Default)]
pub struct Inputs {
    /// LLM provider: openai or anthropic
    #[arg(long, env = "INPUT_PROVIDER")]
    pub provider: Option<String>,

    /// Model name passed to the provider
    #[arg(long, env = "INPUT_MODEL")]
    pub model: Option<String>,

    /// Provider API key (required)
    #[arg(long = "api-key", env = "INPUT_API-KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Apply size labels ("true" to enable)
    #[arg(long = "size-labels", env = "INPUT_SIZE-LABELS")]
    pub size_labels: Option<String>,

    /// Apply type labels ("true" to enable)
    #[arg(long = "type-labels", env = "INPUT_TYPE-LABELS")]
    pub type_labels: Option<String>,

    /// Token for the GitHub API (falls back to GITHUB_TOKEN)
    #[arg(long = "github-token", env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Path of the triggering event payload
    #[arg(long = "event-path", env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Repository as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// GitHub API root
    #[arg(long = "api-url", env = "GITHUB_API_URL")]
    pub api_url: Option<String>,
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub classifier: ClassifierConfig,
    pub options: LabelerOptions,
    pub github_token: String,
    pub event_path: PathBuf,
    pub repository: Repository,
    pub api_url: String,
}

impl Inputs {
    /// Validate inputs. `env_token` is the `GITHUB_TOKEN` fallback.
    ///
    /// A missing API key is reported before anything else is checked.
    pub fn resolve(self, env_token: Option<String>) -> Result<Settings> {
        let api_key = present(self.api_key).ok_or_else(|| {
            LabelerError::Configuration("Input required and not supplied: api-key".to_string())
        })?;

        let provider = match present(self.provider) {
            Some(raw) => raw
                .parse::<Provider>()
                .map_err(LabelerError::Configuration)?,
            None => Provider::OpenAi,
        };
        let model = present(self.model).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let options = LabelerOptions {
            size_labels: enabled(self.size_labels),
            type_labels: enabled(self.type_labels),
        };

        let event_path = self.event_path.ok_or_else(|| {
            LabelerError::Configuration(
                "GITHUB_EVENT_PATH is not set; run inside a workflow or pass --event-path"
                    .to_string(),
            )
        })?;
        let repository = present(self.repository)
            .ok_or_else(|| {
                LabelerError::Configuration(
                    "GITHUB_REPOSITORY is not set; pass --repository owner/repo".to_string(),
                )
            })?
            .parse::<Repository>()?;

        Ok(Settings {
            classifier: ClassifierConfig::new(provider, &model, &api_key),
            options,
            github_token: present(self.github_token)
                .or_else(|| present(env_token))
                .unwrap_or_default(),
            event_path,
            repository,
            api_url: present(self.api_url).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Boolean inputs default to on; only a case-insensitive "true" keeps them on
/// once a value is given.
fn enabled(value: Option<String>) -> bool {
    match present(value) {
        Some(v) => v.eq_ignore_ascii_case("true"),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> Inputs {
        Inputs {
            api_key: Some("sk-test".to_string()),
            event_path: Some(PathBuf::from("/tmp/event.json")),
            repository: Some("octo/widgets".to_string()),
            ..Inputs::default()
        }
    }

    #[test]
    fn test_defaults() {
        let settings = inputs().resolve(None).unwrap();

        assert_eq!(settings.classifier.provider, Provider::OpenAi);
        assert_eq!(settings.classifier.model, "gpt-4o-mini");
        assert_eq!(settings.classifier.api_key, "sk-test");
        assert_eq!(settings.options, LabelerOptions::default());
        assert_eq!(settings.github_token, "");
        assert_eq!(settings.api_url, "https://api.github.com");
        assert_eq!(settings.repository.to_string(), "octo/widgets");
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        for key in [None, Some(String::new()), Some("  ".to_string())] {
            let err = Inputs {
                api_key: key,
                ..inputs()
            }
            .resolve(None)
            .unwrap_err();
            assert!(matches!(err, LabelerError::Configuration(_)));
            assert!(err.to_string().contains("api-key"));
        }
    }

    #[test]
    fn test_api_key_checked_before_event_context() {
        let err = Inputs::default().resolve(None).unwrap_err();
        assert!(err.to_string().contains("api-key"));
    }

    #[test]
    fn test_blank_inputs_fall_back() {
        let settings = Inputs {
            provider: Some(String::new()),
            model: Some(String::new()),
            size_labels: Some(String::new()),
            ..inputs()
        }
        .resolve(None)
        .unwrap();

        assert_eq!(settings.classifier.provider, Provider::OpenAi);
        assert_eq!(settings.classifier.model, DEFAULT_MODEL);
        assert!(settings.options.size_labels);
    }

    #[test]
    fn test_boolean_inputs() {
        let settings = Inputs {
            size_labels: Some("TRUE".to_string()),
            type_labels: Some("false".to_string()),
            ..inputs()
        }
        .resolve(None)
        .unwrap();
        assert!(settings.options.size_labels);
        assert!(!settings.options.type_labels);

        let settings = Inputs {
            size_labels: Some("yes".to_string()),
            ..inputs()
        }
        .resolve(None)
        .unwrap();
        assert!(!settings.options.size_labels);
    }

    #[test]
    fn test_provider_selection() {
        let settings = Inputs {
            provider: Some("anthropic".to_string()),
            model: Some("claude-3-haiku".to_string()),
            ..inputs()
        }
        .resolve(None)
        .unwrap();
        assert_eq!(settings.classifier.provider, Provider::Anthropic);
        assert_eq!(settings.classifier.model, "claude-3-haiku");

        let err = Inputs {
            provider: Some("gemini".to_string()),
            ..inputs()
        }
        .resolve(None)
        .unwrap_err();
        assert!(err.to_string().contains("unsupported provider"));
    }

    #[test]
    fn test_token_fallback() {
        let settings = inputs().resolve(Some("env-token".to_string())).unwrap();
        assert_eq!(settings.github_token, "env-token");

        let settings = Inputs {
            github_token: Some("input-token".to_string()),
            ..inputs()
        }
        .resolve(Some("env-token".to_string()))
        .unwrap();
        assert_eq!(settings.github_token, "input-token");
    }

    #[test]
    fn test_missing_event_context() {
        let err = Inputs {
            event_path: None,
            ..inputs()
        }
        .resolve(None)
        .unwrap_err();
        assert!(err.to_string().contains("GITHUB_EVENT_PATH"));

        let err = Inputs {
            repository: Some("widgets".to_string()),
            ..inputs()
        }
        .resolve(None)
        .unwrap_err();
        assert!(err.to_string().contains("owner/repo"));
    }
}
