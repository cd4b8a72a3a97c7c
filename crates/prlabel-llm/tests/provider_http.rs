//! HTTP contract tests for the provider bindings against a mock server.

use prlabel_core::{build_user_prompt, Classifier, ClassifierError, SYSTEM_PROMPT};
use prlabel_llm::{classifier_for, ClassifierConfig, Provider};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn config(provider: Provider, server: &MockServer, api_key: &str) -> ClassifierConfig {
    let model = match provider {
        Provider::OpenAi => "gpt-4o-mini",
        Provider::Anthropic => "claude-3-haiku",
    };
    ClassifierConfig::new(provider, model, api_key).with_base_url(&server.uri())
}

fn body_of(request: &Request) -> Value {
    serde_json::from_slice(&request.body).expect("request body is JSON")
}

#[tokio::test]
async fn openai_returns_first_choice_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "feature" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let classifier = classifier_for(config(Provider::OpenAi, &server, "test")).unwrap();
    let user = build_user_prompt("Add new login flow", "diff content");
    let answer = classifier.classify(SYSTEM_PROMPT, &user).await.unwrap();

    assert_eq!(answer, "feature");

    let requests = server.received_requests().await.unwrap();
    let body = body_of(&requests[0]);
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["temperature"], 0.0);
    assert_eq!(body["max_tokens"], 20);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
    assert_eq!(body["messages"][1]["role"], "user");
    assert!(body["messages"][1]["content"]
        .as_str()
        .unwrap()
        .contains("Add new login flow"));
}

#[tokio::test]
async fn openai_without_content_answers_chore() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [{}] })))
        .mount(&server)
        .await;

    let classifier = classifier_for(config(Provider::OpenAi, &server, "test")).unwrap();
    let answer = classifier.classify(SYSTEM_PROMPT, "PR title: Fix stuff").await.unwrap();

    assert_eq!(answer, "chore");
}

#[tokio::test]
async fn openai_answer_is_trimmed_and_lowercased() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "  Refactor\n" } }]
        })))
        .mount(&server)
        .await;

    let classifier = classifier_for(config(Provider::OpenAi, &server, "test")).unwrap();
    let answer = classifier.classify(SYSTEM_PROMPT, "PR title: Split module").await.unwrap();

    assert_eq!(answer, "refactor");
}

#[tokio::test]
async fn openai_error_status_names_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let classifier = classifier_for(config(Provider::OpenAi, &server, "bad")).unwrap();
    let err = classifier.classify(SYSTEM_PROMPT, "Title").await.unwrap_err();

    assert_eq!(
        err,
        ClassifierError::Status {
            provider: "OpenAI".to_string(),
            status: 401
        }
    );
    assert_eq!(err.to_string(), "OpenAI error: 401");
}

#[tokio::test]
async fn openai_user_content_carries_truncated_diff() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "docs" } }]
        })))
        .mount(&server)
        .await;

    let classifier = classifier_for(config(Provider::OpenAi, &server, "test")).unwrap();
    let user = build_user_prompt("Update README", &"x".repeat(5000));
    classifier.classify(SYSTEM_PROMPT, &user).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = body_of(&requests[0]);
    let content = body["messages"][1]["content"].as_str().unwrap();
    assert!(content.contains(&"x".repeat(3000)));
    assert!(content.len() <= 3500);
}

#[tokio::test]
async fn anthropic_returns_first_content_block() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{ "type": "text", "text": "fix" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let classifier = classifier_for(config(Provider::Anthropic, &server, "test")).unwrap();
    let answer = classifier
        .classify(SYSTEM_PROMPT, "PR title: Fix null pointer")
        .await
        .unwrap();

    assert_eq!(answer, "fix");

    let requests = server.received_requests().await.unwrap();
    let body = body_of(&requests[0]);
    assert_eq!(body["model"], "claude-3-haiku");
    assert_eq!(body["max_tokens"], 20);
    assert_eq!(body["system"], SYSTEM_PROMPT);
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "PR title: Fix null pointer");
}

#[tokio::test]
async fn anthropic_empty_content_answers_chore() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
        .mount(&server)
        .await;

    let classifier = classifier_for(config(Provider::Anthropic, &server, "test")).unwrap();
    let answer = classifier.classify(SYSTEM_PROMPT, "Title").await.unwrap();

    assert_eq!(answer, "chore");
}

#[tokio::test]
async fn anthropic_error_status_names_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let classifier = classifier_for(config(Provider::Anthropic, &server, "bad")).unwrap();
    let err = classifier.classify(SYSTEM_PROMPT, "Title").await.unwrap_err();

    assert_eq!(err.to_string(), "Anthropic error: 403");
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let classifier = classifier_for(config(Provider::Anthropic, &server, "test")).unwrap();
    let err = classifier.classify(SYSTEM_PROMPT, "Title").await.unwrap_err();

    assert!(matches!(err, ClassifierError::Decode { .. }));
}
