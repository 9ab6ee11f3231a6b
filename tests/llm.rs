// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

//! Provider tests against mocked HTTP endpoints.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sdkwatch::config::{Config, Provider};
use sdkwatch::error::Error;
use sdkwatch::services::llm::anthropic::AnthropicProvider;
use sdkwatch::services::llm::ollama::OllamaProvider;
use sdkwatch::services::llm::{LlmProvider, create_provider, take_line};

// ─── Test helpers ────────────────────────────────────────────────────────────

fn ollama_config(server_url: &str) -> Config {
    Config {
        provider: Provider::Ollama,
        model: "qwen3:4b".into(),
        ollama_host: server_url.to_string(),
        timeout_secs: 5,
        ..Config::default()
    }
}

fn anthropic_config(server_url: &str) -> Config {
    Config {
        provider: Provider::Anthropic,
        anthropic_base_url: server_url.to_string(),
        api_key: Some("test-key".into()),
        timeout_secs: 5,
        ..Config::default()
    }
}

async fn drain_tokens(mut rx: mpsc::Receiver<String>) -> Vec<String> {
    let mut tokens = Vec::new();
    while let Some(tok) = rx.recv().await {
        tokens.push(tok);
    }
    tokens
}

#[test]
fn factory_picks_provider() {
    let config = Config::default();
    assert_eq!(create_provider(&config).unwrap().name(), "anthropic");

    let config = ollama_config("http://localhost:11434");
    assert_eq!(create_provider(&config).unwrap().name(), "ollama");
}

#[test]
fn line_buffer_keeps_split_characters() {
    let line = "data: {\"text\":\"café ✓\"}\n".as_bytes();
    // Split inside the two-byte 'é'
    let split = line.iter().position(|&b| b == 0xC3).unwrap() + 1;

    let mut buffer = line[..split].to_vec();
    assert_eq!(take_line(&mut buffer), None);

    buffer.extend_from_slice(&line[split..]);
    let decoded = take_line(&mut buffer).unwrap();
    assert_eq!(decoded, "data: {\"text\":\"café ✓\"}");
    assert!(!decoded.contains('\u{FFFD}'));
    assert!(buffer.is_empty());
}

#[test]
fn line_buffer_leaves_partial_tail() {
    let mut buffer = b"first\r\nsecond\npart".to_vec();
    assert_eq!(take_line(&mut buffer).as_deref(), Some("first"));
    assert_eq!(take_line(&mut buffer).as_deref(), Some("second"));
    assert_eq!(take_line(&mut buffer), None);
    assert_eq!(buffer, b"part");
}

// ─── Ollama ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ollama_health_check_lists_models() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [{"name": "qwen3:4b"}, {"name": "llama3:latest"}]
        })))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(&ollama_config(&server.uri()));
    let models = provider.health_check().await.unwrap();
    assert_eq!(models, vec!["qwen3:4b", "llama3:latest"]);
}

#[tokio::test]
async fn ollama_model_matches_without_tag() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [{"name": "llama3:latest"}]
        })))
        .mount(&server)
        .await;

    let config = Config {
        model: "llama3".into(),
        ..ollama_config(&server.uri())
    };
    OllamaProvider::new(&config).verify().await.unwrap();
}

#[tokio::test]
async fn ollama_model_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [{"name": "llama3:8b"}]
        })))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(&ollama_config(&server.uri()));
    match provider.verify_model().await {
        Err(Error::ModelNotFound { model, available }) => {
            assert_eq!(model, "qwen3:4b");
            assert_eq!(available, vec!["llama3:8b"]);
        }
        other => panic!("expected ModelNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn ollama_not_running() {
    let provider = OllamaProvider::new(&ollama_config("http://127.0.0.1:1"));
    assert!(matches!(
        provider.health_check().await,
        Err(Error::OllamaNotRunning { .. })
    ));
}

#[tokio::test]
async fn ollama_streams_ndjson() {
    let server = MockServer::start().await;

    let body = [
        r#"{"response":"{\"recommendations\":","done":false}"#,
        r#"{"response":" []}","done":false}"#,
        r#"{"response":"","done":true}"#,
        r#"{"response":"ignored","done":false}"#,
    ]
    .join("\n");

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(serde_json::json!({
            "model": "qwen3:4b",
            "stream": true,
            "format": "json"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(&ollama_config(&server.uri()));
    let (tx, rx) = mpsc::channel(32);
    let result = provider
        .generate("prompt", tx, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result, r#"{"recommendations": []}"#);
    let tokens = drain_tokens(rx).await;
    assert_eq!(tokens.len(), 3);
}

#[tokio::test]
async fn ollama_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(&ollama_config(&server.uri()));
    let (tx, _rx) = mpsc::channel(32);
    match provider.generate("prompt", tx, CancellationToken::new()).await {
        Err(Error::Provider { provider, message }) => {
            assert_eq!(provider, "ollama");
            assert!(message.contains("500"), "message: {message}");
            assert!(message.contains("boom"));
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

// ─── Anthropic ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn anthropic_streams_sse() {
    let server = MockServer::start().await;

    let body = [
        "event: message_start",
        r#"data: {"type":"message_start","message":{"id":"msg_1"}}"#,
        "",
        "event: content_block_delta",
        r#"data: {"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"{\"analysis\":"}}"#,
        "",
        "event: ping",
        r#"data: {"type":"ping"}"#,
        "",
        "event: content_block_delta",
        r#"data: {"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":" \"ok\"}"}}"#,
        "",
        "event: message_stop",
        r#"data: {"type":"message_stop"}"#,
        "",
    ]
    .join("\n");

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(serde_json::json!({
            "model": "claude-sonnet-4-20250514",
            "stream": true,
            "max_tokens": 4096
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let provider = AnthropicProvider::new(&anthropic_config(&server.uri()));
    let (tx, rx) = mpsc::channel(32);
    let result = provider
        .generate("prompt", tx, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result, r#"{"analysis": "ok"}"#);
    assert_eq!(drain_tokens(rx).await.len(), 2);
}

#[tokio::test]
async fn anthropic_stream_error_event() {
    let server = MockServer::start().await;

    let body = [
        "event: error",
        r#"data: {"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#,
        "",
    ]
    .join("\n");

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let provider = AnthropicProvider::new(&anthropic_config(&server.uri()));
    let (tx, _rx) = mpsc::channel(32);
    match provider.generate("prompt", tx, CancellationToken::new()).await {
        Err(Error::Provider { message, .. }) => assert_eq!(message, "Overloaded"),
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn anthropic_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid x-api-key"))
        .mount(&server)
        .await;

    let provider = AnthropicProvider::new(&anthropic_config(&server.uri()));
    let (tx, _rx) = mpsc::channel(32);
    match provider.generate("prompt", tx, CancellationToken::new()).await {
        Err(Error::Provider { provider, message }) => {
            assert_eq!(provider, "anthropic");
            assert!(message.contains("401"));
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn anthropic_missing_key() {
    let config = Config {
        api_key: None,
        ..Config::default()
    };
    let provider = AnthropicProvider::new(&config);

    match provider.verify().await {
        Err(Error::Provider { provider, message }) => {
            assert_eq!(provider, "anthropic");
            assert!(message.contains("ANTHROPIC_API_KEY"));
        }
        other => panic!("expected provider error, got {other:?}"),
    }

    let (tx, _rx) = mpsc::channel(32);
    assert!(
        provider
            .generate("prompt", tx, CancellationToken::new())
            .await
            .is_err()
    );
}
