// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;

use super::{LlmProvider, SYSTEM_PROMPT, take_line};
use crate::config::Config;
use crate::error::{Error, Result};

const API_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<SecretString>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    system: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct StreamEvent {
    #[serde(rename = "type")]
    event_type: String,
    delta: Option<ContentDelta>,
    error: Option<StreamError>,
}

#[derive(Deserialize)]
struct ContentDelta {
    text: Option<String>,
}

#[derive(Deserialize)]
struct StreamError {
    message: String,
}

fn provider_error(message: impl Into<String>) -> Error {
    Error::Provider {
        provider: "anthropic".into(),
        message: message.into(),
    }
}

impl AnthropicProvider {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.anthropic_base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config
                .api_key
                .clone()
                .filter(|k| !k.is_empty())
                .map(SecretString::from),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    fn key(&self) -> Result<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret())
            .ok_or_else(|| provider_error("API key not configured (set ANTHROPIC_API_KEY)"))
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn generate(
        &self,
        prompt: &str,
        token_tx: mpsc::Sender<String>,
        cancel: CancellationToken,
    ) -> Result<String> {
        let url = format!("{}/v1/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.key()?)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&MessagesRequest {
                model: &self.model,
                system: SYSTEM_PROMPT,
                messages: vec![Message {
                    role: "user",
                    content: prompt,
                }],
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                stream: true,
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    provider_error("request timed out")
                } else {
                    provider_error(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(provider_error(format!("HTTP {status}: {body}")));
        }

        let mut stream = response.bytes_stream();
        let mut full_response = String::new();
        let mut line_buffer: Vec<u8> = Vec::new();

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    return Err(Error::Cancelled);
                }
                chunk = stream.next() => {
                    let Some(chunk) = chunk else { break };
                    let chunk = chunk.map_err(|e| provider_error(e.to_string()))?;

                    line_buffer.extend_from_slice(&chunk);

                    while let Some(line) = take_line(&mut line_buffer) {
                        // SSE: "event: <type>" lines are followed by "data: <json>"
                        let Some(data) = line.strip_prefix("data: ") else {
                            continue;
                        };

                        let Ok(event) = serde_json::from_str::<StreamEvent>(data) else {
                            continue;
                        };

                        match event.event_type.as_str() {
                            "content_block_delta" => {
                                if let Some(text) = event.delta.and_then(|d| d.text) {
                                    let _ = token_tx.send(text.clone()).await;
                                    full_response.push_str(&text);
                                }
                            }
                            "message_stop" => {
                                return Ok(full_response.trim().to_string());
                            }
                            "error" => {
                                let message = event
                                    .error
                                    .map(|e| e.message)
                                    .unwrap_or_else(|| "stream error".into());
                                return Err(provider_error(message));
                            }
                            _ => {}
                        }
                    }
                }
            }
        }

        Ok(full_response.trim().to_string())
    }

    async fn verify(&self) -> Result<()> {
        // No cheap authenticated endpoint; a present key is the best local check
        self.key().map(|_| ())
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}
