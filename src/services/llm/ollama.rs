// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;

use super::{LlmProvider, SYSTEM_PROMPT, take_line};
use crate::config::Config;
use crate::error::{Error, Result};

pub struct OllamaProvider {
    client: Client,
    host: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'a str,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
}

#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

fn provider_error(message: impl Into<String>) -> Error {
    Error::Provider {
        provider: "ollama".into(),
        message: message.into(),
    }
}

impl OllamaProvider {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            // Avoid //api/generate
            host: config.ollama_host.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Names of locally available models.
    pub async fn health_check(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.host);
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map_err(|_| Error::OllamaNotRunning {
                host: self.host.clone(),
            })?;

        if !response.status().is_success() {
            return Err(provider_error(format!(
                "HTTP {} from /api/tags",
                response.status()
            )));
        }

        let tags: TagsResponse = response.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    pub async fn verify_model(&self) -> Result<()> {
        let available = self.health_check().await?;
        let wanted = &self.model;

        // `llama3` matches `llama3:latest`
        let found = available
            .iter()
            .any(|name| name == wanted || name.split(':').next() == Some(wanted.as_str()));

        if found {
            Ok(())
        } else {
            Err(Error::ModelNotFound {
                model: wanted.clone(),
                available,
            })
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn generate(
        &self,
        prompt: &str,
        token_tx: mpsc::Sender<String>,
        cancel: CancellationToken,
    ) -> Result<String> {
        let url = format!("{}/api/generate", self.host);

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                system: SYSTEM_PROMPT,
                prompt,
                stream: true,
                format: "json",
                options: GenerateOptions {
                    temperature: self.temperature,
                    num_predict: self.max_tokens,
                },
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    Error::OllamaNotRunning {
                        host: self.host.clone(),
                    }
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

        // Chunks are not aligned to NDJSON line boundaries
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
                        if line.is_empty() {
                            continue;
                        }

                        if let Ok(resp) = serde_json::from_str::<GenerateResponse>(&line) {
                            let _ = token_tx.send(resp.response.clone()).await;
                            full_response.push_str(&resp.response);

                            if resp.done {
                                return Ok(full_response.trim().to_string());
                            }
                        }
                    }
                }
            }
        }

        if let Ok(resp) = serde_json::from_slice::<GenerateResponse>(line_buffer.trim_ascii()) {
            full_response.push_str(&resp.response);
        }

        Ok(full_response.trim().to_string())
    }

    async fn verify(&self) -> Result<()> {
        self.verify_model().await
    }

    fn name(&self) -> &str {
        "ollama"
    }
}
