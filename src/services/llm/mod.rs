// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub mod anthropic;
pub mod ollama;

use crate::config::{Config, Provider};
use crate::error::Result;

const SYSTEM_PROMPT: &str = "You review groups of upstream API change reports for a client SDK team. \
Decide which groups describe the same logical change and what the SDK team has to do. \
Answer with a single JSON object and nothing else.";

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate with streaming tokens and cancellation support
    async fn generate(
        &self,
        prompt: &str,
        token_tx: mpsc::Sender<String>,
        cancel: CancellationToken,
    ) -> Result<String>;

    /// Cheap check that the provider is usable before any prompt is sent.
    async fn verify(&self) -> Result<()>;

    fn name(&self) -> &str;
}

/// Pop the next complete line from a byte buffer fed by network chunks.
///
/// Bytes are decoded only once the `\n` has arrived, so a multi-byte
/// character split across chunks stays intact.
pub fn take_line(buffer: &mut Vec<u8>) -> Option<String> {
    let newline_pos = buffer.iter().position(|&b| b == b'\n')?;
    let line: Vec<u8> = buffer.drain(..=newline_pos).collect();
    Some(String::from_utf8_lossy(&line).trim().to_string())
}

pub fn create_provider(config: &Config) -> Result<Box<dyn LlmProvider>> {
    match config.provider {
        Provider::Anthropic => Ok(Box::new(anthropic::AnthropicProvider::new(config))),
        Provider::Ollama => Ok(Box::new(ollama::OllamaProvider::new(config))),
    }
}
