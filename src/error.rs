// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Not a git repository: {}", path.display())]
    #[diagnostic(
        code(sdkwatch::git::not_repo),
        help("Point --repo-path at a checkout of the upstream repository")
    )]
    NotAGitRepo { path: PathBuf },

    #[error("Git error: {0}")]
    #[diagnostic(code(sdkwatch::git::error))]
    Git(String),

    #[error("Nothing to analyze")]
    #[diagnostic(
        code(sdkwatch::analyze::no_range),
        help("Pass a commit or range (abc123, HEAD~5..HEAD) or use --since <commit>")
    )]
    MissingRange,

    #[error("Input directory not found: {}", path.display())]
    #[diagnostic(
        code(sdkwatch::cluster::no_input),
        help("Generate reports first with: sdkwatch analyze --since <commit> --sdk-details --output-dir <dir>")
    )]
    InputDirMissing { path: PathBuf },

    #[error("No {kind} named '{id}' in the state file")]
    #[diagnostic(code(sdkwatch::state::not_found))]
    NotTracked { kind: String, id: String },

    #[error("State file {} does not match the expected layout: {message}", path.display())]
    #[diagnostic(
        code(sdkwatch::state::invalid),
        help("Fix the entry by hand or pass a different --state-file; it was left untouched")
    )]
    StateFile { path: PathBuf, message: String },

    #[error("Nothing to mark")]
    #[diagnostic(
        code(sdkwatch::state::no_target),
        help("Specify --report <file> or --cluster <id>")
    )]
    NoMarkTarget,

    #[error("GitHub API error ({status}): {message}")]
    #[diagnostic(
        code(sdkwatch::github::error),
        help("Check the repository name and set GITHUB_TOKEN for private repositories")
    )]
    GitHub { status: u16, message: String },

    #[error("Provider '{provider}' error: {message}")]
    #[diagnostic(code(sdkwatch::provider::error))]
    Provider { provider: String, message: String },

    #[error("Cannot connect to Ollama at {host}")]
    #[diagnostic(
        code(sdkwatch::ollama::not_running),
        help("Start Ollama with: ollama serve")
    )]
    OllamaNotRunning { host: String },

    #[error("Model '{model}' not found. Available: {}", available.join(", "))]
    #[diagnostic(
        code(sdkwatch::ollama::model_not_found),
        help("Pull the model with: ollama pull {model}")
    )]
    ModelNotFound {
        model: String,
        available: Vec<String>,
    },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(sdkwatch::config::error))]
    Config(String),

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
