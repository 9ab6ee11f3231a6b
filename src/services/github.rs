// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::domain::{Category, ChangeStatus, FileChange};
use crate::error::{Error, Result};
use crate::services::classifier::{Classifier, service_name};

const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Clone, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    pub commit: CommitInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitInfo {
    pub message: String,
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
}

impl CommitSummary {
    pub fn subject(&self) -> &str {
        self.commit.message.lines().next().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetails {
    pub sha: String,
    #[serde(default)]
    pub files: Vec<CommitFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitFile {
    pub filename: String,
    pub status: String,
    #[serde(default)]
    pub additions: usize,
    #[serde(default)]
    pub deletions: usize,
    #[serde(default)]
    pub patch: Option<String>,
}

#[derive(Deserialize)]
struct CompareResponse {
    #[serde(default)]
    commits: Vec<CommitSummary>,
}

/// Minimal GitHub REST client for reading commits of one repository.
pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: Option<SecretString>,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("sdkwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_url: config.github.api_url.trim_end_matches('/').to_string(),
            token: config.github.token.clone().map(SecretString::from),
        }
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}/{endpoint}", self.api_url);
        tracing::debug!(%url, "github request");

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHub {
                status,
                message: github_message(&body),
            });
        }

        Ok(response.json().await?)
    }

    /// The `count` most recent commits on the default branch, newest first.
    pub async fn recent_commits(&self, repo: &str, count: u32) -> Result<Vec<CommitSummary>> {
        self.get(&format!("repos/{repo}/commits?per_page={count}"))
            .await
    }

    /// Commits after `since` up to HEAD, newest first.
    pub async fn commits_since(&self, repo: &str, since: &str) -> Result<Vec<CommitSummary>> {
        let compare: CompareResponse = self
            .get(&format!("repos/{repo}/compare/{since}...HEAD"))
            .await?;
        // compare lists oldest first
        let mut commits = compare.commits;
        commits.reverse();
        Ok(commits)
    }

    pub async fn commit_details(&self, repo: &str, sha: &str) -> Result<CommitDetails> {
        self.get(&format!("repos/{repo}/commits/{sha}")).await
    }
}

/// Pull `message` out of a GitHub error body, falling back to the raw text.
fn github_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// A remote commit classified for SDK relevance.
#[derive(Debug, Clone)]
pub struct RemoteCommit {
    pub sha: String,
    pub message: String,
    pub author: String,
    pub date: String,
    pub files: Vec<FileChange>,
    /// SDK-relevant files only.
    pub categories: BTreeMap<Category, Vec<FileChange>>,
    pub services: BTreeSet<String>,
}

impl RemoteCommit {
    pub fn sdk_relevant(&self) -> bool {
        !self.categories.is_empty()
    }

    /// Classify the files of `details`. Without details the commit carries no files.
    pub fn analyze(
        classifier: &Classifier,
        summary: &CommitSummary,
        details: Option<CommitDetails>,
    ) -> Self {
        let author = summary.commit.author.clone();
        let mut commit = Self {
            sha: summary.sha.clone(),
            message: summary.subject().to_string(),
            author: author.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            date: author.map(|a| a.date).unwrap_or_default(),
            files: Vec::new(),
            categories: BTreeMap::new(),
            services: BTreeSet::new(),
        };

        for file in details.map(|d| d.files).unwrap_or_default() {
            let mut change = FileChange::new(file.filename, ChangeStatus::from_github(&file.status));
            change.additions = file.additions;
            change.deletions = file.deletions;
            change.patch = file.patch;

            if let Some(service) = service_name(&change.path) {
                commit.services.insert(service.to_string());
            }

            if let Some(category) = classifier.categorize_sdk(&change.path) {
                commit
                    .categories
                    .entry(category)
                    .or_default()
                    .push(change.clone());
            }

            commit.files.push(change);
        }

        commit
    }
}
