// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Unknown,
}

impl ChangeStatus {
    /// Parse a `git diff --name-status` code. Similarity scores are ignored (`R100` -> renamed).
    pub fn from_git_code(code: &str) -> Self {
        match code.chars().next() {
            Some('A') => Self::Added,
            Some('M') => Self::Modified,
            Some('D') => Self::Deleted,
            Some('R') => Self::Renamed,
            _ => Self::Unknown,
        }
    }

    /// Parse a GitHub REST API file status.
    pub fn from_github(status: &str) -> Self {
        match status {
            "added" => Self::Added,
            "modified" | "changed" => Self::Modified,
            "removed" => Self::Deleted,
            "renamed" => Self::Renamed,
            _ => Self::Unknown,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Added => "🆕",
            Self::Modified => "📝",
            Self::Deleted => "🗑️",
            Self::Renamed => "📋",
            Self::Unknown => "❓",
        }
    }

    /// Added or modified files still have content worth inspecting.
    pub fn has_content(&self) -> bool {
        matches!(self, Self::Added | Self::Modified)
    }
}

/// A commit that touched a file within the analyzed range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    pub hash: String,
    pub message: String,
}

impl CommitRef {
    pub fn short(&self) -> &str {
        short_sha(&self.hash, 8)
    }
}

#[derive(Debug, Clone)]
pub struct FileChange {
    pub path: String,
    pub old_path: Option<String>,
    pub status: ChangeStatus,
    pub additions: usize,
    pub deletions: usize,
    pub commits: Vec<CommitRef>,
    /// Inline patch as returned by the GitHub API; local analysis fetches diffs on demand.
    pub patch: Option<String>,
}

impl FileChange {
    pub fn new(path: impl Into<String>, status: ChangeStatus) -> Self {
        Self {
            path: path.into(),
            old_path: None,
            status,
            additions: 0,
            deletions: 0,
            commits: Vec::new(),
            patch: None,
        }
    }

    pub fn total_changes(&self) -> usize {
        self.additions + self.deletions
    }

    /// Commit attribution suffix: ` [abcdef12]` or ` [3 commits]`.
    pub fn commit_str(&self) -> String {
        match self.commits.as_slice() {
            [] => String::new(),
            [only] => format!(" [{}]", only.short()),
            many => format!(" [{} commits]", many.len()),
        }
    }

    /// `- 📝 `path` (+3/-1) [abcdef12]`
    pub fn list_line(&self) -> String {
        format!(
            "- {} `{}` (+{}/-{}){}",
            self.status.icon(),
            self.path,
            self.additions,
            self.deletions,
            self.commit_str()
        )
    }
}

/// Truncate a hash to `len` characters without panicking on short input.
pub fn short_sha(hash: &str, len: usize) -> &str {
    match hash.char_indices().nth(len) {
        Some((idx, _)) => &hash[..idx],
        None => hash,
    }
}

/// Truncate to `max` characters, appending `...` when anything was cut.
pub fn ellipsize(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
