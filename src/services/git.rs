// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tokio::process::Command;

use crate::domain::{ChangeStatus, CommitRef, FileChange};
use crate::error::{Error, Result};

static NUMSTAT_BRACE_RENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)\{[^}]* => ([^}]*)\}(.*)$").unwrap());

/// A revision or revision range as accepted on the command line.
///
/// A bare revision `X` stands for `X^..X`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    raw: String,
    pub before: String,
    pub after: String,
}

impl CommitRange {
    pub fn parse(range: &str) -> Self {
        let (before, after) = if let Some((a, b)) = range.split_once("...") {
            (a.to_string(), b.to_string())
        } else if let Some((a, b)) = range.split_once("..") {
            (a.to_string(), b.to_string())
        } else {
            (format!("{range}^"), range.to_string())
        };

        let after = if after.is_empty() {
            "HEAD".to_string()
        } else {
            after
        };

        Self {
            raw: range.to_string(),
            before,
            after,
        }
    }

    /// Whether the input named a range rather than a single commit.
    pub fn is_range(&self) -> bool {
        self.raw.contains("..")
    }

    /// Argument passed to `git diff` and `git log`.
    pub fn git_arg(&self) -> String {
        if self.is_range() {
            self.raw.clone()
        } else {
            format!("{}..{}", self.before, self.after)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Read-only access to a local checkout through the `git` CLI.
pub struct GitService {
    work_dir: PathBuf,
}

impl GitService {
    pub fn open(path: &Path) -> Result<Self> {
        let repo = gix::discover(path).map_err(|_| Error::NotAGitRepo {
            path: path.to_path_buf(),
        })?;

        let work_dir = repo
            .workdir()
            .ok_or_else(|| Error::Git("Bare repository not supported".into()))?
            .to_path_buf();

        Ok(Self { work_dir })
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        tracing::debug!(?args, "git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Git(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Changed files with status and line counts.
    pub async fn diff_files(&self, range: &CommitRange) -> Result<Vec<FileChange>> {
        let arg = range.git_arg();
        let name_status_args = ["diff", "--name-status", arg.as_str()];
        let numstat_args = ["diff", "--numstat", arg.as_str()];
        let (status, numstat) = tokio::try_join!(
            self.run(&name_status_args),
            self.run(&numstat_args),
        )?;

        let mut changes = parse_name_status(&status);
        let stats = parse_numstat(&numstat);
        for change in &mut changes {
            if let Some((additions, deletions)) = stats.get(&change.path) {
                change.additions = *additions;
                change.deletions = *deletions;
            }
        }

        Ok(changes)
    }

    /// Unified diff of a single file.
    pub async fn file_diff(&self, range: &CommitRange, path: &str) -> Result<String> {
        self.run(&["diff", "--no-ext-diff", &range.git_arg(), "--", path])
            .await
    }

    /// File content at a revision, or `None` when it does not exist there.
    pub async fn show(&self, rev: &str, path: &str) -> Option<String> {
        let output = Command::new("git")
            .args(["show", &format!("{rev}:{path}")])
            .current_dir(&self.work_dir)
            .output()
            .await
            .ok()?;

        if output.status.success() {
            String::from_utf8(output.stdout).ok()
        } else {
            None
        }
    }

    /// Map of path to the commits in `range` that touched it.
    pub async fn file_commits(
        &self,
        range: &CommitRange,
    ) -> Result<HashMap<String, Vec<CommitRef>>> {
        let output = self
            .run(&[
                "log",
                "--name-only",
                "--format=COMMIT:%H|%s",
                &range.git_arg(),
            ])
            .await?;
        Ok(parse_file_commits(&output))
    }

    /// Commits after `since` up to HEAD, newest first.
    pub async fn commits_since(&self, since: &str) -> Result<Vec<CommitRef>> {
        let output = self
            .run(&["log", "--format=%H|%s", &format!("{since}..HEAD")])
            .await?;
        Ok(parse_commit_list(&output))
    }
}

/// Parse `git diff --name-status`. Similarity scores are dropped and renames keep their old path.
pub fn parse_name_status(output: &str) -> Vec<FileChange> {
    let mut changes = Vec::new();

    for line in output.lines() {
        let parts: Vec<&str> = line.split('\t').collect();
        let (code, rest) = match parts.split_first() {
            Some((code, rest)) if !code.is_empty() && !rest.is_empty() => (*code, rest),
            _ => continue,
        };

        let status = ChangeStatus::from_git_code(code);
        let change = match rest {
            [old, new, ..] => {
                let mut change = FileChange::new(*new, status);
                change.old_path = Some(old.to_string());
                change
            }
            [path] => FileChange::new(*path, status),
            [] => continue,
        };
        changes.push(change);
    }

    changes
}

/// Parse `git diff --numstat` into path -> (additions, deletions). Binary files count as zero.
pub fn parse_numstat(output: &str) -> HashMap<String, (usize, usize)> {
    let mut stats = HashMap::new();

    for line in output.lines() {
        let mut parts = line.splitn(3, '\t');
        let (Some(add), Some(del), Some(path)) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };

        let additions = add.parse().unwrap_or(0);
        let deletions = del.parse().unwrap_or(0);
        stats.insert(resolve_rename_path(path), (additions, deletions));
    }

    stats
}

/// Resolve numstat rename notation (`old => new`, `dir/{old => new}/rest`) to the new path.
pub fn resolve_rename_path(path: &str) -> String {
    if !path.contains(" => ") {
        return path.to_string();
    }

    if let Some(caps) = NUMSTAT_BRACE_RENAME.captures(path) {
        let joined = format!("{}{}{}", &caps[1], &caps[2], &caps[3]);
        return joined.replace("//", "/");
    }

    path.split_once(" => ")
        .map(|(_, new)| new.to_string())
        .unwrap_or_else(|| path.to_string())
}

/// Parse `git log --name-only --format=COMMIT:%H|%s`.
pub fn parse_file_commits(output: &str) -> HashMap<String, Vec<CommitRef>> {
    let mut map: HashMap<String, Vec<CommitRef>> = HashMap::new();
    let mut current: Option<CommitRef> = None;

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix("COMMIT:") {
            current = Some(parse_commit_line(header));
        } else if let Some(commit) = &current {
            map.entry(line.to_string())
                .or_default()
                .push(commit.clone());
        }
    }

    map
}

/// Parse `git log --format=%H|%s`, skipping malformed lines.
pub fn parse_commit_list(output: &str) -> Vec<CommitRef> {
    output
        .lines()
        .filter(|l| l.contains('|'))
        .map(parse_commit_line)
        .collect()
}

fn parse_commit_line(line: &str) -> CommitRef {
    match line.split_once('|') {
        Some((hash, message)) => CommitRef {
            hash: hash.trim().to_string(),
            message: message.to_string(),
        },
        None => CommitRef {
            hash: line.trim().to_string(),
            message: String::new(),
        },
    }
}
