// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

//! Recover clustering metadata from per-commit markdown reports.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;

use crate::domain::{Category, ImpactLevel, OpenApiDelta, ReportMetadata, short_sha};
use crate::error::{Error, Result};

static FULL_SHA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Full (?:SHA|hash):\*\* `([0-9a-f]{40})`").unwrap());

static MESSAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*Message:\*\* (.+)").unwrap());

static JIRA_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([A-Z]+-\d+)\]").unwrap());

static CHANGE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- (➕|➖|📝) `([^`]+)`").unwrap());

static PROTO_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+- ((?:➕|➖) `(?:message|rpc) \w+`)").unwrap());

static FILE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:📝|🆕) `([^`]+)`").unwrap());

#[derive(Clone, Copy, PartialEq, Eq)]
enum Block {
    Outside,
    Endpoints,
    Schemas,
}

/// Whether a file in a reports directory is a per-commit report.
pub fn is_commit_report(filename: &str) -> bool {
    filename.ends_with(".md") && !filename.starts_with("00-")
}

/// Parse one report. Summary files (`00-*.md`) yield `None`.
pub fn parse_report(filename: &str, markdown: &str) -> Option<ReportMetadata> {
    if !is_commit_report(filename) {
        return None;
    }

    let stem = filename.strip_suffix(".md").unwrap_or(filename);
    let commit_sha = FULL_SHA
        .captures(markdown)
        .map(|c| short_sha(&c[1], 12).to_string())
        .unwrap_or_else(|| stem.to_string());

    let message = MESSAGE
        .captures(markdown)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_default();

    let jira_tickets = dedup(JIRA_LINK.captures_iter(markdown).map(|c| c[1].to_string()));
    let services = services(markdown);
    let change_categories = categories(markdown);
    let openapi_changes = openapi_delta(markdown);

    let proto_changes = dedup(
        markdown
            .lines()
            .filter_map(|l| PROTO_LINE.captures(l))
            .map(|c| c[1].to_string()),
    );

    let files_changed = dedup(
        FILE_LINE
            .captures_iter(markdown)
            .map(|c| c[1].to_string()),
    );

    let impact_level = ImpactLevel::from_categories(&change_categories);

    Some(ReportMetadata {
        filename: filename.to_string(),
        commit_sha,
        message,
        jira_tickets,
        services,
        change_categories,
        openapi_changes,
        proto_changes,
        files_changed,
        impact_level,
    })
}

/// Parse every per-commit report in `dir`, ordered by file name.
pub fn load_reports(dir: &Path) -> Result<Vec<ReportMetadata>> {
    if !dir.is_dir() {
        return Err(Error::InputDirMissing {
            path: dir.to_path_buf(),
        });
    }

    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_commit_report(name))
        .collect();
    names.sort();

    let parsed: Vec<Result<Option<ReportMetadata>>> = names
        .par_iter()
        .map(|name| {
            let content = fs::read_to_string(dir.join(name))?;
            Ok(parse_report(name, &content))
        })
        .collect();

    let mut reports = Vec::with_capacity(parsed.len());
    for report in parsed {
        if let Some(report) = report? {
            tracing::debug!(file = %report.filename, impact = %report.impact_level, "parsed report");
            reports.push(report);
        }
    }
    Ok(reports)
}

fn dedup(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.filter(|i| seen.insert(i.clone())).collect()
}

/// Items of the "Services Affected" list: `- **svc** (...)` or `- svc`.
fn services(markdown: &str) -> Vec<String> {
    let mut lines = markdown.lines().skip_while(|l| {
        !(l.starts_with('#') && l.trim_start_matches('#').trim() == "Services Affected")
    });
    if lines.next().is_none() {
        return Vec::new();
    }

    let items = lines
        .skip_while(|l| l.trim().is_empty())
        .take_while(|l| l.starts_with("- "))
        .filter_map(|l| {
            let item = &l[2..];
            let name = match item.strip_prefix("**") {
                Some(rest) => rest.split("**").next()?,
                None => item.split_whitespace().next()?,
            };
            (!name.is_empty()).then(|| name.to_string())
        });
    dedup(items)
}

/// Categories named by `###`/`####` headings, in report order.
fn categories(markdown: &str) -> Vec<Category> {
    let mut found = Vec::new();
    for line in markdown.lines() {
        let Some(text) = line
            .strip_prefix("#### ")
            .or_else(|| line.strip_prefix("### "))
        else {
            continue;
        };
        let text = text
            .trim_start_matches("🔴")
            .trim_start_matches("🟡")
            .trim();
        if let Some(category) = Category::from_title(text)
            && !found.contains(&category)
        {
            found.push(category);
        }
    }
    found
}

fn openapi_delta(markdown: &str) -> OpenApiDelta {
    let mut delta = OpenApiDelta::default();
    let mut block = Block::Outside;

    for line in markdown.lines() {
        match line.trim_end() {
            "**Endpoint Changes:**" => {
                block = Block::Endpoints;
                continue;
            }
            "**Schema Changes:**" => {
                block = Block::Schemas;
                continue;
            }
            l if l.starts_with('#') || l.starts_with("<details>") || l.starts_with("**") => {
                block = Block::Outside;
                continue;
            }
            _ => {}
        }

        if block == Block::Outside {
            continue;
        }
        let Some(caps) = CHANGE_LINE.captures(line) else {
            continue;
        };
        let name = caps[2].to_string();

        let target = match (block, &caps[1]) {
            (Block::Endpoints, "➕") => &mut delta.endpoints_added,
            (Block::Endpoints, "➖") => &mut delta.endpoints_removed,
            (Block::Endpoints, _) => &mut delta.endpoints_modified,
            (_, "➕") => &mut delta.schemas_added,
            (_, "➖") => &mut delta.schemas_removed,
            _ => &mut delta.schemas_modified,
        };
        if !target.contains(&name) {
            target.push(name);
        }
    }

    delta
}
