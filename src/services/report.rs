// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::collections::{BTreeMap, HashMap};

use crate::config::ReportConfig;
use crate::domain::{
    Category, CategoryResult, ChangeStatus, CommitRef, DiffAnalysis, FileChange, OpenApiAnalysis,
    ellipsize, short_sha,
};
use crate::services::dedup::collapse_repeats;
use crate::services::extract::{changed_lines, endpoint_changes, proto_changes};
use crate::services::git::{CommitRange, GitService};
use crate::services::github::RemoteCommit;
use crate::services::openapi::{OpenApiDiff, format_openapi, parse_spec};

/// Per-file content fetched ahead of rendering.
#[derive(Debug, Clone, Default)]
pub struct FileDetail {
    pub diff: Option<String>,
    /// The diff was wanted but `git diff` failed.
    pub diff_failed: bool,
    pub openapi: Option<OpenApiAnalysis>,
}

pub type FileDetails = HashMap<String, FileDetail>;

/// A commit together with its classified diff.
#[derive(Debug, Clone)]
pub struct AnalyzedCommit {
    pub commit: CommitRef,
    pub analysis: DiffAnalysis,
    pub details: FileDetails,
}

impl AnalyzedCommit {
    pub fn is_merge(&self) -> bool {
        let msg = self.commit.message.to_lowercase();
        msg.starts_with("merge pull request") || msg.starts_with("merge branch")
    }
}

/// Fetch diffs and OpenAPI comparisons for every file the report will expand.
pub async fn collect_details(
    git: &GitService,
    range: &CommitRange,
    analysis: &DiffAnalysis,
    config: &ReportConfig,
) -> FileDetails {
    let mut details = FileDetails::new();

    for category in [Category::Controllers, Category::ProtoFiles] {
        for file in &analysis.category(category).files {
            if !file.status.has_content() {
                continue;
            }
            details.insert(file.path.clone(), fetch_diff(git, range, &file.path).await);
        }
    }

    for file in &analysis.category(Category::OpenapiSpecs).files {
        if !file.status.has_content() {
            continue;
        }

        let mut detail = if file.total_changes() <= config.max_raw_diff_lines {
            fetch_diff(git, range, &file.path).await
        } else {
            FileDetail::default()
        };

        let before = git.show(&range.before, &file.path).await;
        let after = git.show(&range.after, &file.path).await;
        let before = before.as_deref().and_then(|c| parse_spec(&file.path, c));
        let after = after.as_deref().and_then(|c| parse_spec(&file.path, c));
        detail.openapi = Some(OpenApiDiff::compare(before.as_ref(), after.as_ref()));

        details.insert(file.path.clone(), detail);
    }

    details
}

async fn fetch_diff(git: &GitService, range: &CommitRange, path: &str) -> FileDetail {
    match git.file_diff(range, path).await {
        Ok(diff) => FileDetail {
            diff: Some(diff),
            ..FileDetail::default()
        },
        Err(e) => {
            tracing::warn!(path, error = %e, "could not fetch file diff");
            FileDetail {
                diff_failed: true,
                ..FileDetail::default()
            }
        }
    }
}

/// Renders analysis results as markdown reports.
pub struct ReportRenderer<'a> {
    config: &'a ReportConfig,
}

impl<'a> ReportRenderer<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    /// Full report for one diff.
    pub fn render(&self, analysis: &DiffAnalysis, details: &FileDetails) -> String {
        self.render_with_commits(analysis, details, &[])
    }

    /// Full report with a `## Commits Included` block before the category breakdown.
    pub fn render_with_commits(
        &self,
        analysis: &DiffAnalysis,
        details: &FileDetails,
        commits: &[CommitRef],
    ) -> String {
        let mut lines = vec![
            "# REST API Diff Analysis".to_string(),
            String::new(),
            format!("**Commit Range:** `{}`", analysis.commit_range),
            format!("**Repository:** `{}`", analysis.repo_path),
            String::new(),
        ];
        lines.extend(self.body(analysis, details, commits));
        lines.join("\n")
    }

    /// Report without its header, starting at `## Summary`.
    pub fn render_body(&self, analysis: &DiffAnalysis, details: &FileDetails) -> Vec<String> {
        self.body(analysis, details, &[])
    }

    fn body(
        &self,
        analysis: &DiffAnalysis,
        details: &FileDetails,
        commits: &[CommitRef],
    ) -> Vec<String> {
        let mut lines = Vec::new();
        summary_section(analysis, &mut lines);

        if !commits.is_empty() {
            lines.push(format!("## Commits Included ({})", commits.len()));
            lines.push(String::new());
            for commit in commits {
                lines.push(format!(
                    "- `{}` - {}",
                    short_sha(&commit.hash, 12),
                    commit.message
                ));
            }
            lines.push(String::new());
        }

        categories_section(analysis, details, &mut lines);
        impact_section(analysis, &mut lines);
        self.sdk_section(analysis, details, &mut lines);

        lines.push("---".into());
        lines.push("*Generated by sdkwatch*".into());
        lines
    }

    fn sdk_section(&self, analysis: &DiffAnalysis, details: &FileDetails, lines: &mut Vec<String>) {
        lines.push("## Python SDK Impact".into());
        lines.push(String::new());

        if !analysis.has_sdk_changes() {
            lines.push("*No SDK-relevant changes detected in this commit.*".into());
            lines.push(String::new());
            return;
        }

        let openapi = analysis.category(Category::OpenapiSpecs);
        if !openapi.is_empty() {
            lines.push("### 🔴 CRITICAL: OpenAPI Spec Changes".into());
            lines.push(String::new());
            lines.push("*These changes directly affect API client generation*".into());
            lines.push(String::new());

            for file in openapi.sorted_files() {
                self.openapi_file(file, details.get(&file.path), lines);
            }
        }

        let review: Vec<&CategoryResult> = analysis
            .populated_categories()
            .into_iter()
            .filter(|c| c.category.sdk_relevant() && !c.category.is_critical())
            .collect();

        if !review.is_empty() {
            lines.push("### 🟡 REVIEW: Files to Check".into());
            lines.push(String::new());
            lines.push("*Review these files and update SDK if needed*".into());
            lines.push(String::new());

            for result in review {
                lines.push(format!("#### {}", result.category.title()));
                lines.push(String::new());
                for file in result.sorted_files() {
                    lines.push(file.list_line());
                }
                lines.push(String::new());
            }
        }

        lines.push("### SDK Action Items".into());
        lines.push(String::new());

        let mut items = Vec::new();
        if !openapi.is_empty() {
            items.push(format!(
                "**Regenerate API Client**: OpenAPI specs changed - run `{}`",
                self.config.regenerate_command
            ));
        }
        if !analysis.category(Category::Controllers).is_empty() {
            items.push(
                "**Review New Endpoints**: Check if new REST endpoints need SDK wrapper methods"
                    .to_string(),
            );
        }
        if !analysis.category(Category::Models).is_empty() {
            items.push(
                "**Update Models**: Data models changed - verify SDK model mappings match"
                    .to_string(),
            );
        }
        if !analysis.category(Category::ApiExamples).is_empty() {
            items.push(
                "**Update Tests**: API examples changed - update SDK integration tests".to_string(),
            );
        }
        for (i, item) in items.iter().enumerate() {
            lines.push(format!("{}. {item}", i + 1));
        }
        lines.push(String::new());
    }

    fn openapi_file(&self, file: &FileChange, detail: Option<&FileDetail>, lines: &mut Vec<String>) {
        lines.push(format!("#### {} `{}`", file.status.icon(), file.path));
        lines.push(String::new());
        lines.push(format!(
            "**Changes:** +{}/-{} lines",
            file.additions, file.deletions
        ));
        lines.push(String::new());

        if let Some(openapi) = detail.and_then(|d| d.openapi.as_ref())
            && openapi.has_changes()
        {
            lines.push(format!("**API Summary:** {}", openapi.summary()));
            lines.push(String::new());
            lines.extend(format_openapi(openapi));
        }

        let total = file.total_changes();
        let limit = self.config.max_raw_diff_lines;
        if total > limit || !file.status.has_content() {
            lines.push(format!("*Diff too large ({total} lines) - review manually*"));
            lines.push(String::new());
            return;
        }

        match detail {
            Some(d) if d.diff_failed => {
                lines.push("*Unable to retrieve diff content*".into());
                lines.push(String::new());
            }
            Some(FileDetail {
                diff: Some(diff), ..
            }) => {
                let changed = changed_lines(diff);
                if changed.is_empty() {
                    return;
                }
                lines.push("<details>".into());
                lines.push("<summary>Raw diff (click to expand)</summary>".into());
                lines.push(String::new());
                lines.push("```diff".into());
                lines.extend(collapse_repeats(&changed).into_iter().take(limit));
                lines.push("```".into());
                lines.push(String::new());
                lines.push("</details>".into());
                lines.push(String::new());
            }
            _ => {}
        }
    }

    /// `[ABC-1](base/ABC-1), [ABC-2](base/ABC-2)`, or bare `[ABC-1]` without a base URL.
    pub fn jira_links(&self, ids: &[String]) -> String {
        ids.iter()
            .map(|id| match &self.config.jira_base_url {
                Some(base) => format!("[{id}]({}/{id})", base.trim_end_matches('/')),
                None => format!("[{id}]"),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Standalone report for one SDK-relevant commit (`{sha12}.md`).
    pub fn commit_report(&self, item: &AnalyzedCommit) -> String {
        let commit = &item.commit;
        let mut lines = vec![
            format!("# Commit `{}`", short_sha(&commit.hash, 12)),
            String::new(),
            format!("**Message:** {}", commit.message),
            format!("**Full hash:** `{}`", commit.hash),
        ];

        let ids = crate::services::classifier::jira_ids(&commit.message);
        if !ids.is_empty() {
            lines.push(format!("**JIRA:** {}", self.jira_links(&ids)));
        }
        lines.push(String::new());

        lines.extend(self.render_body(&item.analysis, &item.details));
        lines.join("\n")
    }

    /// Summary of an `--sdk-details` scan (`00-summary.md`).
    ///
    /// `scanned` is newest first, as returned by `git log`.
    pub fn sdk_summary(
        &self,
        since: &str,
        scanned: &[CommitRef],
        relevant: &[AnalyzedCommit],
    ) -> String {
        let mut lines = vec![
            "# SDK-Relevant Changes Report".to_string(),
            String::new(),
            format!("**Range:** `{since}..HEAD`"),
            format!("**Scanned:** {} commits", scanned.len()),
            format!("**SDK-relevant:** {} commits", relevant.len()),
            String::new(),
        ];

        if let Some(latest) = scanned.first() {
            lines.push(format!(
                "**Latest commit analyzed:** `{}`",
                short_sha(&latest.hash, 12)
            ));
            lines.push(String::new());
        }

        // Merge commits first, then the rest in scan order
        let mut ordered: Vec<&AnalyzedCommit> = relevant.iter().collect();
        ordered.sort_by_key(|item| !item.is_merge());

        lines.push("## Summary".into());
        lines.push(String::new());
        lines.push("| Commit | JIRA | Message | Impact |".into());
        lines.push("|--------|------|---------|--------|".into());
        for item in ordered {
            let ids = crate::services::classifier::jira_ids(&item.commit.message);
            let jira = if ids.is_empty() {
                "-".to_string()
            } else {
                ids.join(", ")
            };
            let impact: Vec<String> = item
                .analysis
                .sdk_impact()
                .into_iter()
                .map(|(cat, n)| format!("{cat}({n})"))
                .collect();
            lines.push(format!(
                "| `{}` | {} | {} | {} |",
                item.commit.short(),
                jira,
                table_cell(&ellipsize(&item.commit.message, 150)),
                impact.join(", ")
            ));
        }
        lines.push(String::new());
        lines.push("---".into());
        lines.push(String::new());

        lines.join("\n")
    }

    /// Summary followed by the full report of every relevant commit.
    pub fn sdk_details_combined(&self, summary: &str, relevant: &[AnalyzedCommit]) -> String {
        let mut lines = vec![summary.to_string()];
        let total = relevant.len();

        for (i, item) in relevant.iter().enumerate() {
            lines.push(format!(
                "# [{}/{total}] Commit `{}`",
                i + 1,
                short_sha(&item.commit.hash, 12)
            ));
            lines.push(String::new());
            lines.push(format!("**Message:** {}", item.commit.message));
            lines.push(String::new());
            lines.extend(self.render_body(&item.analysis, &item.details));
            lines.push(String::new());
            lines.push("---".into());
            lines.push(String::new());
        }

        lines.join("\n")
    }

    /// Overview of `--per-commit` analysis.
    ///
    /// `shown` holds every commit, or only the relevant ones with `sdk_only`.
    pub fn multi_commit(
        &self,
        since: &str,
        total: usize,
        shown: &[AnalyzedCommit],
        sdk_only: bool,
    ) -> String {
        let relevant: Vec<&AnalyzedCommit> = shown
            .iter()
            .filter(|c| c.analysis.has_sdk_changes())
            .collect();

        let mut lines = vec!["# Multi-Commit Analysis".to_string(), String::new()];

        if sdk_only {
            lines.push(format!(
                "**SDK-relevant commits:** {} (of {total} total since `{since}`)",
                relevant.len()
            ));
        } else {
            lines.push(format!("**Commits analyzed:** {total} (since `{since}`)"));
        }
        lines.push(String::new());
        lines.push("---".into());
        lines.push(String::new());

        lines.push("## Summary: SDK-Relevant Commits".into());
        lines.push(String::new());
        if relevant.is_empty() {
            lines.push("*No SDK-relevant changes found in any commit.*".into());
        } else {
            lines.push(format!(
                "**{} of {total} commits** require SDK attention:",
                relevant.len()
            ));
            lines.push(String::new());
            for item in &relevant {
                lines.push(format!(
                    "- `{}` - {}",
                    short_sha(&item.commit.hash, 12),
                    item.commit.message
                ));
            }
        }
        lines.push(String::new());
        lines.push("---".into());
        lines.push(String::new());

        for (i, item) in shown.iter().enumerate() {
            let analysis = &item.analysis;
            lines.push(format!(
                "## Commit {}: `{}`",
                i + 1,
                short_sha(&item.commit.hash, 12)
            ));
            lines.push(String::new());
            lines.push(format!("**Message:** {}", item.commit.message));
            lines.push(String::new());
            lines.push(format!(
                "**Files:** {} | **+{}/-{}**",
                analysis.total_files, analysis.total_additions, analysis.total_deletions
            ));

            let impact = analysis.sdk_impact();
            if !impact.is_empty() {
                let cats: Vec<String> = impact
                    .iter()
                    .map(|(cat, n)| format!("{cat} ({n})"))
                    .collect();
                lines.push(String::new());
                lines.push(format!("**🔴 SDK Impact:** {}", cats.join(", ")));

                if sdk_only {
                    for (cat, _) in impact {
                        lines.push(String::new());
                        lines.push(format!("*{cat}:*"));
                        for file in &analysis.category(cat).files {
                            lines.push(format!("  - `{}`", file.path));
                        }
                    }
                }
            }

            lines.push(String::new());
            lines.push("---".into());
            lines.push(String::new());
        }

        lines.join("\n")
    }

    /// `00-summary.md` of a remote scan.
    pub fn remote_summary(&self, repo: &str, commits: &[RemoteCommit], latest_sha: &str) -> String {
        let relevant: Vec<&RemoteCommit> = commits.iter().filter(|c| c.sdk_relevant()).collect();

        let mut lines = vec![
            "# SDK-Relevant Changes Report".to_string(),
            String::new(),
            format!("**Repository:** `{repo}`"),
            format!("**Commits scanned:** {}", commits.len()),
            format!("**SDK-relevant:** {}", relevant.len()),
            format!("**Latest commit:** `{}`", short_sha(latest_sha, 12)),
            String::new(),
        ];

        if relevant.is_empty() {
            lines.push("*No SDK-relevant changes detected.*".into());
            return lines.join("\n");
        }

        lines.push("## Summary".into());
        lines.push(String::new());
        lines.push("| Commit | JIRA | Message | Categories |".into());
        lines.push("|--------|------|---------|------------|".into());

        let mut totals: BTreeMap<Category, usize> = BTreeMap::new();
        for commit in &relevant {
            let ids = crate::services::classifier::jira_ids(&commit.message);
            let jira = if ids.is_empty() {
                "-".to_string()
            } else {
                ids.join(", ")
            };
            let cats: Vec<&str> = commit.categories.keys().map(|c| c.as_str()).collect();
            lines.push(format!(
                "| `{}` | {} | {} | {} |",
                short_sha(&commit.sha, 8),
                jira,
                table_cell(&ellipsize(&commit.message, 80)),
                cats.join(", ")
            ));
            for category in commit.categories.keys() {
                *totals.entry(*category).or_default() += 1;
            }
        }
        lines.push(String::new());

        lines.push("## Categories".into());
        lines.push(String::new());
        let mut totals: Vec<(Category, usize)> = totals.into_iter().collect();
        totals.sort_by_key(|(c, _)| c.priority());
        for (category, count) in totals {
            let label = if category.is_critical() {
                "🔴 CRITICAL"
            } else {
                "🟡 REVIEW"
            };
            lines.push(format!(
                "- **{category}** ({count} commits) - {label}: {}",
                category.description()
            ));
        }
        lines.push(String::new());

        lines.join("\n")
    }

    /// Per-commit report of a remote scan.
    pub fn remote_commit_report(&self, commit: &RemoteCommit) -> String {
        let mut lines = vec![
            format!("# Commit `{}`", short_sha(&commit.sha, 12)),
            String::new(),
            format!("**Message:** {}", commit.message),
            format!("**Author:** {}", commit.author),
            format!("**Date:** {}", commit.date),
            format!("**Full SHA:** `{}`", commit.sha),
        ];

        let ids = crate::services::classifier::jira_ids(&commit.message);
        if !ids.is_empty() {
            lines.push(format!("**JIRA:** {}", self.jira_links(&ids)));
        }

        lines.push(String::new());
        lines.push("## SDK-Relevant Changes".into());
        lines.push(String::new());

        let mut categories: Vec<(&Category, &Vec<FileChange>)> = commit.categories.iter().collect();
        categories.sort_by_key(|(c, _)| c.priority());

        for (category, files) in categories {
            lines.push(format!("### {} {}", category.marker(), category.title()));
            lines.push(String::new());
            lines.push(format!("*{}*", category.description()));
            lines.push(String::new());

            for file in files {
                lines.push(file.list_line());

                if let Some(patch) = file.patch.as_deref()
                    && category.is_critical()
                    && !patch.is_empty()
                    && patch.len() < self.config.max_inline_patch_chars
                {
                    lines.push(String::new());
                    lines.push("<details>".into());
                    lines.push("<summary>Diff (click to expand)</summary>".into());
                    lines.push(String::new());
                    lines.push("```diff".into());
                    lines.push(patch.to_string());
                    lines.push("```".into());
                    lines.push(String::new());
                    lines.push("</details>".into());
                    lines.push(String::new());
                }
            }
            lines.push(String::new());
        }

        if !commit.services.is_empty() {
            lines.push("## Services Affected".into());
            lines.push(String::new());
            for service in &commit.services {
                lines.push(format!("- {service}"));
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }

    /// `--list-commits` output with follow-up commands.
    pub fn commit_list(&self, since: &str, commits: &[CommitRef], repo_path: &str) -> String {
        let mut lines = vec![
            format!("# Commits since {since} ({} commits)", commits.len()),
            String::new(),
        ];
        for (i, commit) in commits.iter().enumerate() {
            lines.push(format!(
                "{}. `{}` - {}",
                i + 1,
                short_sha(&commit.hash, 12),
                commit.message
            ));
        }
        lines.push(String::new());
        lines.push("# To analyze all as combined diff:".into());
        lines.push(format!("sdkwatch analyze {since}..HEAD --repo-path {repo_path}"));
        lines.push(String::new());
        lines.push("# To analyze each commit individually:".into());
        lines.push(format!(
            "sdkwatch analyze --since {since} --per-commit --repo-path {repo_path}"
        ));
        lines.join("\n")
    }
}

fn summary_section(analysis: &DiffAnalysis, lines: &mut Vec<String>) {
    lines.push("## Summary".into());
    lines.push(String::new());
    lines.push(format!("- **Total Files Changed:** {}", analysis.total_files));
    lines.push(format!("- **Lines Added:** +{}", analysis.total_additions));
    lines.push(format!("- **Lines Removed:** -{}", analysis.total_deletions));
    lines.push(format!("- **Services Impacted:** {}", analysis.services.len()));
    lines.push(String::new());

    if !analysis.services.is_empty() {
        lines.push("### Services Affected".into());
        lines.push(String::new());
        for (name, service) in &analysis.services {
            lines.push(format!(
                "- **{name}** ({} files): {}",
                service.files.len(),
                service.category_names().join(", ")
            ));
        }
        lines.push(String::new());
    }
}

fn file_lines(file: &FileChange, lines: &mut Vec<String>) {
    lines.push(file.list_line());
    if file.commits.len() > 1 {
        for commit in &file.commits {
            lines.push(format!(
                "  - `{}` {}",
                commit.short(),
                ellipsize(&commit.message, 60)
            ));
        }
    }
}

fn categories_section(analysis: &DiffAnalysis, details: &FileDetails, lines: &mut Vec<String>) {
    lines.push("## Changes by Category".into());
    lines.push(String::new());

    for result in analysis.populated_categories() {
        let category = result.category;
        lines.push(format!("### {}", category.title()));
        lines.push(String::new());
        lines.push(format!("*{}*", category.description()));
        lines.push(String::new());
        lines.push(format!(
            "**Files:** {} | **+{}** / **-{}**",
            result.file_count(),
            result.total_additions(),
            result.total_deletions()
        ));
        lines.push(String::new());

        for file in result.sorted_files() {
            file_lines(file, lines);

            let Some(diff) = details.get(&file.path).and_then(|d| d.diff.as_deref()) else {
                continue;
            };
            match category {
                Category::Controllers => {
                    lines.extend(endpoint_changes(diff).iter().map(|e| e.list_line()));
                }
                Category::ProtoFiles => {
                    lines.extend(proto_changes(diff).iter().map(|p| p.list_line()));
                }
                _ => {}
            }
        }
        lines.push(String::new());
    }

    if !analysis.uncategorized.is_empty() {
        lines.push("### Other Files".into());
        lines.push(String::new());
        lines.push("*Files not matching REST API patterns*".into());
        lines.push(String::new());

        let mut files: Vec<&FileChange> = analysis.uncategorized.iter().collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        for file in files {
            file_lines(file, lines);
        }
        lines.push(String::new());
    }
}

fn impact_section(analysis: &DiffAnalysis, lines: &mut Vec<String>) {
    lines.push("## Impact Analysis".into());
    lines.push(String::new());

    let controllers = analysis.category(Category::Controllers);
    let models = analysis.category(Category::Models);
    let proto = analysis.category(Category::ProtoFiles);
    let migrations = analysis.category(Category::DatabaseMigrations);
    let tests = analysis.category(Category::Tests);

    let mut breaking = Vec::new();
    let deleted = controllers
        .files
        .iter()
        .filter(|f| f.status == ChangeStatus::Deleted)
        .count();
    if deleted > 0 {
        breaking.push(format!(
            "- ⚠️ **Deleted Controllers:** {deleted} controller(s) removed"
        ));
    }
    if !proto.is_empty() {
        breaking.push(format!(
            "- ⚠️ **Proto Changes:** {} proto file(s) modified - check for breaking contract changes",
            proto.file_count()
        ));
    }
    if !migrations.is_empty() {
        breaking.push(format!(
            "- ℹ️ **Database Migrations:** {} migration(s) - ensure backwards compatibility",
            migrations.file_count()
        ));
    }

    if !breaking.is_empty() {
        lines.push("### Potential Breaking Changes".into());
        lines.push(String::new());
        lines.extend(breaking);
        lines.push(String::new());
    }

    lines.push("### API Surface".into());
    lines.push(String::new());
    lines.push(format!(
        "- Controller changes: +{}/-{} lines",
        controllers.total_additions(),
        controllers.total_deletions()
    ));
    lines.push(format!(
        "- Model changes: +{}/-{} lines",
        models.total_additions(),
        models.total_deletions()
    ));
    lines.push(String::new());

    lines.push("### Test Coverage".into());
    lines.push(String::new());
    if tests.is_empty() {
        lines.push(
            "- ⚠️ **No test changes detected** - consider if tests are needed for these changes"
                .into(),
        );
    } else {
        lines.push(format!("- {} test file(s) modified", tests.file_count()));
        lines.push(format!(
            "- +{}/-{} test lines",
            tests.total_additions(),
            tests.total_deletions()
        ));
    }
    lines.push(String::new());
}

/// Pipes would end the table cell early.
pub fn table_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
