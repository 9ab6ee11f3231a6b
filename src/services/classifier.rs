// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;

use crate::domain::{Category, CommitRef, DiffAnalysis, FileChange, ServiceImpact};
use crate::error::{Error, Result};

/// One path rule. `exclude` stands in for a negative look-ahead on `include`.
struct Rule {
    category: Category,
    include: Regex,
    exclude: Option<Regex>,
    /// Only applies to local checkouts; the GitHub scan does not use it.
    local_only: bool,
}

fn rule(category: Category, patterns: &[&str]) -> Rule {
    Rule {
        category,
        include: Regex::new(&patterns.join("|")).unwrap(),
        exclude: None,
        local_only: false,
    }
}

fn rule_except(category: Category, pattern: &str, exclude: &str) -> Rule {
    Rule {
        category,
        include: Regex::new(pattern).unwrap(),
        exclude: Some(Regex::new(exclude).unwrap()),
        local_only: false,
    }
}

fn local_rule(category: Category, pattern: &str) -> Rule {
    Rule {
        local_only: true,
        ..rule(category, &[pattern])
    }
}

impl Rule {
    fn matches(&self, path: &str) -> bool {
        self.include.is_match(path) && !self.exclude.as_ref().is_some_and(|ex| ex.is_match(path))
    }
}

const SVC: &str = r"microservices/[^/]+";

/// Built-in rules in match order. The first matching rule wins.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    use Category::*;
    vec![
        rule(
            OpenapiSpecs,
            &[
                &format!(r"{SVC}/src/test/resources/openapi/open-api-spec\.json$"),
                r".*/openapi/.*\.json$",
                r".*/openapi/.*\.ya?ml$",
            ],
        ),
        rule(
            Controllers,
            &[
                &format!(r"{SVC}/src/main/kotlin/.*[Cc]ontroller\.kt$"),
                &format!(r"{SVC}/src/main/kotlin/controller/.*\.kt$"),
            ],
        ),
        rule(
            Models,
            &[
                &format!(r"{SVC}/src/main/kotlin/model/.*\.kt$"),
                &format!(r"{SVC}/src/main/kotlin/.*[Rr]equest\.kt$"),
                &format!(r"{SVC}/src/main/kotlin/.*[Rr]esponse\.kt$"),
                &format!(r"{SVC}/src/main/kotlin/service/pojo/.*\.kt$"),
                r"libraries/metadata-model/src/main/kotlin/.*\.kt$",
            ],
        ),
        rule(
            ApiExamples,
            &[
                &format!(r"{SVC}/src/test/resources/metadata/.*\.json$"),
                &format!(r"{SVC}/src/test/resources/.*[Rr]equest.*\.json$"),
                &format!(r"{SVC}/src/test/resources/.*[Rr]esponse.*\.json$"),
            ],
        ),
        local_rule(
            ApiExamples,
            &format!(r"{SVC}/src/test/resources/.*[Rr]esult.*\.json$"),
        ),
        rule(
            Services,
            &[
                &format!(r"{SVC}/src/main/kotlin/service/.*[Ss]ervice\.kt$"),
                &format!(r"{SVC}/src/main/kotlin/service/.*[Pp]rovider\.kt$"),
            ],
        ),
        rule_except(
            Services,
            &format!(r"{SVC}/src/main/kotlin/service/.*\.kt$"),
            &format!(r"{SVC}/src/main/kotlin/service/pojo/"),
        ),
        rule(ProtoFiles, &[r"proto-files/[^/]+/proto/.*\.proto$"]),
        rule(
            GrpcClients,
            &[
                r"libraries/grpc/[^/]+-client-grpc/.*\.kt$",
                r"proto-stubs/[^/]+-stub/.*\.kt$",
            ],
        ),
        rule(
            Repositories,
            &[
                &format!(r"{SVC}/src/main/kotlin/repository/.*\.kt$"),
                &format!(r"{SVC}/src/main/kotlin/.*[Rr]epository\.kt$"),
            ],
        ),
        rule(
            DatabaseMigrations,
            &[&format!(
                r"{SVC}/src/main/resources/db/changelog/.*\.(ya?ml|xml|sql)$"
            )],
        ),
        rule(
            Configuration,
            &[
                &format!(r"{SVC}/src/main/kotlin/configuration/.*\.kt$"),
                &format!(r"{SVC}/src/main/kotlin/config/.*\.kt$"),
                &format!(r"{SVC}/src/main/kotlin/.*[Cc]onfig(uration)?\.kt$"),
                &format!(r"{SVC}/src/main/resources/application.*\.ya?ml$"),
                &format!(r"{SVC}/src/main/resources/application.*\.properties$"),
            ],
        ),
        rule(
            Tests,
            &[
                &format!(r"{SVC}/src/test/.*\.kt$"),
                r"libraries/.+/src/test/.*\.kt$",
            ],
        ),
        rule(
            BuildFiles,
            &[r"build\.gradle\.kts$", r"settings\.gradle\.kts$"],
        ),
        rule_except(
            SharedLibraries,
            r"libraries/.+/src/main/kotlin/.*\.kt$",
            r"libraries/grpc/",
        ),
        rule(
            Ignored,
            &[
                r".*\.lockfile$",
                r"helm-charts/.*",
                r"docker-compose.*\.ya?ml$",
                r"components/.*\.py$",
                r"components/gateway/.*",
                r"\.cursor/.*",
                r"gradle/.*",
                r"docs/.*",
            ],
        ),
    ]
});

static SERVICE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"^microservices/([^/]+)/").unwrap(),
        Regex::new(r"^proto-files/([^/]+)/").unwrap(),
        Regex::new(r"^libraries/grpc/([^/]+)-client-grpc/").unwrap(),
    ]
});

static JIRA_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b([A-Z]{2,}-\d+)\b").unwrap());

/// Sorts changed paths into [`Category`] buckets.
#[derive(Debug, Clone)]
pub struct Classifier {
    ignore: GlobSet,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            ignore: GlobSet::empty(),
        }
    }
}

impl Classifier {
    /// Build a classifier with extra ignore globs (matched before the built-in rules).
    pub fn new(ignore: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in ignore {
            let glob = Glob::new(pattern)
                .map_err(|e| Error::Config(format!("invalid ignore glob '{pattern}': {e}")))?;
            builder.add(glob);
        }
        let ignore = builder
            .build()
            .map_err(|e| Error::Config(format!("invalid ignore globs: {e}")))?;
        Ok(Self { ignore })
    }

    pub fn categorize(&self, path: &str) -> Option<Category> {
        if self.ignore.is_match(path) {
            return Some(Category::Ignored);
        }
        RULES.iter().find(|r| r.matches(path)).map(|r| r.category)
    }

    /// SDK-relevant category for a file seen through the GitHub API.
    ///
    /// Uses the SDK rules only and skips the local-only result-example rule.
    pub fn categorize_sdk(&self, path: &str) -> Option<Category> {
        if self.ignore.is_match(path) {
            return None;
        }
        RULES
            .iter()
            .filter(|r| r.category.sdk_relevant() && !r.local_only)
            .find(|r| r.matches(path))
            .map(|r| r.category)
    }

    /// Classify a set of changed files into a [`DiffAnalysis`].
    ///
    /// When `file_commits` is given, each file is annotated with the commits that touched it.
    pub fn analyze(
        &self,
        commit_range: &str,
        repo_path: &str,
        changes: Vec<FileChange>,
        file_commits: Option<&HashMap<String, Vec<CommitRef>>>,
    ) -> DiffAnalysis {
        let mut analysis = DiffAnalysis::new(commit_range, repo_path);
        analysis.total_files = changes.len();

        for mut change in changes {
            analysis.total_additions += change.additions;
            analysis.total_deletions += change.deletions;

            if let Some(commits) = file_commits.and_then(|m| m.get(&change.path)) {
                change.commits = commits.clone();
            }

            let category = self.categorize(&change.path);

            if let Some(service) = service_name(&change.path) {
                let impact = analysis
                    .services
                    .entry(service.to_string())
                    .or_insert_with(|| ServiceImpact {
                        name: service.to_string(),
                        ..ServiceImpact::default()
                    });
                impact.files.push(change.clone());
                if let Some(category) = category {
                    impact.categories.insert(category);
                }
            }

            match category {
                Some(category) => analysis.category_mut(category).files.push(change),
                None => analysis.uncategorized.push(change),
            }
        }

        tracing::debug!(
            range = commit_range,
            files = analysis.total_files,
            uncategorized = analysis.uncategorized.len(),
            "classified diff"
        );

        analysis
    }
}

/// Service a path belongs to, if any.
pub fn service_name(path: &str) -> Option<&str> {
    SERVICE_PATTERNS
        .iter()
        .find_map(|re| re.captures(path))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// JIRA ticket ids in a commit message, upper-cased, first occurrence wins.
pub fn jira_ids(message: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    JIRA_PATTERN
        .captures_iter(message)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_uppercase())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
