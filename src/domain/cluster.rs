// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use serde::{Deserialize, Serialize};

use super::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl ImpactLevel {
    pub fn from_categories(categories: &[Category]) -> Self {
        if categories.contains(&Category::OpenapiSpecs) {
            Self::Critical
        } else if categories.contains(&Category::Controllers)
            || categories.contains(&Category::Models)
        {
            Self::High
        } else if categories.contains(&Category::ProtoFiles) {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Endpoint and schema names pulled out of a report's OpenAPI section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenApiDelta {
    pub endpoints_added: Vec<String>,
    pub endpoints_removed: Vec<String>,
    pub endpoints_modified: Vec<String>,
    pub schemas_added: Vec<String>,
    pub schemas_removed: Vec<String>,
    pub schemas_modified: Vec<String>,
}

impl OpenApiDelta {
    pub fn is_empty(&self) -> bool {
        self.endpoints_added.is_empty()
            && self.endpoints_removed.is_empty()
            && self.endpoints_modified.is_empty()
            && self.schemas_added.is_empty()
            && self.schemas_removed.is_empty()
            && self.schemas_modified.is_empty()
    }
}

/// Metadata extracted from a per-commit report for clustering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub filename: String,
    pub commit_sha: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub jira_tickets: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub change_categories: Vec<Category>,
    #[serde(default)]
    pub openapi_changes: OpenApiDelta,
    #[serde(default)]
    pub proto_changes: Vec<String>,
    #[serde(skip_serializing, default)]
    pub files_changed: Vec<String>,
    #[serde(default = "default_impact")]
    pub impact_level: ImpactLevel,
}

fn default_impact() -> ImpactLevel {
    ImpactLevel::Low
}

impl ReportMetadata {
    /// Most important change type: openapi > controllers > models > proto, else the first seen.
    pub fn primary_change(&self) -> Option<Category> {
        const ORDER: [Category; 4] = [
            Category::OpenapiSpecs,
            Category::Controllers,
            Category::Models,
            Category::ProtoFiles,
        ];
        ORDER
            .into_iter()
            .find(|c| self.change_categories.contains(c))
            .or_else(|| self.change_categories.first().copied())
    }
}

/// A group of related reports to be handled together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub cluster_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub reports: Vec<ReportMetadata>,
    #[serde(default)]
    pub merge_rationale: String,
    #[serde(default)]
    pub suggested_action: String,
    /// 1 is the most urgent.
    #[serde(default = "default_priority")]
    pub priority: u8,
}

fn default_priority() -> u8 {
    1
}

impl Cluster {
    pub fn singleton(report: ReportMetadata, rationale: &str) -> Self {
        Self {
            cluster_id: format!("single-{}", report.commit_sha),
            name: format!("Commit {}", report.commit_sha),
            description: report.message.chars().take(100).collect(),
            reports: vec![report],
            merge_rationale: rationale.to_string(),
            suggested_action: "Review individually".to_string(),
            priority: 5,
        }
    }

    pub fn is_singleton(&self) -> bool {
        self.cluster_id.starts_with("single-")
    }

    pub fn priority_icon(&self) -> &'static str {
        match self.priority {
            1 => "🔴",
            2 => "🟡",
            _ => "🟢",
        }
    }

    pub fn priority_label(&self) -> &'static str {
        match self.priority {
            1 => "🔴 Critical",
            2 => "🟡 High",
            _ => "🟢 Normal",
        }
    }

    /// Markdown file written for multi-report clusters.
    pub fn file_name(&self) -> String {
        format!("cluster-{}.md", self.cluster_id)
    }
}

/// `clusters.json`, the machine-readable output of `sdkwatch cluster`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterManifest {
    #[serde(default)]
    pub total_reports: usize,
    #[serde(default)]
    pub total_clusters: usize,
    #[serde(default)]
    pub multi_report_clusters: usize,
    #[serde(default)]
    pub clusters: Vec<Cluster>,
}
