// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

//! LLM review of heuristic clusters: merge, split or keep.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::Cluster;
use crate::error::{Error, Result};

static JSON_OBJECT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[\s\S]+\}").unwrap());

#[derive(Serialize)]
struct ClusterOverview<'a> {
    cluster_id: &'a str,
    name: &'a str,
    report_count: usize,
    commits: Vec<CommitOverview<'a>>,
    services: BTreeSet<&'a str>,
    change_types: BTreeSet<&'a str>,
    current_rationale: &'a str,
}

#[derive(Serialize)]
struct CommitOverview<'a> {
    sha: &'a str,
    message: &'a str,
    jira: &'a [String],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendedAction {
    Merge,
    Split,
    #[default]
    Keep,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Recommendation {
    pub action: RecommendedAction,
    pub cluster_ids: Vec<String>,
    pub new_name: Option<String>,
    pub new_description: Option<String>,
    pub priority: Option<u8>,
    pub action_items: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Refinement {
    pub analysis: Option<String>,
    pub recommendations: Vec<Recommendation>,
}

pub fn build_prompt(clusters: &[Cluster]) -> String {
    let overview: Vec<ClusterOverview> = clusters
        .iter()
        .map(|c| ClusterOverview {
            cluster_id: &c.cluster_id,
            name: &c.name,
            report_count: c.reports.len(),
            commits: c
                .reports
                .iter()
                .map(|r| CommitOverview {
                    sha: &r.commit_sha,
                    message: &r.message,
                    jira: &r.jira_tickets,
                })
                .collect(),
            services: c
                .reports
                .iter()
                .flat_map(|r| r.services.iter().map(String::as_str))
                .collect(),
            change_types: c
                .reports
                .iter()
                .flat_map(|r| r.change_categories.iter().map(|cat| cat.as_str()))
                .collect(),
            current_rationale: &c.merge_rationale,
        })
        .collect();

    let json = serde_json::to_string_pretty(&overview).unwrap_or_else(|_| "[]".into());

    format!(
        r#"Analyze these SDK change report clusters and suggest improvements.

Current clusters:
{json}

Your task:
1. Identify clusters that should be MERGED because they represent the same logical change
2. Identify clusters that should be SPLIT because they group unrelated changes
3. For each final cluster, provide:
   - A clear, actionable name (max 50 chars)
   - A description of what SDK changes are needed
   - Priority (1=critical API changes, 2=important, 3=routine)
   - Specific action items for the SDK team

Respond in JSON format:
{{
  "analysis": "Brief analysis of the clustering",
  "recommendations": [
    {{
      "action": "merge|split|keep",
      "cluster_ids": ["id1", "id2"],
      "new_name": "Clear action-oriented name",
      "new_description": "What needs to be done",
      "priority": 1,
      "action_items": ["Specific step 1", "Specific step 2"]
    }}
  ]
}}

For merge, cluster_ids lists the clusters to combine. For split and keep, it names a single cluster."#
    )
}

/// Parse the first `{...}` span of a model response.
pub fn parse_refinement(response: &str) -> Result<Refinement> {
    let Some(m) = JSON_OBJECT.find(response) else {
        return Err(Error::Provider {
            provider: "refine".into(),
            message: "no JSON object in response".into(),
        });
    };
    Ok(serde_json::from_str(m.as_str())?)
}

/// Apply merge and keep recommendations. Clusters no recommendation touched are appended unchanged.
pub fn apply_recommendations(clusters: Vec<Cluster>, refinement: &Refinement) -> Vec<Cluster> {
    let order: Vec<String> = clusters.iter().map(|c| c.cluster_id.clone()).collect();
    let mut by_id: HashMap<String, Cluster> = clusters
        .into_iter()
        .map(|c| (c.cluster_id.clone(), c))
        .collect();
    let mut result = Vec::new();

    for rec in &refinement.recommendations {
        match rec.action {
            RecommendedAction::Merge if rec.cluster_ids.len() >= 2 => {
                let mut reports = Vec::new();
                for id in &rec.cluster_ids {
                    if let Some(cluster) = by_id.remove(id) {
                        reports.extend(cluster.reports);
                    }
                }
                if reports.is_empty() {
                    continue;
                }

                let ids: Vec<&str> = rec.cluster_ids.iter().take(2).map(String::as_str).collect();
                result.push(Cluster {
                    cluster_id: format!("merged-{}", ids.join("-")),
                    name: rec
                        .new_name
                        .clone()
                        .unwrap_or_else(|| "Merged Changes".into()),
                    description: rec.new_description.clone().unwrap_or_default(),
                    reports,
                    merge_rationale: "LLM identified these as semantically related changes".into(),
                    suggested_action: rec.action_items.join("\n"),
                    priority: rec.priority.unwrap_or(2),
                });
            }
            RecommendedAction::Keep => {
                let Some(id) = rec.cluster_ids.first() else {
                    continue;
                };
                let Some(mut cluster) = by_id.remove(id) else {
                    continue;
                };
                if let Some(ref name) = rec.new_name {
                    cluster.name = name.clone();
                }
                if let Some(ref description) = rec.new_description {
                    cluster.description = description.clone();
                }
                if let Some(priority) = rec.priority {
                    cluster.priority = priority;
                }
                if !rec.action_items.is_empty() {
                    cluster.suggested_action = rec.action_items.join("\n");
                }
                result.push(cluster);
            }
            _ => {
                tracing::debug!(action = ?rec.action, ids = ?rec.cluster_ids, "recommendation not applied");
            }
        }
    }

    // Untouched clusters keep their original order
    result.extend(order.iter().filter_map(|id| by_id.remove(id)));

    result
}
