// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::ReportConfig;
use crate::domain::{Category, Cluster, ClusterManifest, ReportMetadata, ellipsize};
use crate::services::report::table_cell;

static OPENAPI_SERVICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"microservices/([^/]+)/").unwrap());

/// Keyed groups that remember the order in which keys first appeared.
struct Groups<'a> {
    order: Vec<String>,
    members: HashMap<String, Vec<&'a ReportMetadata>>,
}

impl<'a> Groups<'a> {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            members: HashMap::new(),
        }
    }

    fn push(&mut self, key: String, report: &'a ReportMetadata) {
        if !self.members.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.members.entry(key).or_default().push(report);
    }

    /// Groups in first-seen order.
    fn into_ordered(mut self) -> Vec<(String, Vec<&'a ReportMetadata>)> {
        self.order
            .into_iter()
            .map(|key| {
                let group = self.members.remove(&key).unwrap_or_default();
                (key, group)
            })
            .collect()
    }
}

fn claim(group: &[&ReportMetadata], used: &mut HashSet<String>) -> Vec<ReportMetadata> {
    group
        .iter()
        .map(|r| {
            used.insert(r.filename.clone());
            (*r).clone()
        })
        .collect()
}

/// Assign every report to exactly one cluster; the first matching strategy wins.
pub fn heuristic_cluster(reports: &[ReportMetadata]) -> Vec<Cluster> {
    let mut clusters = Vec::new();
    let mut used: HashSet<String> = HashSet::new();

    // Shared JIRA ticket
    let mut jira = Groups::new();
    for report in reports {
        for ticket in &report.jira_tickets {
            jira.push(ticket.clone(), report);
        }
    }
    // Claims made by earlier tickets must be visible to later ones
    for key in jira.order.clone() {
        let group: Vec<&ReportMetadata> = jira.members[&key]
            .iter()
            .copied()
            .filter(|r| !used.contains(&r.filename))
            .collect();
        if group.len() < 2 {
            continue;
        }
        let n = group.len();
        clusters.push(Cluster {
            cluster_id: format!("jira-{}", key.to_lowercase()),
            name: format!("JIRA {key} Changes"),
            description: format!("All commits related to {key}"),
            reports: claim(&group, &mut used),
            merge_rationale: format!(
                "These {n} commits are all part of the same JIRA ticket {key}"
            ),
            suggested_action: format!(
                "Review and implement SDK changes for {key} as a single unit"
            ),
            priority: 1,
        });
    }

    // Same service OpenAPI spec
    let mut openapi = Groups::new();
    for report in reports.iter().filter(|r| !used.contains(&r.filename)) {
        let service = report
            .files_changed
            .iter()
            .filter(|f| f.to_lowercase().contains("openapi") && f.ends_with(".json"))
            .find_map(|f| OPENAPI_SERVICE.captures(f).map(|c| c[1].to_string()));
        if let Some(service) = service {
            openapi.push(service, report);
        }
    }
    for (service, group) in openapi.into_ordered() {
        if group.len() < 2 {
            continue;
        }
        let n = group.len();
        clusters.push(Cluster {
            cluster_id: format!("openapi-{service}"),
            name: format!("{service} OpenAPI Changes"),
            description: format!("Multiple commits modifying {service} OpenAPI spec"),
            reports: claim(&group, &mut used),
            merge_rationale: format!(
                "These {n} commits all modify the {service} service OpenAPI specification"
            ),
            suggested_action: format!(
                "Regenerate API client once after all {service} changes are reviewed"
            ),
            priority: 2,
        });
    }

    // Primary service and primary change type
    let mut service_type = Groups::new();
    for report in reports.iter().filter(|r| !used.contains(&r.filename)) {
        let (Some(service), Some(change)) = (report.services.first(), report.primary_change())
        else {
            continue;
        };
        service_type.push(format!("{service}\n{}", change.as_str()), report);
    }
    for (key, group) in service_type.into_ordered() {
        if group.len() < 2 {
            continue;
        }
        let Some((service, change)) = key.split_once('\n') else {
            continue;
        };
        let title = Category::from_name(change)
            .map(|c| c.title())
            .unwrap_or(change);
        let n = group.len();
        clusters.push(Cluster {
            cluster_id: format!("service-{service}-{change}"),
            name: format!("{service} {title}"),
            description: format!("Multiple commits with {change} changes in {service}"),
            reports: claim(&group, &mut used),
            merge_rationale: format!(
                "These {n} commits all affect {change} in the {service} service"
            ),
            suggested_action: format!(
                "Review {change} changes in {service} together for consistency"
            ),
            priority: 3,
        });
    }

    // Remaining proto changes
    let proto: Vec<&ReportMetadata> = reports
        .iter()
        .filter(|r| !used.contains(&r.filename) && !r.proto_changes.is_empty())
        .collect();
    if proto.len() >= 2 {
        let n = proto.len();
        clusters.push(Cluster {
            cluster_id: "proto-changes".into(),
            name: "Proto File Changes".into(),
            description: "Commits modifying gRPC protocol buffers".into(),
            reports: claim(&proto, &mut used),
            merge_rationale: format!("These {n} commits all modify proto files"),
            suggested_action: "Regenerate proto stubs and review gRPC client changes together"
                .into(),
            priority: 4,
        });
    }

    for report in reports.iter().filter(|r| !used.contains(&r.filename)) {
        clusters.push(Cluster::singleton(
            report.clone(),
            "Standalone commit with unique changes",
        ));
    }

    tracing::debug!(
        reports = reports.len(),
        clusters = clusters.len(),
        "heuristic clustering done"
    );
    clusters
}

/// Dissolve non-singleton clusters smaller than `min_size` into singletons.
pub fn enforce_min_size(clusters: Vec<Cluster>, min_size: usize) -> Vec<Cluster> {
    let mut result = Vec::with_capacity(clusters.len());
    for cluster in clusters {
        if cluster.reports.len() >= min_size || cluster.is_singleton() {
            result.push(cluster);
        } else {
            result.extend(
                cluster
                    .reports
                    .into_iter()
                    .map(|r| Cluster::singleton(r, "Standalone commit")),
            );
        }
    }
    result
}

/// Clusters ordered for processing: by priority, then id.
pub fn sorted(clusters: &[Cluster]) -> Vec<&Cluster> {
    let mut sorted: Vec<&Cluster> = clusters.iter().collect();
    sorted.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.cluster_id.cmp(&b.cluster_id))
    });
    sorted
}

pub fn manifest(total_reports: usize, clusters: &[Cluster]) -> ClusterManifest {
    ClusterManifest {
        total_reports,
        total_clusters: clusters.len(),
        multi_report_clusters: clusters.iter().filter(|c| c.reports.len() > 1).count(),
        clusters: sorted(clusters).into_iter().cloned().collect(),
    }
}

fn gather(cluster: &Cluster, pick: fn(&ReportMetadata) -> &Vec<String>) -> BTreeSet<&str> {
    cluster
        .reports
        .iter()
        .flat_map(|r| pick(r).iter().map(String::as_str))
        .collect()
}

fn category_icon(category: Category) -> &'static str {
    match category {
        Category::OpenapiSpecs => "🔴",
        Category::Controllers | Category::Models => "🟡",
        _ => "⚪",
    }
}

/// `cluster-{id}.md` for a multi-report cluster.
pub fn merged_report(cluster: &Cluster, config: &ReportConfig) -> String {
    let renderer = crate::services::report::ReportRenderer::new(config);

    let mut lines = vec![
        format!("# Merged Report: {}", cluster.name),
        String::new(),
        format!("**Cluster ID:** `{}`", cluster.cluster_id),
        format!("**Priority:** {}", cluster.priority_label()),
        format!("**Reports Merged:** {}", cluster.reports.len()),
        String::new(),
        "## Merge Rationale".into(),
        String::new(),
        cluster.merge_rationale.clone(),
        String::new(),
        "## Suggested Action".into(),
        String::new(),
        cluster.suggested_action.clone(),
        String::new(),
        "## Commits Included".into(),
        String::new(),
        "| Commit | JIRA | Message |".into(),
        "|--------|------|---------|".into(),
    ];

    for report in &cluster.reports {
        let jira = if report.jira_tickets.is_empty() {
            "-".to_string()
        } else {
            renderer.jira_links(&report.jira_tickets)
        };
        lines.push(format!(
            "| `{}` | {} | {} |",
            report.commit_sha,
            jira,
            table_cell(&ellipsize(&report.message, 60))
        ));
    }

    lines.push(String::new());
    lines.push("## Combined Changes".into());
    lines.push(String::new());

    let services: BTreeSet<&str> = cluster
        .reports
        .iter()
        .flat_map(|r| r.services.iter().map(String::as_str))
        .collect();
    if !services.is_empty() {
        lines.push("### Services Affected".into());
        lines.push(String::new());
        lines.extend(services.iter().map(|s| format!("- **{s}**")));
        lines.push(String::new());
    }

    let categories: BTreeSet<Category> = cluster
        .reports
        .iter()
        .flat_map(|r| r.change_categories.iter().copied())
        .collect();
    if !categories.is_empty() {
        lines.push("### Change Categories".into());
        lines.push(String::new());
        let mut names: Vec<Category> = categories.into_iter().collect();
        names.sort_by_key(|c| c.as_str());
        for category in names {
            lines.push(format!("- {} {}", category_icon(category), category.title()));
        }
        lines.push(String::new());
    }

    let groups = [
        ("**Endpoints Added:**", "➕", gather(cluster, |r| &r.openapi_changes.endpoints_added)),
        ("**Endpoints Removed:**", "➖", gather(cluster, |r| &r.openapi_changes.endpoints_removed)),
        ("**Schemas Added:**", "➕", gather(cluster, |r| &r.openapi_changes.schemas_added)),
        ("**Schemas Removed:**", "➖", gather(cluster, |r| &r.openapi_changes.schemas_removed)),
    ];
    if groups.iter().any(|(_, _, items)| !items.is_empty()) {
        lines.push("### OpenAPI Changes Summary".into());
        lines.push(String::new());
        for (heading, icon, items) in &groups {
            if items.is_empty() {
                continue;
            }
            lines.push((*heading).into());
            lines.extend(items.iter().map(|i| format!("- {icon} `{i}`")));
            lines.push(String::new());
        }
    }

    let proto = gather(cluster, |r| &r.proto_changes);
    if !proto.is_empty() {
        lines.push("### Proto Changes".into());
        lines.push(String::new());
        lines.extend(proto.iter().map(|p| format!("- {p}")));
        lines.push(String::new());
    }

    lines.push("## Original Reports".into());
    lines.push(String::new());
    for report in &cluster.reports {
        lines.push(format!("- [{0}](./{0})", report.filename));
    }
    lines.push(String::new());
    lines.push("---".into());
    lines.push("*Generated by sdkwatch*".into());

    lines.join("\n")
}

/// `00-clusters.md` overview in processing order.
pub fn cluster_summary(clusters: &[Cluster]) -> String {
    let total_reports: usize = clusters.iter().map(|c| c.reports.len()).sum();
    let ordered = sorted(clusters);

    let mut lines = vec![
        "# SDK Change Clusters".to_string(),
        String::new(),
        format!("**Total Clusters:** {}", clusters.len()),
        format!("**Total Reports:** {total_reports}"),
        String::new(),
        "## Cluster Overview".into(),
        String::new(),
        "| Priority | Cluster | Reports | Action |".into(),
        "|----------|---------|---------|--------|".into(),
    ];

    for cluster in &ordered {
        let action = cluster
            .suggested_action
            .lines()
            .next()
            .filter(|a| !a.is_empty())
            .map(|a| a.chars().take(50).collect::<String>())
            .unwrap_or_else(|| "-".into());
        lines.push(format!(
            "| {} {} | [{}](./{}) | {} | {} |",
            cluster.priority_icon(),
            cluster.priority,
            cluster.name,
            cluster.file_name(),
            cluster.reports.len(),
            table_cell(&action)
        ));
    }

    lines.push(String::new());
    lines.push("## Processing Recommendations".into());
    lines.push(String::new());
    lines.push("Process clusters in priority order:".into());
    lines.push(String::new());

    for (i, cluster) in ordered.iter().enumerate() {
        lines.push(format!(
            "{}. **{}** ({} commits)",
            i + 1,
            cluster.name,
            cluster.reports.len()
        ));
        for action in cluster
            .suggested_action
            .lines()
            .take(3)
            .map(str::trim)
            .filter(|a| !a.is_empty())
        {
            lines.push(format!("   - {action}"));
        }
    }

    lines.push(String::new());
    lines.push("---".into());
    lines.push("*Generated by sdkwatch*".into());

    lines.join("\n")
}
