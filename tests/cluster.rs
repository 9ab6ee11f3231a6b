// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

mod helpers;

use std::collections::HashSet;

use sdkwatch::config::ReportConfig;
use sdkwatch::domain::{Category, Cluster, ReportMetadata};
use sdkwatch::services::cluster::{
    cluster_summary, enforce_min_size, heuristic_cluster, manifest, merged_report, sorted,
};

use helpers::{make_cluster, make_report};

const AUTH_SPEC: &str = "microservices/auth/src/test/resources/openapi/open-api-spec.json";

fn with_files(mut report: ReportMetadata, files: &[&str]) -> ReportMetadata {
    report.files_changed = files.iter().map(|f| f.to_string()).collect();
    report
}

fn with_proto(mut report: ReportMetadata, proto: &[&str]) -> ReportMetadata {
    report.proto_changes = proto.iter().map(|p| p.to_string()).collect();
    report
}

fn sample_reports() -> Vec<ReportMetadata> {
    vec![
        make_report("aaa", "CQ-1 first", &["CQ-1"], &["auth"], &[Category::Controllers]),
        make_report("bbb", "CQ-1 second", &["CQ-1"], &["auth"], &[Category::Models]),
        make_report("ccc", "CQ-1 CQ-2 both", &["CQ-1", "CQ-2"], &[], &[]),
        make_report("ddd", "CQ-2 alone", &["CQ-2"], &["billing"], &[]),
        with_files(
            make_report("eee", "spec one", &[], &["auth"], &[Category::OpenapiSpecs]),
            &[AUTH_SPEC],
        ),
        with_files(
            make_report("fff", "spec two", &[], &["auth"], &[Category::OpenapiSpecs]),
            &[AUTH_SPEC],
        ),
        make_report("ggg", "models a", &[], &["scan"], &[Category::Models]),
        make_report("hhh", "models b", &[], &["scan"], &[Category::Models, Category::Tests]),
        with_proto(make_report("iii", "proto a", &[], &[], &[]), &["➕ `message A`"]),
        with_proto(make_report("jjj", "proto b", &[], &[], &[]), &["➕ `rpc B`"]),
        make_report("kkk", "lonely", &[], &["other"], &[Category::Tests]),
    ]
}

fn ids(cluster: &Cluster) -> Vec<&str> {
    cluster.reports.iter().map(|r| r.commit_sha.as_str()).collect()
}

#[test]
fn strategies_apply_in_order() {
    let clusters = heuristic_cluster(&sample_reports());
    let by_id = |id: &str| {
        clusters
            .iter()
            .find(|c| c.cluster_id == id)
            .unwrap_or_else(|| panic!("missing cluster {id}"))
    };

    let jira = by_id("jira-cq-1");
    assert_eq!(ids(jira), vec!["aaa", "bbb", "ccc"]);
    assert_eq!(jira.priority, 1);
    assert_eq!(jira.name, "JIRA CQ-1 Changes");

    // ccc was claimed by CQ-1, leaving CQ-2 with a single report
    assert!(clusters.iter().all(|c| c.cluster_id != "jira-cq-2"));
    assert_eq!(ids(by_id("single-ddd")), vec!["ddd"]);

    let openapi = by_id("openapi-auth");
    assert_eq!(ids(openapi), vec!["eee", "fff"]);
    assert_eq!(openapi.priority, 2);

    let service = by_id("service-scan-models");
    assert_eq!(ids(service), vec!["ggg", "hhh"]);
    assert_eq!(service.name, "scan Models");
    assert_eq!(service.priority, 3);

    let proto = by_id("proto-changes");
    assert_eq!(ids(proto), vec!["iii", "jjj"]);
    assert_eq!(proto.priority, 4);

    let lonely = by_id("single-kkk");
    assert_eq!(lonely.priority, 5);
    assert!(lonely.is_singleton());
}

#[test]
fn every_report_lands_in_exactly_one_cluster() {
    let reports = sample_reports();
    let clusters = heuristic_cluster(&reports);

    let placed: Vec<&str> = clusters
        .iter()
        .flat_map(|c| c.reports.iter().map(|r| r.filename.as_str()))
        .collect();
    let unique: HashSet<&str> = placed.iter().copied().collect();
    assert_eq!(placed.len(), reports.len());
    assert_eq!(unique.len(), reports.len());
}

#[test]
fn no_reports_no_clusters() {
    assert!(heuristic_cluster(&[]).is_empty());
}

#[test]
fn small_clusters_dissolve() {
    let clusters = vec![
        make_cluster("big", 1, vec![
            make_report("a", "a", &[], &[], &[]),
            make_report("b", "b", &[], &[], &[]),
            make_report("c", "c", &[], &[], &[]),
        ]),
        make_cluster("pair", 2, vec![
            make_report("d", "d", &[], &[], &[]),
            make_report("e", "e", &[], &[], &[]),
        ]),
        Cluster::singleton(make_report("f", "f", &[], &[], &[]), "alone"),
    ];

    let result = enforce_min_size(clusters, 3);
    let ids: Vec<&str> = result.iter().map(|c| c.cluster_id.as_str()).collect();
    assert_eq!(ids, vec!["big", "single-d", "single-e", "single-f"]);
    assert_eq!(result[1].priority, 5);
}

#[test]
fn sorted_by_priority_then_id() {
    let clusters = vec![
        make_cluster("zeta", 2, vec![]),
        make_cluster("beta", 1, vec![]),
        make_cluster("alpha", 2, vec![]),
    ];
    let order: Vec<&str> = sorted(&clusters)
        .iter()
        .map(|c| c.cluster_id.as_str())
        .collect();
    assert_eq!(order, vec!["beta", "alpha", "zeta"]);
}

#[test]
fn manifest_counts() {
    let clusters = heuristic_cluster(&sample_reports());
    let manifest = manifest(11, &clusters);

    assert_eq!(manifest.total_reports, 11);
    assert_eq!(manifest.total_clusters, clusters.len());
    assert_eq!(manifest.multi_report_clusters, 4);
    assert_eq!(manifest.clusters[0].cluster_id, "jira-cq-1");

    let json = serde_json::to_value(&manifest).unwrap();
    assert!(json["clusters"][0]["reports"][0].get("files_changed").is_none());
    assert_eq!(json["clusters"][0]["reports"][0]["impact_level"], "high");
}

#[test]
fn merged_report_sections() {
    let mut spec = make_report("eee", "spec | one", &["CQ-5"], &["auth"], &[Category::OpenapiSpecs]);
    spec.openapi_changes.endpoints_added = vec!["/teams".into()];
    let models = with_proto(
        make_report("fff", "models", &[], &["scan"], &[Category::Models]),
        &["➕ `message Team`"],
    );
    let cluster = make_cluster("x", 1, vec![spec, models]);

    let config = ReportConfig {
        jira_base_url: Some("https://jira".into()),
        ..ReportConfig::default()
    };
    let report = merged_report(&cluster, &config);

    assert!(report.starts_with("# Merged Report: Cluster x"));
    assert!(report.contains("**Priority:** 🔴 Critical"));
    assert!(report.contains("**Reports Merged:** 2"));
    assert!(report.contains("| `eee` | [CQ-5](https://jira/CQ-5) | spec \\| one |"));
    assert!(report.contains("| `fff` | - | models |"));
    assert!(report.contains("- **auth**\n- **scan**"));
    assert!(report.contains("- 🟡 Models\n- 🔴 Openapi Specs"));
    assert!(report.contains("**Endpoints Added:**\n- ➕ `/teams`"));
    assert!(!report.contains("**Schemas Added:**"));
    assert!(report.contains("### Proto Changes\n\n- ➕ `message Team`"));
    assert!(report.contains("- [eee.md](./eee.md)"));
}

#[test]
fn summary_in_processing_order() {
    let mut urgent = make_cluster("jira-cq-1", 1, vec![
        make_report("a", "a", &[], &[], &[]),
        make_report("b", "b", &[], &[], &[]),
    ]);
    urgent.suggested_action = "Implement together\nThen regenerate".into();
    let clusters = vec![
        Cluster::singleton(make_report("c", "c", &[], &[], &[]), "alone"),
        urgent,
    ];

    let summary = cluster_summary(&clusters);

    assert!(summary.contains("**Total Clusters:** 2"));
    assert!(summary.contains("**Total Reports:** 3"));
    assert!(summary.contains(
        "| 🔴 1 | [Cluster jira-cq-1](./cluster-jira-cq-1.md) | 2 | Implement together |"
    ));
    assert!(summary.contains("| 🟢 5 | [Commit c](./cluster-single-c.md) | 1 | Review individually |"));

    let first = summary.find("1. **Cluster jira-cq-1** (2 commits)").unwrap();
    let second = summary.find("2. **Commit c** (1 commits)").unwrap();
    assert!(first < second);
    assert!(summary.contains("   - Implement together\n   - Then regenerate"));
}
