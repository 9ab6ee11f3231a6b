// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use sdkwatch::domain::{
    Category, ChangeStatus, Cluster, CommitRef, FileChange, ImpactLevel, OpenApiDelta,
    ReportMetadata,
};

/// Create a FileChange with line counts
#[allow(dead_code)]
pub fn make_file_change(
    path: &str,
    status: ChangeStatus,
    additions: usize,
    deletions: usize,
) -> FileChange {
    FileChange {
        additions,
        deletions,
        ..FileChange::new(path, status)
    }
}

#[allow(dead_code)]
pub fn make_commit(hash: &str, message: &str) -> CommitRef {
    CommitRef {
        hash: hash.to_string(),
        message: message.to_string(),
    }
}

/// Report metadata as the parser would produce it; the short sha doubles as the file stem.
#[allow(dead_code)]
pub fn make_report(
    sha: &str,
    message: &str,
    jira: &[&str],
    services: &[&str],
    categories: &[Category],
) -> ReportMetadata {
    ReportMetadata {
        filename: format!("{sha}.md"),
        commit_sha: sha.to_string(),
        message: message.to_string(),
        jira_tickets: jira.iter().map(|s| s.to_string()).collect(),
        services: services.iter().map(|s| s.to_string()).collect(),
        change_categories: categories.to_vec(),
        openapi_changes: OpenApiDelta::default(),
        proto_changes: Vec::new(),
        files_changed: Vec::new(),
        impact_level: ImpactLevel::from_categories(categories),
    }
}

#[allow(dead_code)]
pub fn make_cluster(id: &str, priority: u8, reports: Vec<ReportMetadata>) -> Cluster {
    Cluster {
        cluster_id: id.to_string(),
        name: format!("Cluster {id}"),
        description: String::new(),
        reports,
        merge_rationale: "test".into(),
        suggested_action: "Review".into(),
        priority,
    }
}

/// A 40-character hex sha built from a short prefix
#[allow(dead_code)]
pub fn full_sha(prefix: &str) -> String {
    format!("{prefix:0<40}")
}
