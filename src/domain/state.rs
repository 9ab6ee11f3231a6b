// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lifecycle of a report or cluster, in order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Status {
    #[default]
    New,
    Reviewed,
    InProgress,
    Implemented,
    Skipped,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Self::New,
        Self::Reviewed,
        Self::InProgress,
        Self::Implemented,
        Self::Skipped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Reviewed => "reviewed",
            Self::InProgress => "in_progress",
            Self::Implemented => "implemented",
            Self::Skipped => "skipped",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::New => "🆕",
            Self::Reviewed => "👁️",
            Self::InProgress => "🔄",
            Self::Implemented => "✅",
            Self::Skipped => "⏭️",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which half of the state document an id lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Report,
    Cluster,
}

impl ItemKind {
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Report => "reports",
            Self::Cluster => "clusters",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Report => f.write_str("report"),
            Self::Cluster => f.write_str("cluster"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub from_status: Status,
    pub to_status: Status,
    pub changed_at: DateTime<Utc>,
    #[serde(default)]
    pub changed_by: Option<String>,
}

/// A tracked report or cluster. Fields written by other tools survive in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackedItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<StatusChange>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_number: Option<u64>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub jira_tickets: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implemented_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implemented_by: Option<String>,

    // Reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,

    // Clusters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_count: Option<usize>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub reports: Vec<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl TrackedItem {
    pub fn new_at(now: DateTime<Utc>) -> Self {
        Self {
            created_at: Some(now),
            ..Self::default()
        }
    }

    /// Short suffix for list output: assignee, then PR, then notes.
    pub fn extra_info(&self) -> String {
        if let Some(who) = &self.assigned_to {
            format!(" (assigned: {who})")
        } else if let Some(pr) = self.pr_number {
            format!(" (PR #{pr})")
        } else if let Some(notes) = &self.notes {
            format!(" ({})", super::ellipsize(notes, 30))
        } else {
            String::new()
        }
    }
}

fn state_version() -> u32 {
    1
}

/// The whole state document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportState {
    #[serde(default = "state_version")]
    pub version: u32,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reports: BTreeMap<String, TrackedItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clusters: BTreeMap<String, TrackedItem>,
}

impl Default for ReportState {
    fn default() -> Self {
        Self {
            version: state_version(),
            last_updated: None,
            reports: BTreeMap::new(),
            clusters: BTreeMap::new(),
        }
    }
}

impl ReportState {
    pub fn items(&self, kind: ItemKind) -> &BTreeMap<String, TrackedItem> {
        match kind {
            ItemKind::Report => &self.reports,
            ItemKind::Cluster => &self.clusters,
        }
    }

    pub fn items_mut(&mut self, kind: ItemKind) -> &mut BTreeMap<String, TrackedItem> {
        match kind {
            ItemKind::Report => &mut self.reports,
            ItemKind::Cluster => &mut self.clusters,
        }
    }
}
