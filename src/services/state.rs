// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::{ClusterManifest, ItemKind, ReportState, Status, StatusChange, TrackedItem};
use crate::error::{Error, Result};
use crate::services::report_parser::is_commit_report;

/// Optional fields recorded alongside a status change.
#[derive(Debug, Clone, Default)]
pub struct MarkOptions {
    pub by: Option<String>,
    pub notes: Option<String>,
    pub pr: Option<u64>,
    pub jira: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub new_reports: usize,
    pub new_clusters: usize,
    pub existing: usize,
}

/// Per-status counts for one item kind, in lifecycle order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCounts {
    pub counts: Vec<(Status, usize)>,
    pub total: usize,
}

/// Items that still need someone to act on them.
#[derive(Debug, Default)]
pub struct Attention<'a> {
    pub new_clusters: Vec<(&'a str, &'a TrackedItem)>,
    pub in_progress_clusters: Vec<(&'a str, &'a TrackedItem)>,
    pub new_reports: Vec<(&'a str, &'a TrackedItem)>,
    pub in_progress_reports: Vec<(&'a str, &'a TrackedItem)>,
}

impl Attention<'_> {
    pub fn total(&self) -> usize {
        self.new_clusters.len()
            + self.in_progress_clusters.len()
            + self.new_reports.len()
            + self.in_progress_reports.len()
    }
}

/// The lifecycle state document on disk.
pub struct StateStore {
    path: PathBuf,
    state: ReportState,
}

impl StateStore {
    /// Load `path`. A missing file gives an empty state and malformed JSON is replaced.
    ///
    /// Well-formed JSON with values this version cannot represent is an error,
    /// so a later save never drops tracked items.
    pub fn load(path: &Path) -> Result<Self> {
        let state = match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<serde_json::Value>(&content) {
                Ok(value) => serde_json::from_value(value).map_err(|e| Error::StateFile {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "could not parse state file, starting fresh");
                    ReportState::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ReportState::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            state,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &ReportState {
        &self.state
    }

    pub fn save(&mut self) -> Result<()> {
        self.state.last_updated = Some(Utc::now());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.state)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn mark(
        &mut self,
        kind: ItemKind,
        id: &str,
        status: Status,
        options: &MarkOptions,
    ) -> &TrackedItem {
        self.mark_at(kind, id, status, options, Utc::now())
    }

    /// Record a status change at `now`, creating the item as `new` if unknown.
    pub fn mark_at(
        &mut self,
        kind: ItemKind,
        id: &str,
        status: Status,
        options: &MarkOptions,
        now: DateTime<Utc>,
    ) -> &TrackedItem {
        let item = self
            .state
            .items_mut(kind)
            .entry(id.to_string())
            .or_insert_with(|| TrackedItem::new_at(now));

        item.history.push(StatusChange {
            from_status: item.status,
            to_status: status,
            changed_at: now,
            changed_by: options.by.clone(),
        });
        item.status = status;
        item.updated_at = Some(now);

        if let Some(ref by) = options.by {
            item.last_updated_by = Some(by.clone());
        }
        if let Some(ref notes) = options.notes
            && !notes.is_empty()
        {
            item.notes = Some(notes.clone());
        }
        if let Some(pr) = options.pr
            && pr > 0
        {
            item.pr_number = Some(pr);
        }
        if !options.jira.is_empty() {
            item.jira_tickets = options.jira.clone();
        }

        match status {
            Status::Reviewed => {
                item.reviewed_at = Some(now);
                if options.by.is_some() {
                    item.reviewed_by = options.by.clone();
                }
            }
            Status::InProgress => {
                item.started_at = Some(now);
                if options.by.is_some() {
                    item.assigned_to = options.by.clone();
                }
            }
            Status::Implemented => {
                item.implemented_at = Some(now);
                if options.by.is_some() {
                    item.implemented_by = options.by.clone();
                }
            }
            Status::New | Status::Skipped => {}
        }

        item
    }

    /// Register reports and manifest clusters not seen before as `new`.
    pub fn sync(
        &mut self,
        reports_dir: Option<&Path>,
        clusters_dir: Option<&Path>,
    ) -> Result<SyncStats> {
        let now = Utc::now();
        let mut stats = SyncStats::default();

        if let Some(dir) = reports_dir.filter(|d| d.is_dir()) {
            let mut names: Vec<String> = fs::read_dir(dir)?
                .filter_map(|entry| entry.ok())
                .filter_map(|entry| entry.file_name().into_string().ok())
                .filter(|name| is_commit_report(name))
                .collect();
            names.sort();

            for name in names {
                if self.state.reports.contains_key(&name) {
                    stats.existing += 1;
                    continue;
                }
                let item = TrackedItem {
                    source_file: Some(dir.join(&name).display().to_string()),
                    ..TrackedItem::new_at(now)
                };
                self.state.reports.insert(name, item);
                stats.new_reports += 1;
            }
        }

        let manifest_path = clusters_dir.map(|d| d.join("clusters.json"));
        if let Some(path) = manifest_path.filter(|p| p.is_file()) {
            let manifest: ClusterManifest = serde_json::from_str(&fs::read_to_string(&path)?)?;

            for cluster in manifest.clusters {
                if self.state.clusters.contains_key(&cluster.cluster_id) {
                    stats.existing += 1;
                    continue;
                }
                let item = TrackedItem {
                    name: Some(cluster.name.clone()),
                    report_count: Some(cluster.reports.len()),
                    reports: cluster.reports.iter().map(|r| r.filename.clone()).collect(),
                    ..TrackedItem::new_at(now)
                };
                self.state.clusters.insert(cluster.cluster_id, item);
                stats.new_clusters += 1;
            }
        }

        tracing::debug!(?stats, "state synced");
        Ok(stats)
    }

    /// Items of `kind`, optionally filtered by status, newest first.
    pub fn list(&self, kind: ItemKind, status: Option<Status>) -> Vec<(&str, &TrackedItem)> {
        let mut items: Vec<(&str, &TrackedItem)> = self
            .state
            .items(kind)
            .iter()
            .filter(|(_, item)| status.is_none_or(|s| item.status == s))
            .map(|(id, item)| (id.as_str(), item))
            .collect();
        // Stable: equal timestamps keep id order
        items.sort_by(|a, b| b.1.created_at.cmp(&a.1.created_at));
        items
    }

    pub fn summary(&self, kind: ItemKind) -> StatusCounts {
        let items = self.state.items(kind);
        let counts = Status::ALL
            .iter()
            .map(|s| (*s, items.values().filter(|i| i.status == *s).count()))
            .collect();
        StatusCounts {
            counts,
            total: items.len(),
        }
    }

    pub fn get(&self, kind: ItemKind, id: &str) -> Result<&TrackedItem> {
        self.state
            .items(kind)
            .get(id)
            .ok_or_else(|| Error::NotTracked {
                kind: kind.to_string(),
                id: id.to_string(),
            })
    }

    /// `{"id": ..., ...item}` as printed by `state get`.
    pub fn get_json(&self, kind: ItemKind, id: &str) -> Result<serde_json::Value> {
        let item = self.get(kind, id)?;
        let mut value = serde_json::to_value(item)?;
        if let Some(map) = value.as_object_mut() {
            map.insert("id".into(), serde_json::Value::String(id.to_string()));
        }
        Ok(value)
    }

    pub fn needs_attention(&self) -> Attention<'_> {
        Attention {
            new_clusters: self.list(ItemKind::Cluster, Some(Status::New)),
            in_progress_clusters: self.list(ItemKind::Cluster, Some(Status::InProgress)),
            new_reports: self.list(ItemKind::Report, Some(Status::New)),
            in_progress_reports: self.list(ItemKind::Report, Some(Status::InProgress)),
        }
    }
}
