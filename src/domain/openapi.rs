// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeDetail {
    /// Added or removed path with its HTTP methods.
    Methods(Vec<String>),
    /// Existing path whose operations changed.
    MethodDelta {
        added: Vec<String>,
        removed: Vec<String>,
        modified: Vec<String>,
    },
    /// Added or removed schema.
    Schema {
        schema_type: String,
        properties: Vec<String>,
    },
    /// Existing schema whose properties changed.
    PropertyDelta {
        added: Vec<String>,
        removed: Vec<String>,
        modified: Vec<String>,
    },
    None,
}

/// A single endpoint, schema or parameter change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenApiChange {
    pub name: String,
    pub kind: ChangeKind,
    pub detail: ChangeDetail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenApiAnalysis {
    pub endpoints: Vec<OpenApiChange>,
    pub schemas: Vec<OpenApiChange>,
    pub parameters: Vec<OpenApiChange>,
}

impl OpenApiAnalysis {
    pub fn has_changes(&self) -> bool {
        !(self.endpoints.is_empty() && self.schemas.is_empty() && self.parameters.is_empty())
    }

    /// One-line summary, e.g. `+2 endpoints, ~1 schemas`.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        push_counts(&mut parts, &self.endpoints, "endpoints");
        push_counts(&mut parts, &self.schemas, "schemas");

        if parts.is_empty() {
            "No semantic changes detected".to_string()
        } else {
            parts.join(", ")
        }
    }
}

pub fn count_kind(changes: &[OpenApiChange], kind: ChangeKind) -> usize {
    changes.iter().filter(|c| c.kind == kind).count()
}

fn push_counts(parts: &mut Vec<String>, changes: &[OpenApiChange], noun: &str) {
    for (kind, sign) in [
        (ChangeKind::Added, '+'),
        (ChangeKind::Removed, '-'),
        (ChangeKind::Modified, '~'),
    ] {
        let n = count_kind(changes, kind);
        if n > 0 {
            parts.push(format!("{sign}{n} {noun}"));
        }
    }
}
