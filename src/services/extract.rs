// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

//! Pull REST endpoint and protobuf definitions out of unified diffs.

use std::sync::LazyLock;

use regex::Regex;

static ENDPOINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^([+-])\s*@(Get|Post|Put|Delete|Patch)Mapping\s*\(\s*["']([^"']+)["']"#,
    )
    .unwrap()
});

static PROTO_MESSAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([+-])\s*message\s+(\w+)").unwrap());

static PROTO_RPC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([+-])\s*rpc\s+(\w+)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    Added,
    Removed,
}

impl LineChange {
    fn from_sign(sign: &str) -> Self {
        if sign == "+" {
            Self::Added
        } else {
            Self::Removed
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Added => "➕",
            Self::Removed => "➖",
        }
    }
}

/// A Spring mapping annotation added or removed in a controller diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointChange {
    pub method: String,
    pub path: String,
    pub change: LineChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtoKind {
    Message,
    Rpc,
}

impl ProtoKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Rpc => "rpc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoChange {
    pub kind: ProtoKind,
    pub name: String,
    pub change: LineChange,
}

impl EndpointChange {
    /// `  - ➕ `GET /api/v1/things``
    pub fn list_line(&self) -> String {
        format!("  - {} `{} {}`", self.change.icon(), self.method, self.path)
    }
}

impl ProtoChange {
    pub fn list_line(&self) -> String {
        format!(
            "  - {} `{} {}`",
            self.change.icon(),
            self.kind.as_str(),
            self.name
        )
    }
}

/// Endpoint changes in diff order, added ones first.
pub fn endpoint_changes(diff: &str) -> Vec<EndpointChange> {
    let mut changes: Vec<EndpointChange> = ENDPOINT
        .captures_iter(diff)
        .map(|caps| EndpointChange {
            method: caps[2].to_uppercase(),
            path: caps[3].to_string(),
            change: LineChange::from_sign(&caps[1]),
        })
        .collect();
    changes.sort_by_key(|c| c.change == LineChange::Removed);
    changes
}

/// Message changes followed by rpc changes.
pub fn proto_changes(diff: &str) -> Vec<ProtoChange> {
    let collect = |re: &Regex, kind: ProtoKind| -> Vec<ProtoChange> {
        re.captures_iter(diff)
            .map(|caps| ProtoChange {
                kind,
                name: caps[2].to_string(),
                change: LineChange::from_sign(&caps[1]),
            })
            .collect()
    };

    let mut changes = collect(&PROTO_MESSAGE, ProtoKind::Message);
    changes.extend(collect(&PROTO_RPC, ProtoKind::Rpc));
    changes
}

/// `+`/`-` content lines of a unified diff, without the `+++`/`---` headers.
pub fn changed_lines(diff: &str) -> Vec<&str> {
    diff.lines()
        .filter(|l| {
            (l.starts_with('+') && !l.starts_with("+++"))
                || (l.starts_with('-') && !l.starts_with("---"))
        })
        .collect()
}
