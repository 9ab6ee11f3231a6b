// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::domain::{ChangeDetail, ChangeKind, OpenApiAnalysis, OpenApiChange};

/// Operation keys of a path item, in report order. Other keys (`trace`,
/// `parameters`, `summary`) do not count as endpoints.
const HTTP_METHODS: [&str; 7] = ["get", "post", "put", "delete", "patch", "options", "head"];
const PROPERTY_CAP: usize = 10;
const PROPERTY_PREVIEW: usize = 5;

/// Parse a spec as YAML for `.yaml`/`.yml` paths, JSON otherwise.
///
/// Anything that fails to parse is treated as absent.
pub fn parse_spec(path: &str, content: &str) -> Option<Value> {
    let lower = path.to_ascii_lowercase();
    let parsed = if lower.ends_with(".yaml") || lower.ends_with(".yml") {
        serde_yaml::from_str::<Value>(content).ok()
    } else {
        serde_json::from_str::<Value>(content).ok()
    };

    if parsed.is_none() {
        tracing::debug!(path, "spec did not parse, treating as empty");
    }
    parsed
}

/// Structural comparison of two OpenAPI documents.
pub struct OpenApiDiff;

impl OpenApiDiff {
    pub fn compare(before: Option<&Value>, after: Option<&Value>) -> OpenApiAnalysis {
        let empty = Map::new();
        let before = before.and_then(Value::as_object).unwrap_or(&empty);
        let after = after.and_then(Value::as_object).unwrap_or(&empty);

        if before.is_empty() && after.is_empty() {
            return OpenApiAnalysis::default();
        }

        OpenApiAnalysis {
            endpoints: Self::paths(object(before, &["paths"]), object(after, &["paths"])),
            schemas: Self::schemas(
                object(before, &["components", "schemas"]),
                object(after, &["components", "schemas"]),
            ),
            parameters: Self::parameters(
                object(before, &["components", "parameters"]),
                object(after, &["components", "parameters"]),
            ),
        }
    }

    fn paths(before: &Map<String, Value>, after: &Map<String, Value>) -> Vec<OpenApiChange> {
        let mut changes = Vec::new();

        for path in union_keys(before, after) {
            let change = match (before.get(path), after.get(path)) {
                (None, Some(item)) => Some((ChangeKind::Added, ChangeDetail::Methods(methods(item)))),
                (Some(item), None) => {
                    Some((ChangeKind::Removed, ChangeDetail::Methods(methods(item))))
                }
                (Some(old), Some(new)) => {
                    let old_methods = methods(old);
                    let new_methods = methods(new);

                    let added: Vec<String> = new_methods
                        .iter()
                        .filter(|m| !old_methods.contains(*m))
                        .cloned()
                        .collect();
                    let removed: Vec<String> = old_methods
                        .iter()
                        .filter(|m| !new_methods.contains(*m))
                        .cloned()
                        .collect();
                    let modified: Vec<String> = HTTP_METHODS
                        .iter()
                        .filter(|m| {
                            let (o, n) = (old.get(**m), new.get(**m));
                            o.is_some() && n.is_some() && o != n
                        })
                        .map(|m| m.to_uppercase())
                        .collect();

                    if added.is_empty() && removed.is_empty() && modified.is_empty() {
                        None
                    } else {
                        Some((
                            ChangeKind::Modified,
                            ChangeDetail::MethodDelta {
                                added,
                                removed,
                                modified,
                            },
                        ))
                    }
                }
                (None, None) => None,
            };

            if let Some((kind, detail)) = change {
                changes.push(OpenApiChange {
                    name: path.clone(),
                    kind,
                    detail,
                });
            }
        }

        changes
    }

    fn schemas(before: &Map<String, Value>, after: &Map<String, Value>) -> Vec<OpenApiChange> {
        let mut changes = Vec::new();

        for name in union_keys(before, after) {
            let change = match (before.get(name), after.get(name)) {
                (None, Some(schema)) => Some((
                    ChangeKind::Added,
                    ChangeDetail::Schema {
                        schema_type: schema_type(schema),
                        properties: properties(schema)
                            .keys()
                            .take(PROPERTY_CAP)
                            .cloned()
                            .collect(),
                    },
                )),
                (Some(schema), None) => Some((
                    ChangeKind::Removed,
                    ChangeDetail::Schema {
                        schema_type: schema_type(schema),
                        properties: Vec::new(),
                    },
                )),
                (Some(old), Some(new)) if old != new => {
                    let old_props = properties(old);
                    let new_props = properties(new);
                    let capped = |names: Vec<&String>| -> Vec<String> {
                        names.into_iter().take(PROPERTY_CAP).cloned().collect()
                    };

                    Some((
                        ChangeKind::Modified,
                        ChangeDetail::PropertyDelta {
                            added: capped(
                                new_props.keys().filter(|k| !old_props.contains_key(*k)).collect(),
                            ),
                            removed: capped(
                                old_props.keys().filter(|k| !new_props.contains_key(*k)).collect(),
                            ),
                            modified: capped(
                                old_props
                                    .iter()
                                    .filter(|(k, v)| new_props.get(*k).is_some_and(|n| n != *v))
                                    .map(|(k, _)| k)
                                    .collect(),
                            ),
                        },
                    ))
                }
                _ => None,
            };

            if let Some((kind, detail)) = change {
                changes.push(OpenApiChange {
                    name: name.clone(),
                    kind,
                    detail,
                });
            }
        }

        changes
    }

    fn parameters(before: &Map<String, Value>, after: &Map<String, Value>) -> Vec<OpenApiChange> {
        union_keys(before, after)
            .into_iter()
            .filter_map(|name| {
                let kind = match (before.get(name), after.get(name)) {
                    (None, Some(_)) => ChangeKind::Added,
                    (Some(_), None) => ChangeKind::Removed,
                    (Some(old), Some(new)) if old != new => ChangeKind::Modified,
                    _ => return None,
                };
                Some(OpenApiChange {
                    name: name.clone(),
                    kind,
                    detail: ChangeDetail::None,
                })
            })
            .collect()
    }
}

fn object<'a>(root: &'a Map<String, Value>, keys: &[&str]) -> &'a Map<String, Value> {
    static EMPTY: std::sync::LazyLock<Map<String, Value>> = std::sync::LazyLock::new(Map::new);

    let mut current = root;
    for key in keys {
        match current.get(*key).and_then(Value::as_object) {
            Some(next) => current = next,
            None => return &*EMPTY,
        }
    }
    current
}

fn union_keys<'a>(a: &'a Map<String, Value>, b: &'a Map<String, Value>) -> BTreeSet<&'a String> {
    a.keys().chain(b.keys()).collect()
}

/// Upper-cased HTTP methods of a path item, in canonical order.
fn methods(item: &Value) -> Vec<String> {
    HTTP_METHODS
        .iter()
        .filter(|m| item.get(**m).is_some())
        .map(|m| m.to_uppercase())
        .collect()
}

fn schema_type(schema: &Value) -> String {
    schema
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("object")
        .to_string()
}

fn properties(schema: &Value) -> Map<String, Value> {
    schema
        .get("properties")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

/// Markdown block describing semantic OpenAPI changes.
pub fn format_openapi(analysis: &OpenApiAnalysis) -> Vec<String> {
    let mut lines = Vec::new();

    if !analysis.has_changes() {
        lines.push("*No semantic API changes detected (possibly formatting/comments only)*".into());
        return lines;
    }

    if !analysis.endpoints.is_empty() {
        lines.push("**Endpoint Changes:**".into());
        lines.push(String::new());
        for (kind, heading) in KIND_HEADINGS {
            let group: Vec<_> = analysis.endpoints.iter().filter(|e| e.kind == kind).collect();
            if group.is_empty() {
                continue;
            }
            lines.push(heading.into());
            for endpoint in group {
                lines.push(endpoint_line(endpoint));
            }
            lines.push(String::new());
        }
    }

    if !analysis.schemas.is_empty() {
        lines.push("**Schema Changes:**".into());
        lines.push(String::new());
        for (kind, heading) in KIND_HEADINGS {
            let group: Vec<_> = analysis.schemas.iter().filter(|s| s.kind == kind).collect();
            if group.is_empty() {
                continue;
            }
            lines.push(heading.into());
            for schema in group {
                schema_lines(schema, &mut lines);
            }
            lines.push(String::new());
        }
    }

    if !analysis.parameters.is_empty() {
        let parts: Vec<String> = [
            (ChangeKind::Added, '+'),
            (ChangeKind::Removed, '-'),
            (ChangeKind::Modified, '~'),
        ]
        .into_iter()
        .filter_map(|(kind, sign)| {
            let n = crate::domain::count_kind(&analysis.parameters, kind);
            (n > 0).then(|| format!("{sign}{n}"))
        })
        .collect();
        lines.push(format!("**Parameter Changes:** {}", parts.join(", ")));
        lines.push(String::new());
    }

    lines
}

const KIND_HEADINGS: [(ChangeKind, &str); 3] = [
    (ChangeKind::Added, "*Added:*"),
    (ChangeKind::Removed, "*Removed:*"),
    (ChangeKind::Modified, "*Modified:*"),
];

fn endpoint_line(endpoint: &OpenApiChange) -> String {
    match (&endpoint.kind, &endpoint.detail) {
        (ChangeKind::Added, ChangeDetail::Methods(m)) => {
            format!("- ➕ `{}` [{}]", endpoint.name, m.join(", "))
        }
        (ChangeKind::Removed, ChangeDetail::Methods(m)) => {
            format!("- ➖ `{}` [{}]", endpoint.name, m.join(", "))
        }
        (
            _,
            ChangeDetail::MethodDelta {
                added,
                removed,
                modified,
            },
        ) => {
            let mut parts = Vec::new();
            if !added.is_empty() {
                parts.push(format!("+{}", added.join(",")));
            }
            if !removed.is_empty() {
                parts.push(format!("-{}", removed.join(",")));
            }
            if !modified.is_empty() {
                parts.push(format!("~{}", modified.join(",")));
            }
            format!("- 📝 `{}` [{}]", endpoint.name, parts.join(", "))
        }
        _ => format!("- 📝 `{}`", endpoint.name),
    }
}

fn schema_lines(schema: &OpenApiChange, lines: &mut Vec<String>) {
    match (&schema.kind, &schema.detail) {
        (ChangeKind::Added, ChangeDetail::Schema { properties, .. }) => {
            let hint = if properties.is_empty() {
                String::new()
            } else {
                format!(" ({} props)", properties.len())
            };
            lines.push(format!("- ➕ `{}`{hint}", schema.name));
        }
        (ChangeKind::Removed, _) => lines.push(format!("- ➖ `{}`", schema.name)),
        (
            _,
            ChangeDetail::PropertyDelta {
                added,
                removed,
                modified,
            },
        ) => {
            let mut parts = Vec::new();
            if !added.is_empty() {
                parts.push(format!("+{} props", added.len()));
            }
            if !removed.is_empty() {
                parts.push(format!("-{} props", removed.len()));
            }
            if !modified.is_empty() {
                parts.push(format!("~{} props", modified.len()));
            }
            let summary = if parts.is_empty() {
                String::new()
            } else {
                format!(" [{}]", parts.join(", "))
            };
            lines.push(format!("- 📝 `{}`{summary}", schema.name));

            for (props, icon) in [(added, "➕"), (removed, "➖")] {
                for prop in props.iter().take(PROPERTY_PREVIEW) {
                    lines.push(format!("    - {icon} `{prop}`"));
                }
                if props.len() > PROPERTY_PREVIEW {
                    lines.push(format!(
                        "    - ... and {} more",
                        props.len() - PROPERTY_PREVIEW
                    ));
                }
            }
        }
        _ => lines.push(format!("- 📝 `{}`", schema.name)),
    }
}
