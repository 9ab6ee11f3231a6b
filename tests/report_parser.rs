// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

mod helpers;

use proptest::prelude::*;
use tempfile::TempDir;

use sdkwatch::Error;
use sdkwatch::domain::{Category, ImpactLevel};
use sdkwatch::services::report_parser::{is_commit_report, load_reports, parse_report};

use helpers::full_sha;

fn handwritten() -> String {
    format!(
        "\
# Commit `1a2b3c4d5e6f`

**Message:** CQ-101 Add scan endpoints (CQ-102)
**Author:** Dev
**Full SHA:** `{}`
**JIRA:** [CQ-101](https://jira/CQ-101), [CQ-102](https://jira/CQ-102)

## SDK-Relevant Changes

### 🔴 Openapi Specs

- 📝 `microservices/scan/src/test/resources/openapi/open-api-spec.json` (+10/-2)

**Endpoint Changes:**

*Added:*
- ➕ `/api/v1/scans` [POST]

*Removed:*
- ➖ `/api/v1/old`

**Schema Changes:**

*Modified:*
- 📝 `Scan` [+1 props]
    - ➕ `status`

### 🟡 Models

- 🆕 `microservices/scan/src/main/kotlin/model/Scan.kt` (+20/-0)

### Proto Files

- 📝 `proto-files/scan/proto/scan.proto` (+3/-0)
  - ➕ `message ScanRequest`
  - ➕ `rpc StartScan`

## Services Affected

- scan
- proto
",
        full_sha("1a2b3c4d5e6f")
    )
}

#[test]
fn parses_handwritten_report() {
    let meta = parse_report("1a2b3c4d5e6f.md", &handwritten()).unwrap();

    assert_eq!(meta.commit_sha, "1a2b3c4d5e6f");
    assert_eq!(meta.message, "CQ-101 Add scan endpoints (CQ-102)");
    assert_eq!(meta.jira_tickets, vec!["CQ-101", "CQ-102"]);
    assert_eq!(meta.services, vec!["scan", "proto"]);
    assert_eq!(
        meta.change_categories,
        vec![Category::OpenapiSpecs, Category::Models, Category::ProtoFiles]
    );
    assert_eq!(meta.impact_level, ImpactLevel::Critical);

    assert_eq!(meta.openapi_changes.endpoints_added, vec!["/api/v1/scans"]);
    assert_eq!(meta.openapi_changes.endpoints_removed, vec!["/api/v1/old"]);
    assert_eq!(meta.openapi_changes.schemas_modified, vec!["Scan"]);
    assert!(meta.openapi_changes.schemas_added.is_empty());

    assert_eq!(
        meta.proto_changes,
        vec!["➕ `message ScanRequest`", "➕ `rpc StartScan`"]
    );
    assert!(
        meta.files_changed
            .contains(&"proto-files/scan/proto/scan.proto".to_string())
    );
    assert!(
        meta.files_changed
            .contains(&"microservices/scan/src/main/kotlin/model/Scan.kt".to_string())
    );
}

#[test]
fn falls_back_to_file_stem_without_full_sha() {
    let meta = parse_report("deadbeef.md", "# Commit\n\n**Message:** fix\n").unwrap();
    assert_eq!(meta.commit_sha, "deadbeef");
    assert_eq!(meta.message, "fix");
    assert!(meta.services.is_empty());
    assert_eq!(meta.impact_level, ImpactLevel::Low);
}

#[test]
fn bold_service_items() {
    let markdown = "### Services Affected\n\n- **auth** (2 files): controllers\n- **scan** (1 files): models\n\n## Next\n- **nope**\n";
    let meta = parse_report("x.md", markdown).unwrap();
    assert_eq!(meta.services, vec!["auth", "scan"]);
}

#[test]
fn summary_files_are_not_reports() {
    assert!(!is_commit_report("00-summary.md"));
    assert!(!is_commit_report("00-clusters.md"));
    assert!(!is_commit_report("notes.txt"));
    assert!(is_commit_report("abc123.md"));
    assert!(parse_report("00-summary.md", &handwritten()).is_none());
}

#[test]
fn load_reports_sorted_and_filtered() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("b.md"), "**Message:** second\n").unwrap();
    std::fs::write(dir.path().join("a.md"), "**Message:** first\n").unwrap();
    std::fs::write(dir.path().join("00-summary.md"), "summary").unwrap();
    std::fs::write(dir.path().join("clusters.json"), "{}").unwrap();
    std::fs::create_dir(dir.path().join("nested.md")).unwrap();

    let reports = load_reports(dir.path()).unwrap();
    let names: Vec<&str> = reports.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(names, vec!["a.md", "b.md"]);
    assert_eq!(reports[0].message, "first");
}

#[test]
fn load_reports_missing_dir() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    assert!(matches!(
        load_reports(&missing),
        Err(Error::InputDirMissing { .. })
    ));
}

proptest! {
    #[test]
    fn never_panics(markdown in "\\PC{0,400}") {
        let _ = parse_report("fuzz.md", &markdown);
    }

    #[test]
    fn never_panics_on_report_like_lines(
        lines in prop::collection::vec(
            prop_oneof![
                Just("**Endpoint Changes:**".to_string()),
                Just("**Schema Changes:**".to_string()),
                Just("### Services Affected".to_string()),
                Just("- ".to_string()),
                Just("- **".to_string()),
                "- (➕|➖|📝) `[a-z/]{0,8}`",
                "[#]{0,4} [A-Za-z ]{0,12}",
            ],
            0..30,
        )
    ) {
        let _ = parse_report("fuzz.md", &lines.join("\n"));
    }
}
