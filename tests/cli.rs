// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

//! End-to-end tests of the `sdkwatch` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary with config lookups confined to `home`.
fn sdkwatch(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sdkwatch").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("SDKWATCH_PROVIDER")
        .env_remove("SDKWATCH_MODEL")
        .env_remove("RUST_LOG");
    cmd
}

fn write_report(dir: &Path, name: &str, message: &str) {
    let body = format!(
        "# Commit `{stem}`\n\n**Message:** {message}\n**JIRA:** [CQ-1]\n\n## Services Affected\n\n- auth\n",
        stem = name.trim_end_matches(".md")
    );
    std::fs::write(dir.join(name), body).unwrap();
}

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    sdkwatch(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("analyze")
                .and(predicate::str::contains("remote"))
                .and(predicate::str::contains("cluster"))
                .and(predicate::str::contains("state")),
        );
}

#[test]
fn completions_for_bash() {
    let home = TempDir::new().unwrap();
    sdkwatch(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sdkwatch"));
}

#[test]
fn analyze_requires_range_or_since() {
    let home = TempDir::new().unwrap();
    sdkwatch(home.path()).arg("analyze").assert().failure().code(2);
}

#[test]
fn per_commit_conflicts_with_sdk_details() {
    let home = TempDir::new().unwrap();
    sdkwatch(home.path())
        .args(["analyze", "--since", "abc", "--per-commit", "--sdk-details"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn analyze_outside_git_repository() {
    let home = TempDir::new().unwrap();
    sdkwatch(home.path())
        .args(["analyze", "HEAD", "--repo-path"])
        .arg(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a git repository"));
}

#[test]
fn state_lifecycle() {
    let home = TempDir::new().unwrap();
    let reports = home.path().join("reports");
    std::fs::create_dir(&reports).unwrap();
    write_report(&reports, "aaa.md", "first");
    write_report(&reports, "bbb.md", "second");
    std::fs::write(reports.join("00-summary.md"), "summary").unwrap();

    let state = home.path().join("state.json");
    let state_arg = state.to_str().unwrap();

    sdkwatch(home.path())
        .args(["state", "--state-file", state_arg, "sync", "--reports-dir"])
        .arg(&reports)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Synced state: 2 new reports, 0 new clusters",
        ));

    sdkwatch(home.path())
        .args([
            "state",
            "--state-file",
            state_arg,
            "mark",
            "--report",
            "aaa.md",
            "--status",
            "in_progress",
            "--by",
            "agent:sdk",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Marked report 'aaa.md' as 'in_progress'",
        ));

    sdkwatch(home.path())
        .args(["state", "--state-file", state_arg, "get", "--report", "aaa.md"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"id\": \"aaa.md\"")
                .and(predicate::str::contains("\"status\": \"in_progress\""))
                .and(predicate::str::contains("\"assigned_to\": \"agent:sdk\"")),
        );

    sdkwatch(home.path())
        .args(["state", "--state-file", state_arg, "list", "--type", "reports", "--status", "new"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bbb.md").and(predicate::str::contains("aaa.md").not()));

    sdkwatch(home.path())
        .args(["state", "--state-file", state_arg, "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SDK REPORT STATE SUMMARY"));

    sdkwatch(home.path())
        .args(["state", "--state-file", state_arg, "needs-attention"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ITEMS NEEDING ATTENTION"));
}

#[test]
fn state_get_unknown_item_fails() {
    let home = TempDir::new().unwrap();
    let state = home.path().join("state.json");

    sdkwatch(home.path())
        .args(["state", "--state-file", state.to_str().unwrap(), "get", "--cluster", "nope"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn state_mark_needs_a_target() {
    let home = TempDir::new().unwrap();
    sdkwatch(home.path())
        .args(["state", "mark", "--status", "reviewed"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn cluster_writes_outputs() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("reports");
    let output = home.path().join("clusters");
    std::fs::create_dir(&input).unwrap();
    write_report(&input, "aaa.md", "CQ-1 first");
    write_report(&input, "bbb.md", "CQ-1 second");

    sdkwatch(home.path())
        .args(["cluster", "--input-dir"])
        .arg(&input)
        .arg("--output-dir")
        .arg(&output)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("CLUSTERING SUMMARY")
                .and(predicate::str::contains("Multi-report clusters: 1"))
                .and(predicate::str::contains("[1] JIRA CQ-1 Changes: 2 reports")),
        );

    assert!(output.join("00-clusters.md").is_file());
    assert!(output.join("cluster-jira-cq-1.md").is_file());

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output.join("clusters.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["total_reports"], 2);
    assert_eq!(manifest["clusters"][0]["cluster_id"], "jira-cq-1");
}

#[test]
fn cluster_with_empty_input() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("reports");
    std::fs::create_dir(&input).unwrap();

    sdkwatch(home.path())
        .args(["cluster", "--input-dir"])
        .arg(&input)
        .arg("--output-dir")
        .arg(home.path().join("out"))
        .assert()
        .success();

    assert!(!home.path().join("out").exists());
}

#[test]
fn cluster_missing_input_dir() {
    let home = TempDir::new().unwrap();
    sdkwatch(home.path())
        .args(["cluster", "--input-dir", "missing", "--output-dir", "out"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Input directory not found"));
}
