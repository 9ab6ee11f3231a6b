// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use sdkwatch::domain::ChangeStatus;
use sdkwatch::services::git::{
    CommitRange, parse_commit_list, parse_file_commits, parse_name_status, parse_numstat,
    resolve_rename_path,
};

// ─── Ranges ──────────────────────────────────────────────────────────────────

#[test]
fn bare_revision_means_parent_range() {
    let range = CommitRange::parse("abc123");
    assert_eq!(range.before, "abc123^");
    assert_eq!(range.after, "abc123");
    assert!(!range.is_range());
    assert_eq!(range.git_arg(), "abc123^..abc123");
}

#[test]
fn two_dot_range() {
    let range = CommitRange::parse("HEAD~5..HEAD");
    assert_eq!(range.before, "HEAD~5");
    assert_eq!(range.after, "HEAD");
    assert!(range.is_range());
    assert_eq!(range.git_arg(), "HEAD~5..HEAD");
}

#[test]
fn three_dot_range_splits_on_three_dots() {
    let range = CommitRange::parse("main...feature");
    assert_eq!(range.before, "main");
    assert_eq!(range.after, "feature");
    assert!(range.is_range());
}

#[test]
fn open_ended_range_defaults_to_head() {
    let range = CommitRange::parse("abc..");
    assert_eq!(range.after, "HEAD");
}

// ─── name-status / numstat ───────────────────────────────────────────────────

#[test]
fn name_status_with_rename() {
    let output = "M\tsrc/a.kt\nA\tsrc/b.kt\nD\tsrc/c.kt\nR087\told/d.kt\tnew/d.kt\n";
    let changes = parse_name_status(output);

    assert_eq!(changes.len(), 4);
    assert_eq!(changes[0].status, ChangeStatus::Modified);
    assert_eq!(changes[1].status, ChangeStatus::Added);
    assert_eq!(changes[2].status, ChangeStatus::Deleted);
    assert_eq!(changes[3].status, ChangeStatus::Renamed);
    assert_eq!(changes[3].path, "new/d.kt");
    assert_eq!(changes[3].old_path.as_deref(), Some("old/d.kt"));
}

#[test]
fn name_status_skips_malformed_lines() {
    assert!(parse_name_status("\n\ngarbage\n").is_empty());
}

#[test]
fn numstat_counts_and_binary() {
    let stats = parse_numstat("3\t1\tsrc/a.kt\n-\t-\tlogo.png\n");
    assert_eq!(stats["src/a.kt"], (3, 1));
    assert_eq!(stats["logo.png"], (0, 0));
}

#[test]
fn numstat_rename_notations() {
    assert_eq!(resolve_rename_path("old.kt => new.kt"), "new.kt");
    assert_eq!(
        resolve_rename_path("src/{old => new}/File.kt"),
        "src/new/File.kt"
    );
    assert_eq!(resolve_rename_path("src/{ => sub}/File.kt"), "src/sub/File.kt");
    assert_eq!(resolve_rename_path("src/{sub => }/File.kt"), "src/File.kt");
    assert_eq!(resolve_rename_path("plain/path.kt"), "plain/path.kt");
}

// ─── log parsing ─────────────────────────────────────────────────────────────

#[test]
fn file_commits_map_paths_to_commits() {
    let output = "\
COMMIT:aaaa|first change
src/a.kt
src/b.kt

COMMIT:bbbb|second | with pipe
src/a.kt
";
    let map = parse_file_commits(output);

    assert_eq!(map["src/a.kt"].len(), 2);
    assert_eq!(map["src/b.kt"].len(), 1);
    assert_eq!(map["src/a.kt"][1].hash, "bbbb");
    assert_eq!(map["src/a.kt"][1].message, "second | with pipe");
}

#[test]
fn file_lines_before_any_commit_are_ignored() {
    assert!(parse_file_commits("orphan.kt\n").is_empty());
}

#[test]
fn commit_list_newest_first_as_given() {
    let commits = parse_commit_list("c3|third\nc2|second\nnot a commit\nc1|first\n");
    let hashes: Vec<&str> = commits.iter().map(|c| c.hash.as_str()).collect();
    assert_eq!(hashes, vec!["c3", "c2", "c1"]);
}
