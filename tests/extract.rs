// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use sdkwatch::services::extract::{
    LineChange, ProtoKind, changed_lines, endpoint_changes, proto_changes,
};

const CONTROLLER_DIFF: &str = r#"diff --git a/UserController.kt b/UserController.kt
--- a/UserController.kt
+++ b/UserController.kt
@@ -10,7 +10,9 @@ class UserController {
-    @GetMapping("/api/v1/users")
+    @GetMapping("/api/v2/users")
     fun list() = service.list()
+    @PostMapping(value = "/ignored")
+    @DeleteMapping('/api/v2/users/{id}')
     // @PutMapping("/not/a/change")
"#;

#[test]
fn endpoints_added_before_removed() {
    let changes = endpoint_changes(CONTROLLER_DIFF);

    assert_eq!(changes.len(), 3);
    assert_eq!(changes[0].method, "GET");
    assert_eq!(changes[0].path, "/api/v2/users");
    assert_eq!(changes[0].change, LineChange::Added);
    assert_eq!(changes[1].method, "DELETE");
    assert_eq!(changes[1].path, "/api/v2/users/{id}");
    assert_eq!(changes[2].path, "/api/v1/users");
    assert_eq!(changes[2].change, LineChange::Removed);
}

#[test]
fn endpoint_list_line() {
    let changes = endpoint_changes("+@PatchMapping(\"/x\")\n");
    assert_eq!(changes[0].list_line(), "  - ➕ `PATCH /x`");
}

#[test]
fn proto_messages_then_rpcs() {
    let diff = "\
+message CreateScanRequest {
-message OldRequest {
+  rpc CreateScan(CreateScanRequest) returns (Scan);
 message Unchanged {
";
    let changes = proto_changes(diff);

    assert_eq!(changes.len(), 3);
    assert_eq!(changes[0].kind, ProtoKind::Message);
    assert_eq!(changes[0].name, "CreateScanRequest");
    assert_eq!(changes[1].name, "OldRequest");
    assert_eq!(changes[1].change, LineChange::Removed);
    assert_eq!(changes[2].kind, ProtoKind::Rpc);
    assert_eq!(changes[2].list_line(), "  - ➕ `rpc CreateScan`");
}

#[test]
fn changed_lines_skip_file_headers() {
    let lines = changed_lines(CONTROLLER_DIFF);
    assert!(lines.iter().all(|l| !l.starts_with("+++") && !l.starts_with("---")));
    assert_eq!(lines.len(), 4);
}

#[test]
fn empty_diff_yields_nothing() {
    assert!(endpoint_changes("").is_empty());
    assert!(proto_changes("").is_empty());
    assert!(changed_lines("").is_empty());
}
