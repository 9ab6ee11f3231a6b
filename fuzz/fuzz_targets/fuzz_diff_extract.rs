// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

#![no_main]

use libfuzzer_sys::fuzz_target;
use sdkwatch::services::dedup::collapse_repeats;
use sdkwatch::services::extract::{changed_lines, endpoint_changes, proto_changes};

fuzz_target!(|data: &str| {
    let _ = endpoint_changes(data);
    let _ = proto_changes(data);

    let lines = changed_lines(data);
    let collapsed = collapse_repeats(&lines);
    let markers = collapsed.iter().filter(|l| l.starts_with("# ⟳")).count();
    assert!(collapsed.len() - markers <= lines.len());
});
