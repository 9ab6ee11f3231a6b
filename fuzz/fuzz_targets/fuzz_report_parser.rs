// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

#![no_main]

use libfuzzer_sys::fuzz_target;
use sdkwatch::services::report_parser::parse_report;

fuzz_target!(|data: &str| {
    if let Some(meta) = parse_report("fuzz.md", data) {
        assert!(!meta.commit_sha.is_empty());
    }
});
