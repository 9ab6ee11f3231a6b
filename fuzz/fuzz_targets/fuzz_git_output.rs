// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

#![no_main]

use libfuzzer_sys::fuzz_target;
use sdkwatch::services::git::{
    CommitRange, parse_commit_list, parse_file_commits, parse_name_status, parse_numstat,
};

fuzz_target!(|data: &str| {
    let _ = parse_name_status(data);
    let _ = parse_numstat(data);
    let _ = parse_file_commits(data);
    let _ = parse_commit_list(data);

    let range = CommitRange::parse(data);
    let _ = range.git_arg();
});
