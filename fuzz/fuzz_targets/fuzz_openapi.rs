// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

#![no_main]

use libfuzzer_sys::fuzz_target;
use sdkwatch::services::openapi::{OpenApiDiff, format_openapi, parse_spec};

fuzz_target!(|data: (&str, &str)| {
    let (before, after) = data;
    let before = parse_spec("spec.json", before);
    let after = parse_spec("spec.yaml", after);

    let analysis = OpenApiDiff::compare(before.as_ref(), after.as_ref());
    let _ = format_openapi(&analysis);
    let _ = analysis.summary();
});
