// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

pub mod classifier;
pub mod cluster;
pub mod dedup;
pub mod extract;
pub mod git;
pub mod github;
pub mod llm;
pub mod openapi;
pub mod refine;
pub mod report;
pub mod report_parser;
pub mod state;
