// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

mod analysis;
mod category;
mod change;
mod cluster;
mod openapi;
mod state;

pub use analysis::*;
pub use category::*;
pub use change::*;
pub use cluster::*;
pub use openapi::*;
pub use state::*;
