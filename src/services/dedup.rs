// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::collections::HashMap;

const MIN_BLOCK: usize = 2;
const MAX_BLOCK: usize = 20;

/// Marker line emitted before a collapsed block.
pub fn repeat_marker(count: usize) -> String {
    format!("# ⟳ Following block repeated {count}x:")
}

/// Collapse runs of identical lines that repeat elsewhere in the input.
///
/// Longer blocks are claimed first. The first occurrence is kept behind a
/// [`repeat_marker`] and later occurrences are dropped. Trailing whitespace is
/// ignored when comparing lines.
pub fn collapse_repeats<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let normalized: Vec<&str> = lines.iter().map(|l| l.as_ref().trim_end()).collect();
    let n = normalized.len();
    let mut consumed = vec![false; n];
    // (start, len, count)
    let mut blocks: Vec<(usize, usize, usize)> = Vec::new();

    let max_len = MAX_BLOCK.min(n / 2);
    for len in (MIN_BLOCK..=max_len).rev() {
        let mut order: Vec<&[&str]> = Vec::new();
        let mut positions: HashMap<&[&str], Vec<usize>> = HashMap::new();

        for start in 0..=(n - len) {
            if consumed[start..start + len].iter().any(|c| *c) {
                continue;
            }
            let window = &normalized[start..start + len];
            let entry = positions.entry(window).or_default();
            if entry.is_empty() {
                order.push(window);
            }
            entry.push(start);
        }

        for window in order {
            let Some(starts) = positions.get(window) else {
                continue;
            };
            if starts.len() < 2 {
                continue;
            }

            let mut picked: Vec<usize> = Vec::new();
            for &start in starts {
                let free = !consumed[start..start + len].iter().any(|c| *c);
                let clear_of_previous = picked.last().is_none_or(|&prev| start >= prev + len);
                if free && clear_of_previous {
                    picked.push(start);
                }
            }

            if picked.len() > 1 {
                blocks.push((picked[0], len, picked.len()));
                for start in &picked {
                    consumed[*start..*start + len].fill(true);
                }
            }
        }
    }

    blocks.sort_by_key(|b| b.0);

    let mut output = Vec::with_capacity(n);
    let mut blocks = blocks.into_iter().peekable();
    let mut i = 0;
    while i < n {
        if let Some(&(start, len, count)) = blocks.peek()
            && start == i
        {
            output.push(repeat_marker(count));
            output.extend(lines[start..start + len].iter().map(|l| l.as_ref().to_string()));
            i = start + len;
            blocks.next();
        } else if consumed[i] {
            i += 1;
        } else {
            output.push(lines[i].as_ref().to_string());
            i += 1;
        }
    }

    output
}
