// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::collections::{BTreeMap, BTreeSet};

use super::{Category, FileChange};

#[derive(Debug, Clone)]
pub struct CategoryResult {
    pub category: Category,
    pub files: Vec<FileChange>,
}

impl CategoryResult {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            files: Vec::new(),
        }
    }

    pub fn total_additions(&self) -> usize {
        self.files.iter().map(|f| f.additions).sum()
    }

    pub fn total_deletions(&self) -> usize {
        self.files.iter().map(|f| f.deletions).sum()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files sorted by path, as listed in reports.
    pub fn sorted_files(&self) -> Vec<&FileChange> {
        let mut files: Vec<_> = self.files.iter().collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        files
    }
}

/// Microservice touched by a diff.
#[derive(Debug, Clone, Default)]
pub struct ServiceImpact {
    pub name: String,
    pub files: Vec<FileChange>,
    pub categories: BTreeSet<Category>,
}

impl ServiceImpact {
    /// Category names in alphabetical order.
    pub fn category_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.categories.iter().map(|c| c.as_str()).collect();
        names.sort_unstable();
        names
    }
}

#[derive(Debug, Clone)]
pub struct DiffAnalysis {
    pub commit_range: String,
    pub repo_path: String,
    /// One entry per category, in [`Category::ALL`] order.
    pub categories: Vec<CategoryResult>,
    pub services: BTreeMap<String, ServiceImpact>,
    pub uncategorized: Vec<FileChange>,
    pub total_files: usize,
    pub total_additions: usize,
    pub total_deletions: usize,
}

impl DiffAnalysis {
    pub fn new(commit_range: impl Into<String>, repo_path: impl Into<String>) -> Self {
        Self {
            commit_range: commit_range.into(),
            repo_path: repo_path.into(),
            categories: Category::ALL.into_iter().map(CategoryResult::new).collect(),
            services: BTreeMap::new(),
            uncategorized: Vec::new(),
            total_files: 0,
            total_additions: 0,
            total_deletions: 0,
        }
    }

    pub fn category(&self, category: Category) -> &CategoryResult {
        // categories is always built from Category::ALL, so the lookup cannot miss
        &self.categories[category as usize]
    }

    pub fn category_mut(&mut self, category: Category) -> &mut CategoryResult {
        &mut self.categories[category as usize]
    }

    /// Non-empty categories ordered by priority.
    pub fn populated_categories(&self) -> Vec<&CategoryResult> {
        let mut populated: Vec<_> = self.categories.iter().filter(|c| !c.is_empty()).collect();
        populated.sort_by_key(|c| c.category.priority());
        populated
    }

    pub fn has_sdk_changes(&self) -> bool {
        Category::SDK_RELEVANT
            .iter()
            .any(|c| !self.category(*c).is_empty())
    }

    /// `openapi_specs(2), models(1)` style impact list over SDK-relevant categories.
    pub fn sdk_impact(&self) -> Vec<(Category, usize)> {
        Category::SDK_RELEVANT
            .iter()
            .map(|c| (*c, self.category(*c).file_count()))
            .filter(|(_, n)| *n > 0)
            .collect()
    }
}
