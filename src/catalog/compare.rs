// src/catalog/compare.rs
// =============================================================================
// Side-by-side comparison of languages.
//
// ComparisonSelection holds up to three language ids, and a comparison needs
// at least two. Toggling an id removes
// it if it's already there, adds it if there's room, and otherwise leaves the
// selection alone and says it's full.
//
// ComparisonTable turns the fetched languages into rows (one per attribute)
// with one column per language, ready to print.
// =============================================================================

use crate::models::LanguageRecord;
use serde::Serialize;

/// Most languages that can be compared at once
pub const MAX_COMPARED: usize = 3;

/// Fewest languages that make a comparison
pub const MIN_COMPARED: usize = 2;

/// What a toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    Full,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonSelection {
    ids: Vec<u64>,
}

impl ComparisonSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: u64) -> Toggle {
        if let Some(index) = self.ids.iter().position(|selected| *selected == id) {
            self.ids.remove(index);
            Toggle::Removed
        } else if self.ids.len() < MAX_COMPARED {
            self.ids.push(id);
            Toggle::Added
        } else {
            Toggle::Full
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    /// An id can be picked if it's selected already or there's room left
    pub fn can_select(&self, id: u64) -> bool {
        self.contains(id) || !self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_COMPARED
    }

    /// Enough languages are selected to compare them
    pub fn is_ready(&self) -> bool {
        self.ids.len() >= MIN_COMPARED
    }

    /// Selected ids in the order they were picked
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub attribute: &'static str,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonTable {
    pub languages: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn build(languages: &[LanguageRecord]) -> Self {
        let column = |f: fn(&LanguageRecord) -> String| -> Vec<String> {
            languages.iter().map(f).collect()
        };

        let rows = vec![
            ComparisonRow {
                attribute: "Popularity",
                values: column(|l| format!("{}/100", l.popularity_index)),
            },
            ComparisonRow {
                attribute: "Released",
                values: column(|l| l.release_year.to_string()),
            },
            ComparisonRow {
                attribute: "Salary",
                values: column(|l| l.salary_range.compact()),
            },
            ComparisonRow {
                attribute: "Average salary",
                values: column(|l| format!("${}", l.salary_range.average())),
            },
            ComparisonRow {
                attribute: "Top use case",
                values: column(|l| l.use_cases.first().cloned().unwrap_or_else(|| "-".to_string())),
            },
            ComparisonRow {
                attribute: "Top advantage",
                values: column(|l| l.advantages.first().cloned().unwrap_or_else(|| "-".to_string())),
            },
        ];

        Self {
            languages: languages.iter().map(|l| l.name.clone()).collect(),
            rows,
        }
    }
}
