//! The persisted shape of a memoir: every entry and every category

use crate::domain::category::{seed_categories, Category, DEFAULT_CATEGORY_ID};
use crate::domain::entry::Entry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Full collection, serialized wholesale as one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoirState {
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// What [`MemoirState::repair`] had to fix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Repairs {
    pub restored_default: bool,
    pub reassigned_entries: Vec<String>,
}

impl Repairs {
    pub fn is_empty(&self) -> bool {
        !self.restored_default && self.reassigned_entries.is_empty()
    }
}

impl MemoirState {
    /// First-run state: seed categories, no entries.
    pub fn seeded() -> Self {
        MemoirState {
            entries: Vec::new(),
            categories: seed_categories(),
        }
    }

    /// Restore the referential invariants on a state loaded from storage.
    ///
    /// The default category is put back at the front if missing, and
    /// entries pointing at unknown categories move to the default one.
    pub fn repair(&mut self) -> Repairs {
        let mut repairs = Repairs::default();

        if !self.categories.iter().any(Category::is_default) {
            self.categories.insert(0, Category::uncategorized());
            repairs.restored_default = true;
        }

        let known: HashSet<&str> = self.categories.iter().map(|c| c.id.as_str()).collect();
        let dangling: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !known.contains(e.category_id.as_str()))
            .map(|(i, _)| i)
            .collect();

        for index in dangling {
            let entry = &mut self.entries[index];
            entry.category_id = DEFAULT_CATEGORY_ID.to_string();
            repairs.reassigned_entries.push(entry.id.clone());
        }

        repairs
    }
}
