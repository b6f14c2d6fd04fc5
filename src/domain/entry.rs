//! Entry records

use crate::domain::category::DEFAULT_CATEGORY_ID;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single markdown note with its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_category_id")]
    pub category_id: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_category_id() -> String {
    DEFAULT_CATEGORY_ID.to_string()
}

impl Entry {
    /// Exact, case-sensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Merge the supplied fields into this entry and stamp `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the clock does.
    pub fn apply(&mut self, patch: EntryPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(tags) = patch.tags {
            self.tags = dedup_tags(tags);
        }
        self.touch(now);
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.updated_at);
    }
}

/// Fields for creating an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub title: String,
    pub content: String,
    pub category_id: String,
    pub tags: Vec<String>,
}

impl NewEntry {
    pub fn new(title: impl Into<String>) -> Self {
        NewEntry {
            title: title.into(),
            content: String::new(),
            category_id: DEFAULT_CATEGORY_ID.to_string(),
            tags: Vec::new(),
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = category_id.into();
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn into_entry(self, id: String, now: DateTime<Utc>) -> Entry {
        Entry {
            id,
            title: self.title,
            content: self.content,
            category_id: self.category_id,
            tags: dedup_tags(self.tags),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for an entry; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl EntryPatch {
    pub fn title(title: impl Into<String>) -> Self {
        EntryPatch {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.category_id.is_none()
            && self.tags.is_none()
    }
}

/// Drop repeated tags. The first occurrence keeps its slot; tags are
/// otherwise stored verbatim.
pub fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}
