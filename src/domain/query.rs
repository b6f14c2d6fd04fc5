//! Derived read queries over entries
//!
//! Nothing here is owned state. Tags in particular are never stored on their
//! own; every tag listing is a scan over the entries.
//!
//! # Examples
//!
//! ```
//! use memoir::domain::query::{EntryQuery, SortOrder};
//!
//! let query = EntryQuery::new().search("rust").sort(SortOrder::TitleAsc);
//! assert_eq!(query.sort, SortOrder::TitleAsc);
//! ```

use crate::domain::entry::Entry;
use crate::error::{MemoirError, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Number of entries on the home view.
pub const RECENT_LIMIT: usize = 5;

/// Order in which entry lists are presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Most recently updated first
    #[default]
    #[serde(rename = "newest")]
    Newest,
    /// Least recently updated first
    #[serde(rename = "oldest")]
    Oldest,
    #[serde(rename = "a-z")]
    TitleAsc,
    #[serde(rename = "z-a")]
    TitleDesc,
}

impl SortOrder {
    pub fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        match self {
            SortOrder::Newest => b.updated_at.cmp(&a.updated_at),
            SortOrder::Oldest => a.updated_at.cmp(&b.updated_at),
            SortOrder::TitleAsc => compare_titles(&a.title, &b.title),
            SortOrder::TitleDesc => compare_titles(&b.title, &a.title),
        }
    }
}

/// Case-insensitive first, raw bytes as tie-breaker.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl FromStr for SortOrder {
    type Err = MemoirError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "a-z" | "az" | "title" => Ok(SortOrder::TitleAsc),
            "z-a" | "za" => Ok(SortOrder::TitleDesc),
            other => Err(MemoirError::Validation(format!(
                "Invalid sort order: '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::TitleAsc => "a-z",
            SortOrder::TitleDesc => "z-a",
        };
        f.write_str(name)
    }
}

/// Case-insensitive substring match over title, content and tags.
///
/// An empty needle matches every entry.
pub fn matches_text(entry: &Entry, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    entry.title.to_lowercase().contains(&needle)
        || entry.content.to_lowercase().contains(&needle)
        || entry
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

/// Filter, sort and limit options for listing entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryQuery {
    pub search: Option<String>,
    pub category_id: Option<String>,
    pub sort: SortOrder,
    pub limit: Option<usize>,
}

impl EntryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        let category_ok = self
            .category_id
            .as_deref()
            .map_or(true, |id| entry.category_id == id);
        let text_ok = self
            .search
            .as_deref()
            .map_or(true, |text| matches_text(entry, text));
        category_ok && text_ok
    }

    /// Run the query. Sorting is stable, so equal keys keep insertion order.
    pub fn apply<'a>(&self, entries: &'a [Entry]) -> Vec<&'a Entry> {
        let mut selected: Vec<&Entry> = entries.iter().filter(|e| self.matches(e)).collect();
        selected.sort_by(|a, b| self.sort.compare(a, b));
        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}

/// Search view semantics: blank queries find nothing.
pub fn search<'a>(entries: &'a [Entry], text: &str) -> Vec<&'a Entry> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    entries.iter().filter(|e| matches_text(e, text)).collect()
}

/// Newest `limit` entries by update time.
pub fn recent(entries: &[Entry], limit: usize) -> Vec<&Entry> {
    EntryQuery::new().limit(limit).apply(entries)
}

/// Distinct tags across all entries, case-sensitive, sorted.
pub fn distinct_tags(entries: &[Entry]) -> Vec<String> {
    entries
        .iter()
        .flat_map(|e| e.tags.iter().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Every distinct tag with the number of entries carrying it.
///
/// `filter` narrows tag names by case-insensitive substring.
pub fn tag_counts(entries: &[Entry], filter: Option<&str>) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in entries {
        for tag in &entry.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let filter = filter.map(str::to_lowercase);
    counts
        .into_iter()
        .filter(|(tag, _)| {
            filter
                .as_deref()
                .map_or(true, |f| tag.to_lowercase().contains(f))
        })
        .map(|(tag, count)| (tag.to_string(), count))
        .collect()
}

/// Wraps case-insensitive occurrences of a literal query in markers
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
    open: String,
    close: String,
}

impl Highlighter {
    pub fn new(query: &str, open: &str, close: &str) -> Result<Self> {
        let pattern = if query.trim().is_empty() {
            None
        } else {
            let regex = RegexBuilder::new(&regex::escape(query))
                .case_insensitive(true)
                .build()
                .map_err(|e| MemoirError::Validation(format!("Unusable search text: {}", e)))?;
            Some(regex)
        };
        Ok(Highlighter {
            pattern,
            open: open.to_string(),
            close: close.to_string(),
        })
    }

    pub fn highlight(&self, text: &str) -> String {
        match &self.pattern {
            Some(pattern) => pattern
                .replace_all(text, |caps: &regex::Captures<'_>| {
                    format!("{}{}{}", self.open, &caps[0], self.close)
                })
                .into_owned(),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::NewEntry;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn entry(id: &str, title: &str, category: &str, tags: &[&str], updated: i64) -> Entry {
        let mut e = NewEntry::new(title)
            .category(category)
            .tags(tags.iter().copied())
            .into_entry(id.to_string(), at(0));
        e.updated_at = at(updated);
        e
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry("e1", "Ownership", "rust", &["rust", "memory"], 30),
            entry("e2", "async basics", "rust", &["Async"], 10),
            entry("e3", "Closures", "javascript", &["js"], 20),
        ]
    }

    fn ids(entries: &[&Entry]) -> Vec<String> {
        entries.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn sort_order_from_str() {
        assert_eq!("newest".parse::<SortOrder>().unwrap(), SortOrder::Newest);
        assert_eq!("Z-A".parse::<SortOrder>().unwrap(), SortOrder::TitleDesc);
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn default_query_sorts_newest_first() {
        let entries = sample();
        assert_eq!(ids(&EntryQuery::new().apply(&entries)), vec!["e1", "e3", "e2"]);
    }

    #[test]
    fn oldest_first() {
        let entries = sample();
        let result = EntryQuery::new().sort(SortOrder::Oldest).apply(&entries);
        assert_eq!(ids(&result), vec!["e2", "e3", "e1"]);
    }

    #[test]
    fn title_sorts_ignore_case() {
        let entries = sample();
        let asc = EntryQuery::new().sort(SortOrder::TitleAsc).apply(&entries);
        assert_eq!(ids(&asc), vec!["e2", "e3", "e1"]);
        let desc = EntryQuery::new().sort(SortOrder::TitleDesc).apply(&entries);
        assert_eq!(ids(&desc), vec!["e1", "e3", "e2"]);
    }

    #[test]
    fn search_covers_title_content_and_tags() {
        let mut entries = sample();
        entries[2].content = "Lexical SCOPE rules".to_string();

        assert_eq!(ids(&search(&entries, "owner")), vec!["e1"]);
        assert_eq!(ids(&search(&entries, "scope")), vec!["e3"]);
        assert_eq!(ids(&search(&entries, "ASYNC")), vec!["e2"]);
        assert!(search(&entries, "   ").is_empty());
    }

    #[test]
    fn category_filter_and_limit() {
        let entries = sample();
        let result = EntryQuery::new().category("rust").limit(1).apply(&entries);
        assert_eq!(ids(&result), vec!["e1"]);
    }

    #[test]
    fn empty_search_on_list_matches_all() {
        let entries = sample();
        assert_eq!(EntryQuery::new().search("").apply(&entries).len(), 3);
    }

    #[test]
    fn recent_caps_results() {
        let entries = sample();
        assert_eq!(ids(&recent(&entries, 2)), vec!["e1", "e3"]);
    }

    #[test]
    fn distinct_tags_are_sorted_and_case_sensitive() {
        let mut entries = sample();
        entries[2].tags.push("rust".to_string());
        assert_eq!(distinct_tags(&entries), vec!["Async", "js", "memory", "rust"]);
    }

    #[test]
    fn tag_counts_with_filter() {
        let mut entries = sample();
        entries[2].tags.push("rust".to_string());

        let all = tag_counts(&entries, None);
        assert!(all.contains(&("rust".to_string(), 2)));
        assert!(all.contains(&("js".to_string(), 1)));

        let filtered = tag_counts(&entries, Some("AS"));
        assert_eq!(filtered, vec![("Async".to_string(), 1)]);
    }

    #[test]
    fn highlighter_marks_every_match_literally() {
        let h = Highlighter::new("c++", "[", "]").unwrap();
        assert_eq!(h.highlight("C++ and c++"), "[C++] and [c++]");

        let blank = Highlighter::new(" ", "[", "]").unwrap();
        assert_eq!(blank.highlight("text"), "text");
    }
}
