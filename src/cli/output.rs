//! Output formatting utilities

use crate::domain::markdown::{excerpt, EXCERPT_CHARS};
use crate::domain::query::Highlighter;
use crate::domain::{Category, Entry};
use chrono::{DateTime, Local, Utc};
use log::debug;

/// Characters of an id shown in lists
const SHORT_ID: usize = 8;

/// Tags shown per row before collapsing into `+N`
const LIST_TAGS: usize = 3;

fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID) {
        Some((index, _)) => &id[..index],
        None => id,
    }
}

fn format_date(time: &DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%B %-d, %Y").to_string()
}

fn format_time(time: &DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%H:%M").to_string()
}

fn format_tags(tags: &[String], max: Option<usize>) -> String {
    let shown = max.unwrap_or(tags.len()).min(tags.len());
    let mut parts: Vec<String> = tags[..shown].iter().map(|t| format!("#{}", t)).collect();
    if tags.len() > shown {
        parts.push(format!("+{}", tags.len() - shown));
    }
    parts.join(" ")
}

/// Format a list of entries for display
pub fn format_entry_list<'a, F>(entries: &[&Entry], category_name: F) -> String
where
    F: Fn(&str) -> &'a str,
{
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        let mut line = format!(
            "{}  {}  {}  [{}]",
            short_id(&entry.id),
            format_date(&entry.updated_at),
            entry.title,
            category_name(&entry.category_id)
        );
        if !entry.tags.is_empty() {
            line.push_str("  ");
            line.push_str(&format_tags(&entry.tags, Some(LIST_TAGS)));
        }
        output.push_str(&line);
        output.push('\n');
    }
    output
}

/// Format a single entry with metadata and full content
pub fn format_entry_detail(entry: &Entry, category_name: &str) -> String {
    let mut output = String::new();
    output.push_str(&entry.title);
    output.push('\n');
    output.push_str(&"=".repeat(entry.title.chars().count().max(1)));
    output.push('\n');
    output.push_str(&format!("Id:       {}\n", entry.id));
    output.push_str(&format!("Created:  {}\n", format_date(&entry.created_at)));
    output.push_str(&format!(
        "Updated:  {} at {}\n",
        format_date(&entry.updated_at),
        format_time(&entry.updated_at)
    ));
    output.push_str(&format!("Category: {}\n", category_name));
    if !entry.tags.is_empty() {
        output.push_str(&format!("Tags:     {}\n", format_tags(&entry.tags, None)));
    }
    if !entry.content.is_empty() {
        output.push('\n');
        output.push_str(&entry.content);
        if !entry.content.ends_with('\n') {
            output.push('\n');
        }
    }
    output
}

/// Format search results with matches wrapped in `**`
pub fn format_search_results<'a, F>(query: &str, results: &[&Entry], category_name: F) -> String
where
    F: Fn(&str) -> &'a str,
{
    if results.is_empty() {
        return format!("No results found for \"{}\"", query);
    }

    let highlighter = match Highlighter::new(query, "**", "**") {
        Ok(h) => Some(h),
        Err(e) => {
            debug!("event=highlight_skipped err={}", e);
            None
        }
    };
    let mark = |text: &str| match &highlighter {
        Some(h) => h.highlight(text),
        None => text.to_string(),
    };

    let plural = if results.len() == 1 { "" } else { "s" };
    let mut output = format!(
        "Found {} result{} for \"{}\"\n",
        results.len(),
        plural,
        query
    );

    for entry in results {
        output.push('\n');
        output.push_str(&format!(
            "{}  {}  [{}]\n",
            short_id(&entry.id),
            mark(&entry.title),
            category_name(&entry.category_id)
        ));
        let preview = excerpt(&entry.content, EXCERPT_CHARS);
        if !preview.is_empty() {
            output.push_str(&format!("    {}\n", mark(&preview)));
        }
        if !entry.tags.is_empty() {
            let tags: Vec<String> = entry
                .tags
                .iter()
                .map(|t| format!("#{}", mark(t)))
                .collect();
            output.push_str(&format!("    {}\n", tags.join(" ")));
        }
    }
    output
}

/// Format tags with their entry counts.
///
/// `any_tags` tells an empty filter result apart from having no tags at all.
pub fn format_tag_counts(tags: &[(String, usize)], any_tags: bool) -> String {
    if tags.is_empty() {
        return if any_tags {
            "No tags match your search".to_string()
        } else {
            "No tags found. Add tags to your entries to see them here".to_string()
        };
    }

    let mut output = String::new();
    for (tag, count) in tags {
        output.push_str(&format!("#{} ({})\n", tag, count));
    }
    output
}

/// Format categories with their entry counts
pub fn format_category_list(categories: &[(&Category, usize)]) -> String {
    if categories.is_empty() {
        return "No categories found".to_string();
    }

    let width = categories
        .iter()
        .map(|(c, _)| short_id(&c.id).chars().count())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for (category, count) in categories {
        let noun = if *count == 1 { "entry" } else { "entries" };
        let mut line = format!(
            "{:<width$}  {} ({} {})",
            short_id(&category.id),
            category.name,
            count,
            noun,
            width = width
        );
        if let Some(description) = &category.description {
            line.push_str(&format!(" - {}", description));
        }
        output.push_str(&line);
        output.push('\n');
    }
    output
}

/// Format a category header followed by its entries
pub fn format_category_detail(category: &Category, entries: &[&Entry]) -> String {
    let mut output = format!("{}\n", category.name);
    if let Some(description) = &category.description {
        output.push_str(&format!("{}\n", description));
    }
    output.push_str(&format!("\nEntries ({})\n", entries.len()));
    if entries.is_empty() {
        output.push_str("No entries in this category yet\n");
    } else {
        output.push_str(&format_entry_list(entries, |_| category.name.as_str()));
    }
    output
}
