//! Resolve ids typed on the command line
//!
//! Entry ids are UUIDs, so users may type any unique prefix. An exact match
//! always wins over prefix matches.

use crate::error::{MemoirError, Result};

enum Match<'a> {
    None,
    One(&'a str),
    Ambiguous(usize),
}

fn resolve<'a>(ids: impl Iterator<Item = &'a str>, input: &str) -> Match<'a> {
    let input = input.trim();
    if input.is_empty() {
        return Match::None;
    }

    let mut found: Option<&str> = None;
    let mut count = 0usize;
    for id in ids {
        if id == input {
            return Match::One(id);
        }
        if id.starts_with(input) {
            found = Some(id);
            count += 1;
        }
    }

    match (found, count) {
        (Some(id), 1) => Match::One(id),
        (Some(_), n) => Match::Ambiguous(n),
        _ => Match::None,
    }
}

/// Full entry id for an exact id or unique prefix
pub fn resolve_entry_id<'a>(ids: impl Iterator<Item = &'a str>, input: &str) -> Result<String> {
    match resolve(ids, input) {
        Match::One(id) => Ok(id.to_string()),
        Match::None => Err(MemoirError::EntryNotFound(input.to_string())),
        Match::Ambiguous(n) => Err(MemoirError::Validation(format!(
            "Entry id prefix '{}' matches {} entries; type more characters",
            input, n
        ))),
    }
}

/// Full category id for an exact id or unique prefix
pub fn resolve_category_id<'a>(
    ids: impl Iterator<Item = &'a str>,
    input: &str,
) -> Result<String> {
    match resolve(ids, input) {
        Match::One(id) => Ok(id.to_string()),
        Match::None => Err(MemoirError::CategoryNotFound(input.to_string())),
        Match::Ambiguous(n) => Err(MemoirError::Validation(format!(
            "Category id prefix '{}' matches {} categories; type more characters",
            input, n
        ))),
    }
}
