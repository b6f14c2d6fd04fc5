//! Error types for memoir

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for memoir
#[derive(Debug, Error)]
pub enum MemoirError {
    #[error("Not a memoir directory: {0}")]
    NotMemoirDirectory(PathBuf),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("The default category cannot be {0}")]
    ProtectedCategory(&'static str),

    /// The durable write did not complete. In-memory state still holds the
    /// mutation.
    #[error("Failed to save: {0}")]
    Persistence(String),

    /// A new record is held in memory under `id` but was not written.
    #[error("Created {id} but failed to save: {reason}")]
    Unsaved { id: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("State file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl MemoirError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            MemoirError::NotMemoirDirectory(_) => 2,
            MemoirError::EntryNotFound(_) | MemoirError::CategoryNotFound(_) => 3,
            MemoirError::Validation(_) | MemoirError::ProtectedCategory(_) => 4,
            MemoirError::Persistence(_) | MemoirError::Unsaved { .. } => 5,
            _ => 1,
        }
    }

    /// True for lookups that referenced an absent id
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MemoirError::EntryNotFound(_) | MemoirError::CategoryNotFound(_)
        )
    }

    /// Id of a record that was created in memory but not written
    pub fn unsaved_id(&self) -> Option<&str> {
        match self {
            MemoirError::Unsaved { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            MemoirError::NotMemoirDirectory(path) => {
                format!(
                    "Not a memoir directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'memoir init' in this directory to create a new memoir\n\
                    • Navigate to an existing memoir directory\n\
                    • Set MEMOIR_ROOT environment variable to your memoir path",
                    path.display()
                )
            }
            MemoirError::EntryNotFound(id) => {
                format!(
                    "Entry not found: '{}'\n\n\
                    The entry doesn't exist or has been deleted.\n\n\
                    Suggestions:\n\
                    • Use 'memoir list' to see entry ids\n\
                    • Use 'memoir search <text>' to find an entry by content",
                    id
                )
            }
            MemoirError::CategoryNotFound(id) => {
                format!(
                    "Category not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'memoir category list' to see category ids\n\
                    • Create it first: memoir category add <name>",
                    id
                )
            }
            MemoirError::Persistence(msg) => {
                format!(
                    "Failed to save: {}\n\n\
                    Your last change was not written to disk.\n\
                    • Check free disk space and permissions on the .memoir directory",
                    msg
                )
            }
            MemoirError::Unsaved { id, reason } => {
                format!(
                    "Failed to save: {}\n\n\
                    Created {} but it was not written to disk.\n\
                    • Check free disk space and permissions on the .memoir directory",
                    reason, id
                )
            }
            MemoirError::Editor(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that your editor is installed and in PATH\n\
                    • Set EDITOR environment variable (e.g., export EDITOR=nano)\n\
                    • Configure editor: memoir config editor 'vim'",
                    msg
                )
            }
            MemoirError::Validation(msg) if msg.contains("sort") => {
                format!(
                    "Validation error: {}\n\n\
                    Valid sort orders: newest, oldest, a-z, z-a\n\
                    Example: memoir list --sort a-z",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using MemoirError
pub type Result<T> = std::result::Result<T, MemoirError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_memoir_directory_suggestion() {
        let err = MemoirError::NotMemoirDirectory(PathBuf::from("/tmp/test"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("memoir init"));
        assert!(msg.contains("MEMOIR_ROOT"));
        assert!(msg.contains("Suggestions"));
    }

    #[test]
    fn test_entry_not_found_suggestions() {
        let err = MemoirError::EntryNotFound("abc".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("'abc'"));
        assert!(msg.contains("memoir list"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_sort_suggestions() {
        let err = MemoirError::Validation("Invalid sort order: up".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("newest, oldest, a-z, z-a"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(MemoirError::NotMemoirDirectory(PathBuf::new()).exit_code(), 2);
        assert_eq!(MemoirError::CategoryNotFound("x".into()).exit_code(), 3);
        assert_eq!(MemoirError::ProtectedCategory("deleted").exit_code(), 4);
        assert_eq!(MemoirError::Persistence("disk full".into()).exit_code(), 5);
        assert_eq!(MemoirError::Config("bad".into()).exit_code(), 1);
    }

    #[test]
    fn test_unsaved_carries_id() {
        let err = MemoirError::Unsaved {
            id: "e1".into(),
            reason: "disk full".into(),
        };
        assert_eq!(err.exit_code(), 5);
        assert_eq!(err.unsaved_id(), Some("e1"));
        assert!(err.display_with_suggestions().contains("Created e1"));
        assert_eq!(MemoirError::Persistence("x".into()).unsaved_id(), None);
    }

    #[test]
    fn test_protected_category_message() {
        let err = MemoirError::ProtectedCategory("renamed");
        assert_eq!(err.to_string(), "The default category cannot be renamed");
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = MemoirError::Config("Config error".to_string());
        let msg = err.display_with_suggestions();
        assert_eq!(msg, "Configuration error: Config error");
    }
}
