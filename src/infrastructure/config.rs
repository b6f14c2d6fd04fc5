//! Configuration management

use crate::domain::SortOrder;
use crate::error::{MemoirError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILE: &str = "config.toml";

/// Default number of rows in `memoir list`
pub const DEFAULT_LIST_LIMIT: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub editor: String,
    #[serde(default)]
    pub sort: SortOrder,
    #[serde(default = "default_limit")]
    pub limit: usize,
    pub created: DateTime<Utc>,
}

fn default_limit() -> usize {
    DEFAULT_LIST_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            editor: Self::detect_default_editor(),
            sort: SortOrder::default(),
            limit: DEFAULT_LIST_LIMIT,
            created: Utc::now(),
        }
    }

    /// Load config from .memoir/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(".memoir").join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MemoirError::NotMemoirDirectory(path.to_path_buf())
            } else {
                MemoirError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| MemoirError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .memoir/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let memoir_dir = path.join(".memoir");
        let config_path = memoir_dir.join(CONFIG_FILE);

        if !memoir_dir.exists() {
            fs::create_dir(&memoir_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| MemoirError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Editor command: `$EDITOR`, then `$VISUAL`, then the configured one
    pub fn get_editor(&self) -> String {
        env_editor().unwrap_or_else(|| self.editor.clone())
    }

    fn detect_default_editor() -> String {
        env_editor().unwrap_or_else(|| FALLBACK_EDITOR.to_string())
    }
}

#[cfg(windows)]
const FALLBACK_EDITOR: &str = "notepad";
#[cfg(not(windows))]
const FALLBACK_EDITOR: &str = "nano";

fn env_editor() -> Option<String> {
    ["EDITOR", "VISUAL"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_config() {
        let config = Config::new();
        assert_eq!(config.sort, SortOrder::Newest);
        assert_eq!(config.limit, DEFAULT_LIST_LIMIT);
        assert!(!config.editor.is_empty());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::new();
        config.sort = SortOrder::TitleDesc;

        config.save_to_dir(temp.path()).unwrap();

        assert!(temp.path().join(".memoir").exists());
        assert!(temp.path().join(".memoir/config.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();

        assert_eq!(loaded.sort, SortOrder::TitleDesc);
        assert_eq!(loaded.editor, config.editor);
        assert_eq!(loaded.created, config.created);
    }

    #[test]
    fn test_sort_is_written_as_cli_name() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::new();
        config.sort = SortOrder::TitleAsc;
        config.save_to_dir(temp.path()).unwrap();

        let contents = fs::read_to_string(temp.path().join(".memoir/config.toml")).unwrap();
        assert!(contents.contains("sort = \"a-z\""));
    }

    #[test]
    fn test_missing_optional_keys_use_defaults() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".memoir")).unwrap();
        fs::write(
            temp.path().join(".memoir/config.toml"),
            "editor = \"vim\"\ncreated = \"2025-01-17T10:00:00Z\"\n",
        )
        .unwrap();

        let config = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(config.editor, "vim");
        assert_eq!(config.sort, SortOrder::Newest);
        assert_eq!(config.limit, DEFAULT_LIST_LIMIT);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        let result = Config::load_from_dir(temp.path());

        match result.unwrap_err() {
            MemoirError::NotMemoirDirectory(_) => {}
            _ => panic!("Expected NotMemoirDirectory error"),
        }
    }

    #[test]
    fn test_default_editor_detection() {
        let editor = Config::detect_default_editor();
        assert!(editor == FALLBACK_EDITOR || env_editor().as_deref() == Some(editor.as_str()));
    }
}
