//! Config management use case

use crate::domain::SortOrder;
use crate::error::{MemoirError, Result};
use crate::infrastructure::{Config, FileSystemRepository, MemoirRepository};

/// Keys accepted by `memoir config`
pub const CONFIG_KEYS: &str = "editor, sort, limit, created";

/// Service for managing workspace configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "editor" => Ok(config.editor.clone()),
            "sort" => Ok(config.sort.to_string()),
            "limit" => Ok(config.limit.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "editor" => {
                config.editor = value.to_string();
            }
            "sort" => {
                config.sort = value.parse::<SortOrder>()?;
            }
            "limit" => {
                config.limit = parse_limit(value)?;
            }
            "created" => {
                return Err(MemoirError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => return Err(unknown_key(key)),
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

fn unknown_key(key: &str) -> MemoirError {
    MemoirError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key, CONFIG_KEYS
    ))
}

fn parse_limit(value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(MemoirError::Validation(format!(
            "Invalid limit: '{}'. Expected a positive number",
            value
        ))),
    }
}
