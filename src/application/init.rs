//! Initialize workspace use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, MemoirRepository};
use log::info;
use std::fs;
use std::path::Path;

/// Initialize a new memoir at the specified path.
///
/// Only the config is written here. The state document appears with the
/// first change, until then the seed categories live in memory.
pub fn init(path: &Path) -> Result<FileSystemRepository> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;
    repo.save_config(&Config::new())?;

    info!("event=workspace_init root={}", repo.root().display());
    Ok(repo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_config_in_new_directory() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("notes");

        let repo = init(&root).unwrap();

        assert!(repo.is_initialized());
        assert_eq!(repo.root(), root.as_path());
        assert!(root.join(".memoir/config.toml").exists());
        assert!(!root.join(".memoir/memoir-storage.json").exists());
    }

    #[test]
    fn init_twice_fails() {
        let temp = TempDir::new().unwrap();
        init(temp.path()).unwrap();
        assert!(init(temp.path()).is_err());
    }
}
