//! File system repository

use crate::error::{MemoirError, Result};
use crate::infrastructure::storage::{FileStorage, STATE_FILE};
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the marker directory holding config and state
pub const MEMOIR_DIR: &str = ".memoir";

/// Abstract repository for workspace operations
pub trait MemoirRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .memoir/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .memoir/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .memoir directory exists
    fn is_initialized(&self) -> bool;

    /// Create .memoir directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of MemoirRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the memoir root.
    /// First checks MEMOIR_ROOT environment variable, then walks up from the
    /// current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("MEMOIR_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_memoir_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(MemoirError::Config(format!(
                    "MEMOIR_ROOT is set to '{}' but no .memoir directory found. \
                    Run 'memoir init' in that directory or unset MEMOIR_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover memoir root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_memoir_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(MemoirError::NotMemoirDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_memoir_dir(path: &Path) -> bool {
        path.join(MEMOIR_DIR).is_dir()
    }

    /// Storage for the entry/category document of this workspace
    pub fn state_storage(&self) -> FileStorage {
        FileStorage::new(self.root.join(MEMOIR_DIR).join(STATE_FILE))
    }

    /// Scratch file used while an entry is open in the editor
    pub fn scratch_path(&self, name: &str) -> PathBuf {
        self.root.join(MEMOIR_DIR).join(format!("{}.md", name))
    }
}

impl MemoirRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_memoir_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let memoir_dir = self.root.join(MEMOIR_DIR);

        if memoir_dir.exists() {
            return Err(MemoirError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&memoir_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::sync::{Mutex, OnceLock};
    use tempfile::TempDir;

    fn env_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    struct EnvVarRestore {
        key: &'static str,
        previous: Option<OsString>,
    }

    impl EnvVarRestore {
        fn capture(key: &'static str) -> Self {
            Self {
                key,
                previous: std::env::var_os(key),
            }
        }
    }

    impl Drop for EnvVarRestore {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                std::env::set_var(self.key, value);
            } else {
                std::env::remove_var(self.key);
            }
        }
    }

    #[test]
    fn test_initialize_creates_memoir_dir() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());

        assert!(!repo.is_initialized());
        repo.initialize().unwrap();

        assert!(repo.is_initialized());
        assert!(temp.path().join(".memoir").is_dir());
    }

    #[test]
    fn test_initialize_twice_fails() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());

        repo.initialize().unwrap();
        assert!(repo.initialize().is_err());
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();

        let subdir = temp.path().join("a").join("b");
        fs::create_dir_all(&subdir).unwrap();

        let found = FileSystemRepository::discover_from(&subdir).unwrap();
        assert_eq!(found.root, temp.path());
    }

    #[test]
    fn test_discover_fails_when_no_memoir() {
        let temp = TempDir::new().unwrap();

        match FileSystemRepository::discover_from(temp.path()) {
            Err(MemoirError::NotMemoirDirectory(path)) => assert_eq!(path, temp.path()),
            other => panic!("Expected NotMemoirDirectory, got {:?}", other),
        }
    }

    #[test]
    fn test_state_storage_lives_under_memoir_dir() {
        let repo = FileSystemRepository::new(PathBuf::from("/tmp/memoir-test"));
        assert_eq!(
            repo.state_storage().path(),
            Path::new("/tmp/memoir-test/.memoir/memoir-storage.json")
        );
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();

        let mut config = Config::new();
        config.limit = 7;
        repo.save_config(&config).unwrap();

        assert_eq!(repo.load_config().unwrap().limit, 7);
    }

    #[test]
    fn test_discover_with_memoir_root_env() {
        let _lock = env_test_lock().lock().unwrap();
        let _restore = EnvVarRestore::capture("MEMOIR_ROOT");

        let temp = TempDir::new().unwrap();
        FileSystemRepository::new(temp.path().to_path_buf())
            .initialize()
            .unwrap();

        std::env::set_var("MEMOIR_ROOT", temp.path());
        let repo = FileSystemRepository::discover().unwrap();
        assert_eq!(repo.root, temp.path());
    }

    #[test]
    fn test_discover_memoir_root_not_initialized() {
        let _lock = env_test_lock().lock().unwrap();
        let _restore = EnvVarRestore::capture("MEMOIR_ROOT");

        let temp = TempDir::new().unwrap();
        std::env::set_var("MEMOIR_ROOT", temp.path());

        match FileSystemRepository::discover() {
            Err(MemoirError::Config(msg)) => assert!(msg.contains("MEMOIR_ROOT")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}
