//! Durable storage for the memoir state document

use crate::domain::MemoirState;
use crate::error::{MemoirError, Result};
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the state document inside `.memoir/`
pub const STATE_FILE: &str = "memoir-storage.json";

/// Where the store reads and writes its state.
///
/// `save` replaces the whole document. Any error from `save` is reported to
/// callers as [`MemoirError::Persistence`].
pub trait StateStorage {
    /// Load the last saved state, or `None` on first run.
    fn load(&self) -> Result<Option<MemoirState>>;

    /// Overwrite the stored state.
    fn save(&self, state: &MemoirState) -> Result<()>;
}

impl<S: StateStorage + ?Sized> StateStorage for &S {
    fn load(&self) -> Result<Option<MemoirState>> {
        (**self).load()
    }

    fn save(&self, state: &MemoirState) -> Result<()> {
        (**self).save(state)
    }
}

/// JSON document on disk
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        FileStorage { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write to a temp file in the same directory, then rename into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so the
    /// destination is removed first.
    fn write_atomic(&self, contents: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_name = format!(
            "{}.memoir-tmp-{}",
            self.path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or(STATE_FILE),
            std::process::id()
        );
        let tmp_path = self.path.with_file_name(tmp_name);

        fs::write(&tmp_path, contents)?;

        let replaced = (|| {
            if cfg!(windows) && self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            fs::rename(&tmp_path, &self.path)
        })();

        if replaced.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        replaced
    }
}

impl StateStorage for FileStorage {
    fn load(&self) -> Result<Option<MemoirState>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(MemoirError::Io(e)),
        };

        if contents.trim().is_empty() {
            return Ok(None);
        }

        let state = serde_json::from_str(&contents)?;
        Ok(Some(state))
    }

    fn save(&self, state: &MemoirState) -> Result<()> {
        let contents = serde_json::to_string_pretty(state)
            .map_err(|e| MemoirError::Persistence(format!("cannot serialize state: {}", e)))?;

        self.write_atomic(&contents).map_err(|e| {
            MemoirError::Persistence(format!("cannot write {}: {}", self.path.display(), e))
        })
    }
}

/// State held in memory as a serialized document.
///
/// Writes can be made to fail, which stands in for a full or unavailable
/// disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    document: RefCell<Option<String>>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing serialized document.
    pub fn with_document(document: impl Into<String>) -> Self {
        MemoryStorage {
            document: RefCell::new(Some(document.into())),
            ..Self::default()
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// The serialized document, if anything was written.
    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }

    pub fn clear(&self) {
        self.document.replace(None);
    }
}

impl StateStorage for MemoryStorage {
    fn load(&self) -> Result<Option<MemoirState>> {
        match self.document.borrow().as_deref() {
            Some(document) => Ok(Some(serde_json::from_str(document)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &MemoirState) -> Result<()> {
        if self.fail_writes.get() {
            return Err(MemoirError::Persistence(
                "storage is unavailable".to_string(),
            ));
        }
        let document = serde_json::to_string(state)
            .map_err(|e| MemoirError::Persistence(format!("cannot serialize state: {}", e)))?;
        self.document.replace(Some(document));
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
