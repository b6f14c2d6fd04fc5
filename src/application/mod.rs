//! Application layer - Use cases and orchestration

pub mod compose;
pub mod entry_store;
pub mod init;
pub mod lookup;
pub mod manage_config;

pub use compose::compose_in_editor;
pub use entry_store::{Clock, EntryStore, SystemClock};
pub use manage_config::ConfigService;

use crate::error::Result;
use crate::infrastructure::{FileStorage, FileSystemRepository};

/// Store backed by the workspace's state file
pub type FileEntryStore = EntryStore<FileStorage>;

/// Open the entry store of a workspace
pub fn open_store(repository: &FileSystemRepository) -> Result<FileEntryStore> {
    EntryStore::open(repository.state_storage())
}
