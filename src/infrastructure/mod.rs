//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod editor;
pub mod logging;
pub mod repository;
pub mod storage;

pub use config::Config;
pub use editor::EditorSession;
pub use repository::{FileSystemRepository, MemoirRepository};
pub use storage::{FileStorage, MemoryStorage, StateStorage};
