//! Compose entry content in the user's editor

use crate::error::Result;
use crate::infrastructure::{EditorSession, FileSystemRepository, MemoirRepository};

/// Open `initial` in the configured editor and return what was saved.
pub fn compose_in_editor(repository: &FileSystemRepository, initial: &str) -> Result<String> {
    let config = repository.load_config()?;
    let session = EditorSession::new(config.get_editor());
    let scratch = repository.scratch_path(&format!("draft-{}", std::process::id()));
    session.compose(initial, &scratch)
}
