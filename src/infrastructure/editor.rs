//! Editor integration for composing entry content

use crate::error::{MemoirError, Result};
use log::debug;
use std::fs;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Session for editing text in an external editor
pub struct EditorSession {
    command: String,
}

impl EditorSession {
    /// Create a new editor session with the given command
    pub fn new(editor_command: String) -> Self {
        EditorSession {
            command: editor_command,
        }
    }

    /// Write `initial` to `scratch`, open it in the editor, wait for the
    /// editor to exit and return the edited text.
    ///
    /// The scratch file is removed afterwards, also when the editor fails.
    pub fn compose(&self, initial: &str, scratch: &Path) -> Result<String> {
        if let Some(parent) = scratch.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(scratch, initial)?;

        let outcome = self
            .run(scratch)
            .and_then(|_| fs::read_to_string(scratch).map_err(MemoirError::Io));

        if let Err(e) = fs::remove_file(scratch) {
            debug!(
                "event=scratch_cleanup status=failed path={} err={}",
                scratch.display(),
                e
            );
        }

        outcome
    }

    /// Run the editor on a file and wait for it to finish
    fn run(&self, file_path: &Path) -> Result<()> {
        let (program, args) = self.parse_command();

        let mut all_args = args;
        all_args.push(file_path.to_string_lossy().to_string());

        debug!("event=editor_launch program={}", program);

        // On Windows, use cmd /c to ensure .bat and .cmd files are found
        #[cfg(windows)]
        let status = Command::new("cmd")
            .arg("/C")
            .arg(&program)
            .args(&all_args)
            .status();

        #[cfg(not(windows))]
        let status = Command::new(&program).args(&all_args).status();

        let status: ExitStatus = status.map_err(|e| {
            MemoirError::Editor(format!("Failed to launch editor '{}': {}", program, e))
        })?;

        if !status.success() {
            return Err(MemoirError::Editor(format!(
                "Editor '{}' exited with {}; entry left unchanged",
                program, status
            )));
        }

        Ok(())
    }

    /// Parse command into program and arguments
    fn parse_command(&self) -> (String, Vec<String>) {
        let parts: Vec<&str> = self.command.split_whitespace().collect();

        if parts.is_empty() {
            return ("notepad".to_string(), vec![]);
        }

        let program = parts[0].to_string();
        let args = parts[1..].iter().map(|s| s.to_string()).collect();

        (program, args)
    }
}
