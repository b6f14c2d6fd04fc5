//! Diagnostic logging to stderr
//!
//! Level comes from `--verbose` or the `MEMOIR_LOG` environment variable,
//! defaulting to `warn` so normal command output stays clean.

use crate::error::{MemoirError, Result};
use flexi_logger::{Logger, LoggerHandle};
use log::debug;

/// Environment variable holding the log level
pub const LOG_ENV: &str = "MEMOIR_LOG";

const DEFAULT_LEVEL: &str = "warn";

/// Start the logger. Keep the returned handle alive for the process lifetime.
pub fn init_logging(verbose: bool) -> Result<LoggerHandle> {
    let level = if verbose {
        "debug"
    } else {
        match std::env::var(LOG_ENV) {
            Ok(value) => normalize_level(&value)?,
            Err(_) => DEFAULT_LEVEL,
        }
    };

    let handle = Logger::try_with_str(level)
        .map_err(|e| MemoirError::Config(format!("invalid log level '{}': {}", level, e)))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|e| MemoirError::Config(format!("failed to start logger: {}", e)))?;

    debug!(
        "event=logging_init level={} version={}",
        level,
        env!("CARGO_PKG_VERSION")
    );

    Ok(handle)
}

fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" | "" => Ok("off"),
        other => Err(MemoirError::Config(format!(
            "unsupported log level '{}' in {}; expected trace|debug|info|warn|error|off",
            other, LOG_ENV
        ))),
    }
}
