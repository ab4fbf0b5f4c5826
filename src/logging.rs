//! Logger setup.
//!
//! `RUST_LOG` filters as usual. When `REGLAB_LOG` names a file, records are
//! appended there instead of stderr.

use std::fs::OpenOptions;

use env_logger::{Builder, Env, Target};

use crate::error::AppError;

pub const LOG_FILE_ENV: &str = "REGLAB_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Plain commands: log to stderr unless a log file is configured.
    Stderr,
    /// The terminal UI owns the screen: only a log file is allowed.
    Quiet,
}

/// Install the global logger. Returns without installing one for
/// [`LogTarget::Quiet`] when no log file is configured.
pub fn init(target: LogTarget) -> Result<(), AppError> {
    let file = std::env::var_os(LOG_FILE_ENV).filter(|p| !p.is_empty());

    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    match (file, target) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    AppError::config(format!(
                        "Failed to open log file '{}': {e}",
                        path.to_string_lossy()
                    ))
                })?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        (None, LogTarget::Quiet) => return Ok(()),
        (None, LogTarget::Stderr) => {
            builder.target(Target::Stderr);
        }
    }

    // A logger may already be installed (tests, repeated calls).
    let _ = builder.try_init();
    Ok(())
}
