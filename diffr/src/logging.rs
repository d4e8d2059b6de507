//! File-based tracing setup.
//!
//! The TUI owns the terminal, so log lines never go to stdout or stderr. When
//! `DIFFR_LOG` names a file, events are appended there as plain text;
//! otherwise no subscriber is installed at all.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Env var naming the log file.
pub const LOG_FILE_VAR: &str = "DIFFR_LOG";
/// Env var holding the filter directives (e.g. `debug`, `diffr_core=trace`).
pub const LOG_LEVEL_VAR: &str = "DIFFR_LOG_LEVEL";

/// Installs the global subscriber if `DIFFR_LOG` is set.
///
/// Returns the log file path when logging was enabled.
pub fn init_logging() -> std::io::Result<Option<PathBuf>> {
    let Some(path) = std::env::var_os(LOG_FILE_VAR).filter(|p| !p.is_empty()).map(PathBuf::from)
    else {
        return Ok(None);
    };

    let file = File::options().create(true).append(true).open(&path)?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(LOG_LEVEL_VAR)
        .from_env_lossy();

    let fmt = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(fmt)
        .with(env_filter)
        .try_init()
        .map_err(std::io::Error::other)?;

    Ok(Some(path))
}
