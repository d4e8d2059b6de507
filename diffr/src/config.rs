//! User configuration for diffr.
//!
//! Read once at startup from `$XDG_CONFIG_HOME/diffr/config.toml`. Every key
//! is optional; a missing file gives the defaults, and a malformed one is a
//! soft failure logged as a warning.

use std::path::{Path, PathBuf};

use diffr_core::PagerCommand;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::cli::Cli;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: String,
    /// Program the diff is piped through. Empty disables the pager.
    pub pager: String,
    pub pager_args: Vec<String>,
    /// Rows shown by the commit and file lists.
    pub visible_rows: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_owned(),
            pager: "delta".to_owned(),
            pager_args: Vec::new(),
            visible_rows: 10,
        }
    }
}

impl Config {
    /// Loads the config file at the default location.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Loads `path`, falling back to defaults when it is absent or invalid.
    pub fn load_from(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no config file, using defaults");
                return Self::default();
            }
        };
        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config parse error, using defaults");
                Self::default()
            }
        }
    }

    /// Applies command-line overrides on top of the file values.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(theme) = &cli.theme {
            self.theme = theme.clone();
        }
        if let Some(pager) = &cli.pager {
            self.pager = pager.clone();
        }
        self
    }

    /// The pager to run, or `None` when paging is disabled.
    pub fn pager_command(&self) -> Option<PagerCommand> {
        PagerCommand::from_program(&self.pager, self.pager_args.clone())
    }
}

/// Returns the path to the diffr config file.
///
/// Prefers `$XDG_CONFIG_HOME/diffr/config.toml`; falls back to
/// `~/.config/diffr/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("diffr").join("config.toml")
}
