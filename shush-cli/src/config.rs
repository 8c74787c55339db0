//! Configuration management
//!
//! Config directory: ~/.shush/ (cross-platform)
//!
//! Config file format (~/.shush/config.toml):
//! ```toml
//! [keys]
//! default_key_file = "my.key"
//!
//! [split]
//! threshold = 3
//! shares = 5
//! ```
//!
//! Precedence, highest first: command-line flag, environment variable
//! (`SHUSH_KEY_FILE`, `SHUSH_THRESHOLD`, `SHUSH_SHARES`), config file,
//! built-in default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shush_core::{DEFAULT_SHARES, DEFAULT_THRESHOLD};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Structure of ~/.shush/config.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ShushConfig {
    /// Key file settings
    #[serde(default)]
    pub keys: KeysConfig,

    /// Split defaults
    #[serde(default)]
    pub split: SplitDefaults,
}

/// Key file settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct KeysConfig {
    /// Key used by encrypt/decrypt when `--key` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_key_file: Option<PathBuf>,
}

/// Split defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SplitDefaults {
    /// Shares required to recover the secret
    #[serde(default = "default_threshold")]
    pub threshold: usize,

    /// Shares produced
    #[serde(default = "default_shares")]
    pub shares: usize,
}

impl Default for SplitDefaults {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            shares: default_shares(),
        }
    }
}

fn default_threshold() -> usize {
    DEFAULT_THRESHOLD as usize
}

fn default_shares() -> usize {
    DEFAULT_SHARES as usize
}

/// Get the config directory path (~/.shush/)
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".shush"))
}

/// Get the default config file path
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Resolve `--config` or fall back to the default path
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => config_file_path(),
    }
}

/// Load configuration from `path`
/// Falls back to defaults if the file doesn't exist or can't be parsed
pub fn load_config(path: &Path) -> ShushConfig {
    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return ShushConfig::default();
    }

    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to parse config file");
                ShushConfig::default()
            }
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read config file");
            ShushConfig::default()
        }
    }
}

/// Load configuration for a command
/// Falls back to defaults if no config path can be resolved (e.g. no home directory)
pub fn load_settings(explicit: Option<&Path>) -> ShushConfig {
    match resolve_path(explicit) {
        Ok(path) => load_config(&path),
        Err(e) => {
            debug!(error = %e, "No config path, using defaults");
            ShushConfig::default()
        }
    }
}

/// Save configuration to `path`, creating its directory
pub fn save_config(config: &ShushConfig, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
    }

    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, content).context("Failed to write config file")?;
    Ok(())
}
