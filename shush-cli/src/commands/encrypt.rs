//! Encrypt Command
//!
//! Encrypts a file under a key file.

use crate::symbols;
use anyhow::{Context, Result};
use console::style;
use shush_core::ops::{self, EncryptConfig};

/// Run encrypt command
pub fn run(config: EncryptConfig) -> Result<()> {
    let output = ops::encrypt(&config)
        .with_context(|| format!("Failed to encrypt {}", config.input_path.display()))?;

    println!(
        "{} {} Encrypted: {}",
        style(symbols::CHECK).green(),
        symbols::LOCK,
        output.display()
    );

    Ok(())
}
