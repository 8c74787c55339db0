//! Decrypt Command
//!
//! Decrypts a `.shush` file under a key file.

use crate::symbols;
use anyhow::{Context, Result};
use console::style;
use shush_core::ops::{self, DecryptConfig};

/// Run decrypt command
pub fn run(config: DecryptConfig) -> Result<()> {
    let output = ops::decrypt(&config)
        .with_context(|| format!("Failed to decrypt {}", config.input_path.display()))?;

    println!(
        "{} Decrypted: {}",
        style(symbols::CHECK).green(),
        output.display()
    );

    Ok(())
}
