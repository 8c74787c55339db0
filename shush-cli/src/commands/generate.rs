//! Generate Command
//!
//! Creates a new random key file.

use crate::symbols;
use anyhow::{Context, Result};
use console::style;
use shush_core::ops::{self, GenerateConfig};

/// Run generate command
pub fn run(config: GenerateConfig) -> Result<()> {
    let path = ops::generate(&config)
        .with_context(|| format!("Failed to generate key {}", config.key_path.display()))?;

    println!(
        "{} {} Generated key: {}",
        style(symbols::CHECK).green(),
        symbols::KEY,
        path.display()
    );
    println!(
        "  {}",
        style("Keep it safe, or split it with 'shush split'").dim()
    );

    Ok(())
}
