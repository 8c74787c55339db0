//! Split Command
//!
//! Splits a secret file into shard files.

use crate::symbols;
use anyhow::{Context, Result};
use console::style;
use shush_core::ops::{self, SplitConfig};
use shush_core::ShamirConfig;

/// Run split command
pub fn run(config: SplitConfig) -> Result<()> {
    // Reject bad parameters before touching the file
    ShamirConfig::new(config.shares, config.threshold).context("Invalid sharing parameters")?;

    let shards = ops::split(&config)
        .with_context(|| format!("Failed to split {}", config.secret_path.display()))?;

    println!(
        "{} Split {} into {} shards (any {} recover it)",
        style(symbols::CHECK).green(),
        config.secret_path.display(),
        shards.len(),
        config.threshold
    );
    for shard in &shards {
        println!("  {}", shard.display());
    }

    Ok(())
}
