//! Merge Command
//!
//! Recombines shard files into the original secret.

use crate::symbols;
use anyhow::{Context, Result};
use console::style;
use shush_core::ops::{self, MergeConfig};
use shush_core::MIN_SHARES;

/// Run merge command
pub fn run(config: MergeConfig) -> Result<()> {
    if config.shard_paths.len() < MIN_SHARES {
        anyhow::bail!(
            "At least {} shards are required, got {}",
            MIN_SHARES,
            config.shard_paths.len()
        );
    }

    let output = ops::merge(&config).context("Failed to merge shards")?;

    println!(
        "{} Recovered {} from {} shards",
        style(symbols::CHECK).green(),
        output.display(),
        config.shard_paths.len()
    );
    println!(
        "{} {}",
        style(symbols::WARN).yellow(),
        style("The threshold is not recorded in the shards; too few shards give wrong output").dim()
    );

    Ok(())
}
