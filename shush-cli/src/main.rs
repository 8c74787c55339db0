//! shush CLI
//!
//! Command-line tool for protecting secret files.
//!
//! # Commands
//! - `generate` - Create a new random key file
//! - `split` - Split a file into threshold shards
//! - `merge` - Recombine shards into the original file
//! - `encrypt` - Encrypt a file under a key file
//! - `decrypt` - Decrypt a `.shush` file
//! - `config` - Show or initialize configuration
//!
//! # Configuration
//! Config file: ~/.shush/config.toml

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use shush_core::ops::{DecryptConfig, EncryptConfig, GenerateConfig, MergeConfig, SplitConfig};
use std::path::{Path, PathBuf};

mod commands;
mod config;
mod symbols;

use commands::{decrypt, encrypt, generate, merge, split};
use config::ShushConfig;

#[derive(Parser)]
#[command(name = "shush")]
#[command(about = "Split secrets into shards and encrypt files")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.shush/config.toml)
    #[arg(long = "config", global = true, value_name = "PATH")]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new random 256-bit key file
    Generate {
        /// Path of the key file to create
        key_file: PathBuf,
    },

    /// Split a file into shards, any THRESHOLD of which recover it
    Split {
        /// File to split
        file: PathBuf,

        /// Shards required to recover the file
        #[arg(short, long, env = "SHUSH_THRESHOLD")]
        threshold: Option<usize>,

        /// Shards to produce
        #[arg(short, long, env = "SHUSH_SHARES")]
        shares: Option<usize>,
    },

    /// Recombine shards into the original file
    Merge {
        /// Shard files (e.g. secret.key.shard0 secret.key.shard3 ...)
        #[arg(required = true, num_args = 2..)]
        shards: Vec<PathBuf>,
    },

    /// Encrypt a file, writing FILE.shush
    Encrypt {
        /// File to encrypt
        file: PathBuf,

        /// Key file (overrides config file)
        #[arg(short, long, env = "SHUSH_KEY_FILE")]
        key: Option<PathBuf>,
    },

    /// Decrypt a FILE.shush, writing FILE
    Decrypt {
        /// Encrypted file
        file: PathBuf,

        /// Key file (overrides config file)
        #[arg(short, long, env = "SHUSH_KEY_FILE")]
        key: Option<PathBuf>,
    },

    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    /// Whether this command reads the config file
    fn uses_config(&self) -> bool {
        !matches!(self, Commands::Generate { .. } | Commands::Merge { .. })
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

/// Initialize logging (RUST_LOG wins over --verbose)
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Load configuration from ~/.shush/config.toml or --config
    let cfg = if cli.command.uses_config() {
        config::load_settings(cli.config_file.as_deref())
    } else {
        ShushConfig::default()
    };

    match cli.command {
        Commands::Generate { key_file } => {
            generate::run(GenerateConfig { key_path: key_file })?;
        }

        Commands::Split {
            file,
            threshold,
            shares,
        } => {
            // CLI args override config file
            let config = SplitConfig {
                secret_path: file,
                shares: shares.unwrap_or(cfg.split.shares),
                threshold: threshold.unwrap_or(cfg.split.threshold),
            };
            split::run(config)?;
        }

        Commands::Merge { shards } => {
            merge::run(MergeConfig {
                shard_paths: shards,
            })?;
        }

        Commands::Encrypt { file, key } => {
            let config = EncryptConfig {
                key_path: resolve_key_file(key, &cfg)?,
                input_path: file,
            };
            encrypt::run(config)?;
        }

        Commands::Decrypt { file, key } => {
            let config = DecryptConfig {
                key_path: resolve_key_file(key, &cfg)?,
                input_path: file,
            };
            decrypt::run(config)?;
        }

        Commands::Config { command } => {
            let config_path = config::resolve_path(cli.config_file.as_deref())?;
            handle_config_command(command, &config_path, &cfg)?;
        }
    }

    Ok(())
}

/// Pick the key file from `--key`/`SHUSH_KEY_FILE` or the config file
fn resolve_key_file(flag: Option<PathBuf>, cfg: &ShushConfig) -> Result<PathBuf> {
    flag.or_else(|| cfg.keys.default_key_file.clone())
        .context("No key file given. Pass --key, set SHUSH_KEY_FILE, or set keys.default_key_file in the config file")
}

/// Handle config subcommands
fn handle_config_command(
    command: Option<ConfigCommands>,
    path: &Path,
    cfg: &ShushConfig,
) -> Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("{}", style("shush Configuration").bold().underlined());
            println!();
            println!("{}", style("[keys]").cyan());
            match &cfg.keys.default_key_file {
                Some(key) => println!("  default_key_file = \"{}\"", key.display()),
                None => println!("  default_key_file = {}", style("(unset)").dim()),
            }
            println!();
            println!("{}", style("[split]").cyan());
            println!("  threshold = {}", cfg.split.threshold);
            println!("  shares = {}", cfg.split.shares);
            println!();

            println!("{} {}", style("Config file:").dim(), path.display());
            if !path.exists() {
                println!(
                    "{} Run '{}' to create it",
                    style("(not created yet)").yellow(),
                    style("shush config init").green()
                );
            }
        }

        Some(ConfigCommands::Path) => {
            println!("{}", path.display());
        }

        Some(ConfigCommands::Init { force }) => {
            if path.exists() && !force {
                println!(
                    "{} Config file already exists at {}",
                    style(symbols::WARN).yellow(),
                    path.display()
                );
                println!("Use --force to overwrite");
                return Ok(());
            }

            config::save_config(&ShushConfig::default(), path)?;
            println!(
                "{} Config file created at {}",
                style(symbols::CHECK).green(),
                path.display()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_merge_needs_two_shards() {
        assert!(Cli::try_parse_from(["shush", "merge", "a.shard0"]).is_err());
        assert!(Cli::try_parse_from(["shush", "merge", "a.shard0", "a.shard1"]).is_ok());
    }

    #[test]
    fn test_split_flags() {
        let cli = Cli::try_parse_from(["shush", "split", "-t", "2", "-s", "4", "secret.key"]).unwrap();
        match cli.command {
            Commands::Split {
                file,
                threshold,
                shares,
            } => {
                assert_eq!(file, PathBuf::from("secret.key"));
                assert_eq!(threshold, Some(2));
                assert_eq!(shares, Some(4));
            }
            _ => panic!("expected split"),
        }
    }

    #[test]
    fn test_config_only_loaded_when_used() {
        let parse = |args: &[&str]| Cli::try_parse_from(args.iter().copied()).unwrap().command;

        assert!(!parse(&["shush", "generate", "new.key"]).uses_config());
        assert!(!parse(&["shush", "merge", "a.shard0", "a.shard1"]).uses_config());
        assert!(parse(&["shush", "split", "secret.key"]).uses_config());
        assert!(parse(&["shush", "encrypt", "-k", "my.key", "data.txt"]).uses_config());
        assert!(parse(&["shush", "decrypt", "-k", "my.key", "data.txt.shush"]).uses_config());
        assert!(parse(&["shush", "config", "show"]).uses_config());
    }

    #[test]
    fn test_key_file_resolution() {
        let mut cfg = ShushConfig::default();
        assert!(resolve_key_file(None, &cfg).is_err());

        cfg.keys.default_key_file = Some(PathBuf::from("config.key"));
        assert_eq!(
            resolve_key_file(None, &cfg).unwrap(),
            PathBuf::from("config.key")
        );
        assert_eq!(
            resolve_key_file(Some(PathBuf::from("flag.key")), &cfg).unwrap(),
            PathBuf::from("flag.key")
        );
    }
}
