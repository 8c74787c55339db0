//! File-level operations
//!
//! Each operation reads its inputs, validates everything it can before
//! touching the disk, and writes its outputs through [`crate::store`]. On
//! failure no output file is left behind.

use crate::crypto::{self, EncryptionKey};
use crate::error::{Result, ShushError};
use crate::naming;
use crate::shamir::{self, ShamirConfig, Share};
use crate::store;
use crate::{MAX_SHARES, MIN_SHARES};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Generate configuration
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub key_path: PathBuf,
}

/// Split configuration
#[derive(Debug, Clone)]
pub struct SplitConfig {
    pub secret_path: PathBuf,
    pub shares: usize,
    pub threshold: usize,
}

/// Merge configuration
#[derive(Debug, Clone)]
pub struct MergeConfig {
    pub shard_paths: Vec<PathBuf>,
}

/// Encrypt configuration
#[derive(Debug, Clone)]
pub struct EncryptConfig {
    pub key_path: PathBuf,
    pub input_path: PathBuf,
}

/// Decrypt configuration
#[derive(Debug, Clone)]
pub struct DecryptConfig {
    pub key_path: PathBuf,
    pub input_path: PathBuf,
}

/// Create a new random key file
#[instrument(skip_all, fields(key = %config.key_path.display()))]
pub fn generate(config: &GenerateConfig) -> Result<PathBuf> {
    store::ensure_absent([&config.key_path])?;

    let key = EncryptionKey::generate()?;
    store::write_new(&config.key_path, key.to_base64().as_bytes())?;

    info!("Generated key");
    Ok(config.key_path.clone())
}

/// Split a file into shard files
#[instrument(skip_all, fields(secret = %config.secret_path.display()))]
pub fn split(config: &SplitConfig) -> Result<Vec<PathBuf>> {
    let shamir_config = ShamirConfig::new(config.shares, config.threshold)?;

    let shard_paths: Vec<PathBuf> = (0..shamir_config.shares)
        .map(|i| naming::shard_path(&config.secret_path, i))
        .collect();
    store::ensure_absent(&shard_paths)?;

    let mut secret = store::read(&config.secret_path)?;
    let shares = shamir::split(&secret, &shamir_config);
    secret.iter_mut().for_each(|b| *b = 0);
    let shares = shares?;

    debug!(
        shares = shamir_config.shares,
        threshold = shamir_config.threshold,
        bytes = secret.len(),
        "Split secret"
    );

    let written = store::write_text_all_new(
        shard_paths
            .iter()
            .map(PathBuf::as_path)
            .zip(shares.iter().map(|share| share.data.as_ref())),
    )?;

    info!(shards = written.len(), "Wrote shards");
    Ok(written)
}

/// Recombine shard files into the original secret file
#[instrument(skip_all, fields(shards = config.shard_paths.len()))]
pub fn merge(config: &MergeConfig) -> Result<PathBuf> {
    if config.shard_paths.len() < MIN_SHARES {
        return Err(ShushError::InsufficientShares {
            available: config.shard_paths.len(),
            required: MIN_SHARES,
        });
    }

    let mut parsed = Vec::with_capacity(config.shard_paths.len());
    let mut seen = [false; MAX_SHARES];
    for path in &config.shard_paths {
        let (secret, index) = naming::parse_shard_path(path)?;
        if std::mem::replace(&mut seen[index as usize], true) {
            return Err(ShushError::RepeatedShard {
                index,
                path: path.clone(),
            });
        }
        parsed.push((secret, index));
    }

    // Shards may sit in different directories; only the file names must agree
    let output = parsed[0].0.clone();
    if let Some((other, _)) = parsed
        .iter()
        .find(|(secret, _)| secret.file_name() != output.file_name())
    {
        return Err(ShushError::MismatchedShards {
            first: output.clone(),
            other: other.clone(),
        });
    }
    store::ensure_absent([&output])?;

    let mut shares = Vec::with_capacity(parsed.len());
    for (path, (_, index)) in config.shard_paths.iter().zip(&parsed) {
        let data = store::read_text(path)?;
        debug!(shard = %path.display(), index, bytes = data.len(), "Read shard");
        shares.push(Share::new(*index, data)?);
    }

    let mut secret = shamir::combine(&shares)?;
    let result = store::write_new(&output, &secret);
    secret.iter_mut().for_each(|b| *b = 0);
    result?;

    info!(output = %output.display(), "Recovered secret");
    Ok(output)
}

/// Encrypt a file under a key file
#[instrument(skip_all, fields(input = %config.input_path.display()))]
pub fn encrypt(config: &EncryptConfig) -> Result<PathBuf> {
    let key = load_key(&config.key_path)?;

    let output = naming::encrypted_path(&config.input_path);
    store::ensure_absent([&output])?;

    let plaintext = store::read(&config.input_path)?;
    let sealed = crypto::seal_to_bytes(&key, &plaintext)?;
    store::write_new(&output, &sealed)?;

    info!(output = %output.display(), bytes = sealed.len(), "Encrypted file");
    Ok(output)
}

/// Decrypt a `.shush` file under a key file
#[instrument(skip_all, fields(input = %config.input_path.display()))]
pub fn decrypt(config: &DecryptConfig) -> Result<PathBuf> {
    let output = naming::decrypted_path(&config.input_path)?;
    let key = load_key(&config.key_path)?;
    store::ensure_absent([&output])?;

    let envelope = store::read(&config.input_path)?;
    let mut plaintext = crypto::open_from_bytes(&key, &envelope)?;
    let result = store::write_new(&output, &plaintext);
    plaintext.iter_mut().for_each(|b| *b = 0);
    result?;

    info!(output = %output.display(), "Decrypted file");
    Ok(output)
}

/// Read and validate a base64 key file
pub fn load_key(path: &Path) -> Result<EncryptionKey> {
    let mut text = store::read(path)?;
    let key = EncryptionKey::from_base64(&text);
    text.iter_mut().for_each(|b| *b = 0);
    key
}
