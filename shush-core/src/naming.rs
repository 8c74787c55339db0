//! Output file naming
//!
//! - key files: named by the caller
//! - shard `i` of `F`: `F.shard<i>` (0-based, x-coordinate `i + 1`)
//! - merge output: the shard name with its `.shard<i>` component removed
//! - encrypt output: `F.shush`
//! - decrypt output: the input with `.shush` removed
//!
//! Only the final path component is inspected; the directory is kept.

use crate::error::{Result, ShushError};
use crate::MAX_SHARES;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Marker in front of the shard index
pub const SHARD_MARKER: &str = "shard";

/// Suffix of encrypted files
pub const ENCRYPTED_SUFFIX: &str = ".shush";

fn append(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Path of shard `index` for `secret`
pub fn shard_path(secret: &Path, index: u8) -> PathBuf {
    append(secret, &format!(".{SHARD_MARKER}{index}"))
}

/// Split a shard path into the secret path and the shard index
pub fn parse_shard_path(path: &Path) -> Result<(PathBuf, u8)> {
    let malformed = || ShushError::MalformedShardName(path.display().to_string());

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(malformed)?;
    let (stem, suffix) = name.rsplit_once('.').ok_or_else(malformed)?;
    let digits = suffix.strip_prefix(SHARD_MARKER).ok_or_else(malformed)?;

    if stem.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    let index = digits
        .parse::<u8>()
        .ok()
        .filter(|&i| (i as usize) < MAX_SHARES)
        .ok_or_else(malformed)?;

    Ok((path.with_file_name(stem), index))
}

/// Name of the secret a shard was split from
pub fn merge_output(shard: &Path) -> Result<PathBuf> {
    parse_shard_path(shard).map(|(secret, _)| secret)
}

/// Path of the encrypted copy of `plaintext`
pub fn encrypted_path(plaintext: &Path) -> PathBuf {
    append(plaintext, ENCRYPTED_SUFFIX)
}

/// Path a `.shush` file decrypts to
pub fn decrypted_path(encrypted: &Path) -> Result<PathBuf> {
    encrypted
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_suffix(ENCRYPTED_SUFFIX))
        .filter(|stem| !stem.is_empty())
        .map(|stem| encrypted.with_file_name(stem))
        .ok_or_else(|| ShushError::MalformedFileName(encrypted.display().to_string()))
}
