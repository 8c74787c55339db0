//! Safe file persistence
//!
//! Every artifact shush produces (keys, shards, ciphertext, recovered
//! secrets) goes through [`write_new`], which never replaces an existing
//! file. Content is written to a temporary file next to the destination,
//! synced, then linked into place with a no-clobber rename, so a failed
//! write leaves nothing behind and a lost race reports [`ShushError::FileExists`].
//!
//! Keys and shards are stored as standard base64 text; ciphertext and
//! recovered secrets as raw bytes.

use crate::error::{Result, ShushError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Prefix of in-flight temporary files
const TEMP_PREFIX: &str = ".shush-";

/// Write `data` to `path`, failing if `path` already exists
pub fn write_new(path: &Path, data: &[u8]) -> Result<()> {
    ensure_absent([path])?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(".tmp")
        .tempfile_in(dir)?;

    // Owner read/write only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;

    tmp.persist_noclobber(path).map_err(|e| {
        if e.error.kind() == io::ErrorKind::AlreadyExists {
            ShushError::FileExists(path.to_path_buf())
        } else {
            ShushError::Io(e.error)
        }
    })?;

    debug!(path = %path.display(), bytes = data.len(), "Wrote file");
    Ok(())
}

/// Fail with [`ShushError::FileExists`] on the first path that exists
pub fn ensure_absent<I, P>(paths: I) -> Result<()>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    for path in paths {
        let path = path.as_ref();
        match fs::symlink_metadata(path) {
            Ok(_) => return Err(ShushError::FileExists(path.to_path_buf())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Best-effort removal used to roll back a multi-file write
pub fn remove_quietly(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "Failed to remove partial output");
        }
    }
}

/// Read a whole file
pub fn read(path: &Path) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Encode bytes as standard base64 text
pub fn encode_text(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode standard base64 text, ignoring surrounding ASCII whitespace
pub fn decode_text(text: impl AsRef<[u8]>) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(text.as_ref().trim_ascii())?)
}

/// Write `data` base64-encoded to a new file
pub fn write_text_new(path: &Path, data: &[u8]) -> Result<()> {
    write_new(path, encode_text(data).as_bytes())
}

/// Write each `(path, data)` pair base64-encoded to a new file
///
/// All or nothing: if one write fails, the files already written by this
/// call are removed before the error is returned.
pub fn write_text_all_new<'a, I>(files: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = (&'a Path, &'a [u8])>,
{
    let mut written = Vec::new();
    for (path, data) in files {
        if let Err(e) = write_text_new(path, data) {
            warn!(error = %e, written = written.len(), "Write failed, rolling back");
            remove_quietly(&written);
            return Err(e);
        }
        written.push(path.to_path_buf());
    }
    Ok(written)
}

/// Read and decode a base64 text file
pub fn read_text(path: &Path) -> Result<Vec<u8>> {
    decode_text(read(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_base64_encode() {
        assert_eq!(encode_text(b"test"), "dGVzdA==");
        assert_eq!(encode_text(b""), "");
    }

    #[test]
    fn test_base64_decode() {
        assert_eq!(decode_text("dGVzdA==").unwrap(), b"test");
        assert_eq!(decode_text(" dGVzdA==\r\n").unwrap(), b"test");
        assert!(matches!(
            decode_text("dGVzdA=!"),
            Err(ShushError::Encoding(_))
        ));
    }

    #[test]
    fn test_write_new_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secret.key");

        write_new(&path, b"payload").unwrap();
        assert_eq!(read(&path).unwrap(), b"payload");
    }

    #[test]
    fn test_write_new_refuses_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secret.key");
        fs::write(&path, b"original").unwrap();

        let result = write_new(&path, b"replacement");
        assert!(matches!(result, Err(ShushError::FileExists(p)) if p == path));
        assert_eq!(fs::read(&path).unwrap(), b"original");
    }

    #[test]
    fn test_write_new_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.bin");
        fs::write(&path, b"original").unwrap();

        write_new(&dir.path().join("other.bin"), b"x").unwrap();
        let _ = write_new(&path, b"y");

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().all(|n| !n.starts_with(TEMP_PREFIX)), "{names:?}");
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_write_new_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("file");

        assert!(matches!(write_new(&path, b"x"), Err(ShushError::Io(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_new_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secret.key");
        write_new(&path, b"payload").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_ensure_absent() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("present");
        let absent = dir.path().join("absent");
        fs::write(&present, b"x").unwrap();

        assert!(ensure_absent([&absent]).is_ok());
        assert!(matches!(
            ensure_absent([&absent, &present]),
            Err(ShushError::FileExists(p)) if p == present
        ));
    }

    #[test]
    fn test_text_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("share");

        write_text_new(&path, &[0, 1, 2, 255]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "AAEC/w==");
        assert_eq!(read_text(&path).unwrap(), vec![0, 1, 2, 255]);
    }

    #[test]
    fn test_write_text_all_new() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");

        let written =
            write_text_all_new([(a.as_path(), &b"x"[..]), (b.as_path(), &b"yz"[..])]).unwrap();
        assert_eq!(written, vec![a.clone(), b.clone()]);
        assert_eq!(read_text(&b).unwrap(), b"yz");
    }

    #[test]
    fn test_write_text_all_new_rolls_back() {
        let dir = TempDir::new().unwrap();
        let shard0 = dir.path().join("secret.key.shard0");
        let shard1 = dir.path().join("secret.key.shard1");
        // Parent directory does not exist, so the third write fails
        let shard2 = dir.path().join("missing").join("secret.key.shard2");

        let result = write_text_all_new([
            (shard0.as_path(), &b"zero"[..]),
            (shard1.as_path(), &b"one"[..]),
            (shard2.as_path(), &b"two"[..]),
        ]);
        assert!(matches!(result, Err(ShushError::Io(_))));

        assert!(!shard0.exists());
        assert!(!shard1.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ShushError::Io(ref e) if e.kind() == io::ErrorKind::NotFound));
    }
}
