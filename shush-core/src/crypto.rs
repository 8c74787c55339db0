//! Authenticated encryption envelope
//!
//! Provides:
//! - 256-bit key generation and base64 key files
//! - AES-256-GCM sealing with a fresh random nonce per call
//! - The on-disk envelope layout `nonce(12) || ciphertext || tag(16)`

use crate::error::{Result, ShushError};
use crate::store;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use rand::RngCore;
use std::fmt;

/// AES-256-GCM key size (32 bytes)
pub const KEY_SIZE: usize = 32;

/// AES-GCM nonce size (12 bytes / 96 bits)
pub const NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag size (16 bytes)
pub const TAG_SIZE: usize = 16;

/// AES-256-GCM encryption key
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptionKey([u8; KEY_SIZE]);

impl EncryptionKey {
    /// Generate a new random encryption key
    pub fn generate() -> Result<Self> {
        let mut key = [0u8; KEY_SIZE];
        OsRng.try_fill_bytes(&mut key)?;
        Ok(Self(key))
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a slice (validates length)
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != KEY_SIZE {
            return Err(ShushError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: slice.len(),
            });
        }
        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(slice);
        Ok(Self(key))
    }

    /// Parse the textual key file format
    pub fn from_base64(text: impl AsRef<[u8]>) -> Result<Self> {
        let mut raw = store::decode_text(text)?;
        let key = Self::from_slice(&raw);
        raw.iter_mut().for_each(|b| *b = 0);
        key
    }

    /// Encode for a key file
    pub fn to_base64(&self) -> String {
        store::encode_text(&self.0)
    }

    /// Get the raw key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncryptionKey([REDACTED])")
    }
}

impl Drop for EncryptionKey {
    fn drop(&mut self) {
        // Zeroize key on drop
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

/// Sealed data as stored on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Nonce used for encryption (unique per seal)
    pub nonce: [u8; NONCE_SIZE],
    /// Ciphertext with authentication tag appended
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Total overhead per seal (nonce + tag)
    pub const OVERHEAD: usize = NONCE_SIZE + TAG_SIZE;

    /// Get the size of the serialized envelope
    pub fn len(&self) -> usize {
        self.ciphertext.len() + NONCE_SIZE
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.ciphertext.is_empty()
    }

    /// Serialize to bytes (nonce prepended to ciphertext)
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.len());
        result.extend_from_slice(&self.nonce);
        result.extend_from_slice(&self.ciphertext);
        result
    }

    /// Deserialize from bytes (nonce prepended to ciphertext)
    ///
    /// Only the nonce is required here; a body shorter than the tag is left
    /// for [`open`] to reject as an authentication failure.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < NONCE_SIZE {
            return Err(ShushError::EnvelopeTooShort { len: data.len() });
        }

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&data[..NONCE_SIZE]);

        Ok(Self {
            nonce,
            ciphertext: data[NONCE_SIZE..].to_vec(),
        })
    }
}

/// Seal plaintext with AES-256-GCM under a fresh random nonce
pub fn seal(key: &EncryptionKey, plaintext: &[u8]) -> Result<Envelope> {
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.try_fill_bytes(&mut nonce_bytes)?;
    let nonce = Nonce::from_slice(&nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| ShushError::Encryption(e.to_string()))?;

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| ShushError::Encryption(e.to_string()))?;

    Ok(Envelope {
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Open an envelope, verifying its tag
pub fn open(key: &EncryptionKey, envelope: &Envelope) -> Result<Vec<u8>> {
    let nonce = Nonce::from_slice(&envelope.nonce);

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| ShushError::Encryption(e.to_string()))?;

    cipher
        .decrypt(nonce, envelope.ciphertext.as_slice())
        .map_err(|_| ShushError::AuthenticationFailed)
}

/// Seal and return the on-disk bytes
pub fn seal_to_bytes(key: &EncryptionKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    Ok(seal(key, plaintext)?.to_bytes())
}

/// Open the on-disk bytes of an envelope
pub fn open_from_bytes(key: &EncryptionKey, data: &[u8]) -> Result<Vec<u8>> {
    open(key, &Envelope::from_bytes(data)?)
}
