//! shush core library
//!
//! Protects a secret file in two complementary ways:
//! - Shamir threshold secret sharing over GF(2^8)
//! - AES-256-GCM authenticated encryption under a 256-bit key file
//!
//! Every artifact is written through a no-clobber store, so an existing key,
//! shard or plaintext is never overwritten.

pub mod crypto;
pub mod error;
pub mod gf256;
pub mod naming;
pub mod ops;
pub mod shamir;
pub mod store;

pub use crypto::{open, seal, EncryptionKey, Envelope};
pub use error::{ErrorKind, Result, ShushError};
pub use ops::{DecryptConfig, EncryptConfig, GenerateConfig, MergeConfig, SplitConfig};
pub use shamir::{combine, split, ShamirConfig, Share};

/// Default sharing configuration
/// - 5 shares handed out
/// - any 3 of them recover the secret
pub const DEFAULT_SHARES: u8 = 5;
pub const DEFAULT_THRESHOLD: u8 = 3;

/// Fewest shares a split may produce, and fewest that combine accepts
pub const MIN_SHARES: usize = 2;

/// x-coordinates are the non-zero bytes, so at most 255 shares
pub const MAX_SHARES: usize = 255;
