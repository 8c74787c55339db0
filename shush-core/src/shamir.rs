//! Shamir secret sharing over GF(2^8)
//!
//! Implements a (t, n) threshold scheme where:
//! - every secret byte gets its own random polynomial of degree t-1
//! - share `i` holds that polynomial evaluated at x = i + 1
//! - any t shares recover the secret, t-1 shares reveal nothing
//!
//! The threshold is not recorded in the shares. [`combine`] returns *a*
//! result for any two or more consistent shares and cannot tell whether
//! the caller met the threshold.

use crate::error::{Result, ShushError};
use crate::gf256;
use crate::{DEFAULT_SHARES, DEFAULT_THRESHOLD, MAX_SHARES, MIN_SHARES};
use bytes::Bytes;
use rand::rngs::{OsRng, StdRng};
use rand::{CryptoRng, RngCore, SeedableRng};

/// Secret sharing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShamirConfig {
    /// Total number of shares (n)
    pub shares: u8,
    /// Shares required to reconstruct (t)
    pub threshold: u8,
}

impl Default for ShamirConfig {
    fn default() -> Self {
        Self {
            shares: DEFAULT_SHARES,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ShamirConfig {
    /// Create a new config, checking `2 <= threshold <= shares <= 255`
    pub fn new(shares: usize, threshold: usize) -> Result<Self> {
        if !(MIN_SHARES..=MAX_SHARES).contains(&shares) {
            return Err(ShushError::InvalidShareCount(shares));
        }
        if threshold < MIN_SHARES || threshold > shares {
            return Err(ShushError::InvalidThreshold { threshold, shares });
        }
        Ok(Self {
            shares: shares as u8,
            threshold: threshold as u8,
        })
    }

    /// Re-check a config whose fields were set directly
    pub fn validate(&self) -> Result<()> {
        Self::new(self.shares as usize, self.threshold as usize).map(|_| ())
    }

    /// Degree of the per-byte polynomial
    pub fn degree(&self) -> usize {
        self.threshold as usize - 1
    }
}

/// A single share of a split secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    /// Storage index (0 to n-1), also the shard file suffix
    pub index: u8,
    /// One y-value per secret byte
    pub data: Bytes,
}

impl Share {
    /// Create a share, rejecting indices whose x-coordinate would not fit a byte
    pub fn new(index: u8, data: impl Into<Bytes>) -> Result<Self> {
        check_index(index)?;
        Ok(Self {
            index,
            data: data.into(),
        })
    }

    /// Field x-coordinate of this share; x = 0 belongs to the secret
    pub fn x(&self) -> u8 {
        self.index + 1
    }

    /// Share size in bytes (equal to the secret size)
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn check_index(index: u8) -> Result<()> {
    if index as usize >= MAX_SHARES {
        return Err(ShushError::InvalidShareIndex {
            index: index as usize,
            max: MAX_SHARES - 1,
        });
    }
    Ok(())
}

/// Split a secret into `config.shares` shares using the OS entropy source
pub fn split(secret: &[u8], config: &ShamirConfig) -> Result<Vec<Share>> {
    let mut rng = StdRng::from_rng(OsRng)?;
    split_with_rng(secret, config, &mut rng)
}

/// Split a secret drawing polynomial coefficients from `rng`
pub fn split_with_rng<R>(secret: &[u8], config: &ShamirConfig, rng: &mut R) -> Result<Vec<Share>>
where
    R: RngCore + CryptoRng,
{
    config.validate()?;

    let share_count = config.shares as usize;
    let mut outputs: Vec<Vec<u8>> = (0..share_count)
        .map(|_| Vec::with_capacity(secret.len()))
        .collect();

    let mut coefficients = vec![0u8; config.degree() + 1];
    for &byte in secret {
        coefficients[0] = byte;
        rng.try_fill_bytes(&mut coefficients[1..])?;

        for (i, output) in outputs.iter_mut().enumerate() {
            output.push(gf256::eval_polynomial(&coefficients, (i + 1) as u8));
        }
    }
    coefficients.iter_mut().for_each(|c| *c = 0);

    Ok(outputs
        .into_iter()
        .enumerate()
        .map(|(i, data)| Share {
            index: i as u8,
            data: Bytes::from(data),
        })
        .collect())
}

/// Reconstruct a secret from shares
///
/// Needs at least two shares with distinct indices and equal lengths. If
/// fewer shares than the original threshold are supplied the output is
/// garbage; nothing in the share data allows detecting that.
pub fn combine(shares: &[Share]) -> Result<Vec<u8>> {
    if shares.len() < MIN_SHARES {
        return Err(ShushError::InsufficientShares {
            available: shares.len(),
            required: MIN_SHARES,
        });
    }

    let expected = shares[0].len();
    let mut seen = [false; 256];
    for share in shares {
        check_index(share.index)?;
        if std::mem::replace(&mut seen[share.index as usize], true) {
            return Err(ShushError::DuplicateShare(share.index));
        }
        if share.len() != expected {
            return Err(ShushError::ShareLengthMismatch {
                expected,
                actual: share.len(),
            });
        }
    }

    let xs: Vec<u8> = shares.iter().map(Share::x).collect();
    let basis = gf256::lagrange_basis_at_zero(&xs);

    let secret = (0..expected)
        .map(|pos| {
            shares
                .iter()
                .zip(&basis)
                .fold(0u8, |acc, (share, &l)| {
                    gf256::add(acc, gf256::mul(l, share.data[pos]))
                })
        })
        .collect();

    Ok(secret)
}
