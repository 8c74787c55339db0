//! Cross-platform console symbols
//!
//! Provides ASCII-safe symbols for Windows compatibility.

/// Checkmark symbol
#[cfg(windows)]
pub const CHECK: &str = "[OK]";
#[cfg(not(windows))]
pub const CHECK: &str = "\u{2713}"; // ✓

/// Warning symbol
#[cfg(windows)]
pub const WARN: &str = "[!]";
#[cfg(not(windows))]
pub const WARN: &str = "!";

/// Lock symbol
#[cfg(windows)]
pub const LOCK: &str = "[L]";
#[cfg(not(windows))]
pub const LOCK: &str = "\u{1F512}"; // 🔒

/// Key symbol
#[cfg(windows)]
pub const KEY: &str = "[K]";
#[cfg(not(windows))]
pub const KEY: &str = "\u{1F511}"; // 🔑
