//! Whole-document fingerprinting.
//!
//! # Algorithm
//!
//! ```text
//! SHA-256(line_0 || "\n" || line_1 || "\n" || ... || line_n)
//! ```
//!
//! The digest is computed over the *normalized* content lines, so two notes
//! that differ only in front matter, heading markers or blank lines share a
//! fingerprint. Equal fingerprints are treated as exact duplicates; no
//! collision handling is attempted beyond trusting SHA-256.
//!
//! # Examples
//!
//! ```rust
//! use canonical::fingerprint;
//!
//! let a = fingerprint(&["alpha", "beta"]);
//! let b = fingerprint(&["alpha", "beta"]);
//! let c = fingerprint(&["alpha beta"]);
//!
//! assert_eq!(a, b);
//! assert_ne!(a, c);
//! assert_eq!(a.to_hex().len(), 64);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::CanonicalError;

/// Byte width of a [`Fingerprint`].
pub const FINGERPRINT_LEN: usize = 32;

/// Fixed-width SHA-256 digest of a document's normalized content.
///
/// Serializes as a lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    pub fn from_bytes(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }

    /// Lowercase hex rendering (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First 12 hex characters, for log lines.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..6])
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.to_hex())
    }
}

impl FromStr for Fingerprint {
    type Err = CanonicalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| CanonicalError::InvalidFingerprint(e.to_string()))?;
        if bytes.len() != FINGERPRINT_LEN {
            return Err(CanonicalError::InvalidFingerprint(format!(
                "expected {FINGERPRINT_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        let mut out = [0u8; FINGERPRINT_LEN];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl Serialize for Fingerprint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}

/// Compute the fingerprint of a cleaned line sequence.
///
/// Lines are joined with `\n` (no trailing separator) and hashed as UTF-8.
pub fn fingerprint<S: AsRef<str>>(lines: &[S]) -> Fingerprint {
    let mut hasher = Sha256::new();
    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            hasher.update(b"\n");
        }
        hasher.update(line.as_ref().as_bytes());
    }
    let digest = hasher.finalize();
    let mut out = [0u8; FINGERPRINT_LEN];
    out.copy_from_slice(&digest);
    Fingerprint(out)
}
