//! Declared-digest parsing and package verification.
//!
//! The catalog declares digests as `"<algorithm>:<hex>"`. Algorithms are a
//! closed enum; adding one means a new variant plus its hasher arm.

use crate::error::{FetchError, FetchResult};
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Sha256,
}

impl DigestAlgorithm {
    pub const ALL: &'static [DigestAlgorithm] = &[DigestAlgorithm::Sha256];

    /// Prefix used before the colon in a declared digest.
    pub fn token(self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "sha256",
        }
    }

    /// Case-sensitive lookup of a digest prefix.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.token() == token)
    }

    fn hasher(self) -> Hasher {
        match self {
            DigestAlgorithm::Sha256 => Hasher::Sha256(Sha256::new()),
        }
    }

    /// Hashes the whole of `content`.
    pub fn digest(self, content: &[u8]) -> DeclaredDigest {
        let mut hasher = self.hasher();
        hasher.update(content);
        hasher.finish()
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

enum Hasher {
    Sha256(Sha256),
}

impl Hasher {
    fn update(&mut self, data: &[u8]) {
        match self {
            Hasher::Sha256(h) => h.update(data),
        }
    }

    fn finish(self) -> DeclaredDigest {
        match self {
            Hasher::Sha256(h) => DeclaredDigest {
                algorithm: DigestAlgorithm::Sha256,
                hex_value: hex::encode(h.finalize()),
            },
        }
    }
}

/// A digest in `<algorithm>:<hex>` form, either declared by the catalog or
/// computed from content. Computed hex is always lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredDigest {
    pub algorithm: DigestAlgorithm,
    pub hex_value: String,
}

impl DeclaredDigest {
    /// Hashes `content` with this digest's algorithm. On mismatch returns the
    /// computed digest so it can be reported.
    pub fn check(&self, content: &[u8]) -> Result<(), DeclaredDigest> {
        let actual = self.algorithm.digest(content);
        if actual == *self {
            Ok(())
        } else {
            Err(actual)
        }
    }

    /// True only if `content` hashes to exactly this hex value (case-sensitive).
    pub fn matches(&self, content: &[u8]) -> bool {
        self.check(content).is_ok()
    }
}

impl fmt::Display for DeclaredDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.hex_value)
    }
}

/// Parses `"<algorithm>:<hex>"`. The prefix before the first colon must be a
/// supported algorithm token; a string without a colon has no algorithm and
/// is rejected the same way.
pub fn parse_digest(declared: &str) -> FetchResult<DeclaredDigest> {
    let unsupported = || FetchError::UnsupportedDigestAlgorithm {
        declared: declared.to_string(),
    };
    let (prefix, hex_value) = declared.split_once(':').ok_or_else(unsupported)?;
    let algorithm = DigestAlgorithm::from_token(prefix).ok_or_else(unsupported)?;
    Ok(DeclaredDigest {
        algorithm,
        hex_value: hex_value.to_string(),
    })
}

/// Parses `declared` and checks `content` against it.
pub fn verify(declared: &str, content: &[u8]) -> FetchResult<bool> {
    Ok(parse_digest(declared)?.matches(content))
}

/// Digest of a file on disk, read in chunks.
pub fn digest_path(path: &Path, algorithm: DigestAlgorithm) -> Result<DeclaredDigest> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = algorithm.hasher();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finish())
}
