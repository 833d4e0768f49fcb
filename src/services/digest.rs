//! Text hashing with hex-encoded digests.

use std::fmt;
use std::str::FromStr;

use md5::Md5;
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha256,
}

impl HashAlgorithm {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = AppError;

    /// Case-insensitive; the error names the allowed set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha256" => Ok(HashAlgorithm::Sha256),
            _ => Err(AppError::bad_request("Invalid algo, use md5 or sha256")),
        }
    }
}

/// Hash the UTF-8 bytes of `text` and return the lowercase hex digest.
pub fn hex_digest(algo: HashAlgorithm, text: &str) -> String {
    match algo {
        HashAlgorithm::Md5 => hex::encode(Md5::digest(text.as_bytes())),
        HashAlgorithm::Sha256 => hex::encode(Sha256::digest(text.as_bytes())),
    }
}
