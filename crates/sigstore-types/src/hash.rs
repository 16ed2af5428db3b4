//! Hash algorithm identifiers
//!
//! Names follow the Sigstore protobuf `HashAlgorithm` enum (`SHA2_256`, ...),
//! which is how bundles spell the digest algorithm of a message signature.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Digest algorithms that can appear in a bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha2_256,
    Sha2_384,
    Sha2_512,
}

impl HashAlgorithm {
    /// Get the canonical bundle name of the algorithm
    pub const fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha2_256 => "SHA2_256",
            HashAlgorithm::Sha2_384 => "SHA2_384",
            HashAlgorithm::Sha2_512 => "SHA2_512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SHA2_256" => Ok(HashAlgorithm::Sha2_256),
            "SHA2_384" => Ok(HashAlgorithm::Sha2_384),
            "SHA2_512" => Ok(HashAlgorithm::Sha2_512),
            _ => Err(Error::UnsupportedHashAlgorithm(s.to_string())),
        }
    }
}
