//! Fixed-size digest values

use crate::error::{Error, Result};
use std::fmt;

/// A SHA-256 digest
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Hash([u8; 32]);

impl Sha256Hash {
    /// Wrap raw digest bytes
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Sha256Hash(bytes)
    }

    /// Copy a digest out of a slice, which must be exactly 32 bytes
    pub fn try_from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; 32] = slice.try_into().map_err(|_| Error::InvalidLength {
            expected: 32,
            actual: slice.len(),
        })?;
        Ok(Sha256Hash(bytes))
    }

    /// Parse a hex-encoded digest
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        Self::try_from_slice(&bytes)
    }

    /// Hex-encode the digest
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl AsRef<[u8]> for Sha256Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha256Hash({})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hash_hex() {
        let hex = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";
        let hash = Sha256Hash::from_hex(hex).unwrap();
        assert_eq!(hash.to_hex(), hex);
    }

    #[test]
    fn test_sha256_hash_wrong_length() {
        let err = Sha256Hash::try_from_slice(&[0u8; 31]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidLength {
                expected: 32,
                actual: 31
            }
        ));
        assert!(Sha256Hash::from_hex("abcd").is_err());
    }
}
