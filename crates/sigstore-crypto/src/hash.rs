use sha2::{Digest, Sha256};
use sigstore_types::Sha256Hash;

/// Compute the SHA-256 digest of `data`
pub fn sha256(data: &[u8]) -> Sha256Hash {
    Sha256Hash::from_bytes(Sha256::digest(data).into())
}
