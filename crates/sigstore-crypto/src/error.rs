//! Error types for sigstore-crypto

use thiserror::Error;

/// Errors from signature and certificate primitives
#[derive(Error, Debug)]
pub enum Error {
    /// Public key could not be decoded or is of an unsupported type
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Algorithm or operation not supported for the given key
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Signature did not verify
    #[error("signature verification failed: {0}")]
    SignatureInvalid(String),

    /// Certificate could not be parsed
    #[error("certificate error: {0}")]
    Certificate(String),

    /// No valid path from the leaf to the trust anchor
    #[error("certificate path building failed: {0}")]
    PathBuilding(String),
}

/// Result type for sigstore-crypto
pub type Result<T> = std::result::Result<T, Error>;
