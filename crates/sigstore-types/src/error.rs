//! Error types for sigstore-types

use thiserror::Error;

/// Errors produced while decoding Sigstore value types
#[derive(Error, Debug)]
pub enum Error {
    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 decoding failed
    #[error("base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Hex decoding failed
    #[error("hex decoding error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// A fixed-size value had the wrong length
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Hash algorithm name not recognized
    #[error("unsupported hash algorithm: {0}")]
    UnsupportedHashAlgorithm(String),
}

/// Result type for sigstore-types
pub type Result<T> = std::result::Result<T, Error>;
