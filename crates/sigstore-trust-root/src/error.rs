//! Error types for sigstore-trust-root

use thiserror::Error;

/// Errors from trust material lookups
#[derive(Error, Debug)]
pub enum Error {
    /// No registered key for the hint
    #[error("key not found: {0}")]
    KeyNotFound(String),
}

/// Result type for sigstore-trust-root
pub type Result<T> = std::result::Result<T, Error>;
