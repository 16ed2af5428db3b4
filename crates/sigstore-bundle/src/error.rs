//! Error types for sigstore-bundle

use thiserror::Error;

/// Errors from bundle content checks and trust decisions
#[derive(Error, Debug)]
pub enum Error {
    /// Envelope payload type is not the one the operation expects
    #[error("incorrect media type: expected {expected}, got {actual}")]
    IncorrectMediaType { expected: String, actual: String },

    #[error("failed to decode base64: {0}")]
    DecodingB64(#[source] sigstore_types::Error),

    #[error("failed to decode JSON: {0}")]
    DecodingJson(#[source] sigstore_types::Error),

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Artifact does not match the signed content
    #[error("integrity mismatch: {0}")]
    IntegrityMismatch(String),

    /// Signing key could not be loaded
    #[error("invalid key: {0}")]
    InvalidKey(#[source] sigstore_crypto::Error),

    #[error("signature verification failed: {0}")]
    SignatureInvalid(String),

    /// Key hint not present in the trust material
    #[error("unresolvable key: {0}")]
    UnresolvableKey(#[source] sigstore_trust_root::Error),

    /// No certificate authority accepted the chain
    #[error("certificate chain does not verify against any trusted certificate authority")]
    ChainVerificationFailed,

    #[error("certificate chain is empty")]
    EmptyCertificateChain,

    #[error("invalid certificate: {0}")]
    InvalidCertificate(#[source] sigstore_crypto::Error),
}

/// Broad classification of [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or mistyped input
    Format,
    UnsupportedAlgorithm,
    Integrity,
    /// Credential not trusted or signature not valid
    Trust,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IncorrectMediaType { .. }
            | Error::DecodingB64(_)
            | Error::DecodingJson(_)
            | Error::InvalidCertificate(_) => ErrorKind::Format,
            Error::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
            Error::IntegrityMismatch(_) => ErrorKind::Integrity,
            Error::InvalidKey(_)
            | Error::SignatureInvalid(_)
            | Error::UnresolvableKey(_)
            | Error::ChainVerificationFailed
            | Error::EmptyCertificateChain => ErrorKind::Trust,
        }
    }
}

/// Result type for sigstore-bundle
pub type Result<T> = std::result::Result<T, Error>;
