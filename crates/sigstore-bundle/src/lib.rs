//! Bundle content verification for Sigstore
//!
//! This crate answers the two questions asked of a bundle once it has been
//! parsed:
//!
//! - Integrity: does the signature content cover the artifact presented?
//!   See [`SignatureContent::ensure_file_matches_digest`].
//! - Trust: was the signing credential valid and issued by an accepted
//!   authority? See [`VerificationContent::verify`].
//!
//! Selecting which signature and verification content to pair is up to the
//! caller, as is loading the trust material.

pub mod error;
pub mod signature_content;
pub mod verification_content;

pub use error::{Error, ErrorKind, Result};
pub use signature_content::{Envelope, MessageSignature, SignatureContent};
pub use verification_content::{
    CandidateKey, CertificateChain, PublicKeyIdentifier, VerificationContent, FULCIO_ISSUER_OID,
};

// Re-export the crates these types are built from
pub use sigstore_crypto as crypto;
pub use sigstore_trust_root as trust_root;
pub use sigstore_types as types;
