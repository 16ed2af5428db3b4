//! Cryptographic primitives for Sigstore verification
//!
//! This crate provides the signature and certificate operations the bundle
//! verification core delegates to:
//!
//! - SHA-256 hashing
//! - Public key decoding from SubjectPublicKeyInfo (ECDSA P-256 and P-384, Ed25519)
//! - Signature verification over messages and prehashed digests
//! - X.509 certificate accessors (validity, extensions, URI SANs)
//! - Certificate path building at an explicit evaluation time

pub mod error;
pub mod hash;
pub mod keys;
pub mod path;
pub mod verifier;
pub mod x509;

pub use error::{Error, Result};
pub use hash::sha256;
pub use keys::{PublicKey, SigningScheme};
pub use path::{build_certificate_path, EKU_CODE_SIGNING};
pub use verifier::Verifier;
pub use x509::X509Certificate;
