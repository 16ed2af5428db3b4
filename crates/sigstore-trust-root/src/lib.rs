//! Sigstore trust material
//!
//! This crate holds the trust anchors consulted when verifying bundle
//! verification content:
//! - Fulcio certificate authorities, each with its own validity window
//! - Long-lived public keys registered under a key hint
//!
//! Verification code depends on the [`TrustedMaterial`] trait rather than the
//! concrete [`TrustedRoot`], so alternative trust stores can be plugged in.
//!
//! # Example
//!
//! ```
//! use sigstore_trust_root::{TrustedMaterial, TrustedRoot};
//!
//! let root = TrustedRoot::new();
//! assert!(root.fulcio_certificate_authorities().is_empty());
//! assert!(root.public_key_verifier("unknown").is_err());
//! ```

pub mod error;
pub mod trusted_root;

pub use error::{Error, Result};
pub use trusted_root::{
    CertificateAuthority, TrustedMaterial, TrustedPublicKey, TrustedRoot, ValidityPeriod,
};
