//! Core types and data structures for Sigstore
//!
//! This crate provides the value types carried by Sigstore bundles that the
//! verification core consumes: DSSE envelopes, in-toto statements, digest
//! algorithms and digests.

pub mod dsse;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod intoto;

pub use dsse::{decode_b64, pae, DsseEnvelope, DsseSignature};
pub use encoding::Sha256Hash;
pub use error::{Error, Result};
pub use hash::HashAlgorithm;
pub use intoto::{Statement, Subject, INTOTO_MEDIA_TYPE, STATEMENT_TYPE_V1};
