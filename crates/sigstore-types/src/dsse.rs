//! Dead Simple Signing Envelope (DSSE) types
//!
//! DSSE is a signature envelope format used for signing arbitrary payloads.
//! Specification: https://github.com/secure-systems-lab/dsse
//!
//! Payload and signatures are kept in their base64 wire form. Integrity checks
//! compare the encoded payload as a string, so it is never re-encoded.

use crate::error::Result;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// A DSSE envelope containing a signed payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DsseEnvelope {
    /// Type URI of the payload
    pub payload_type: String,
    /// Base64-encoded payload
    pub payload: String,
    /// Signatures over the PAE (Pre-Authentication Encoding)
    #[serde(default)]
    pub signatures: Vec<DsseSignature>,
}

/// A signature in a DSSE envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsseSignature {
    /// Base64-encoded signature bytes
    pub sig: String,
    /// Key ID (optional hint for key lookup)
    #[serde(default)]
    pub keyid: String,
}

impl DsseEnvelope {
    /// Create a new DSSE envelope
    pub fn new(payload_type: String, payload: String, signatures: Vec<DsseSignature>) -> Self {
        Self {
            payload_type,
            payload,
            signatures,
        }
    }

    /// Decode the base64 payload
    pub fn decode_payload(&self) -> Result<Vec<u8>> {
        decode_b64(&self.payload)
    }

    /// Get the Pre-Authentication Encoding (PAE) of the decoded payload
    ///
    /// PAE is the string that gets signed in DSSE:
    /// `DSSEv1 <payload_type_len> <payload_type> <payload_len> <payload>`
    pub fn pae(&self) -> Result<Vec<u8>> {
        Ok(pae(&self.payload_type, &self.decode_payload()?))
    }
}

impl DsseSignature {
    /// Create a signature entry from raw signature bytes
    pub fn from_bytes(sig: &[u8], keyid: impl Into<String>) -> Self {
        Self {
            sig: STANDARD.encode(sig),
            keyid: keyid.into(),
        }
    }

    /// Decode the base64 signature
    pub fn decode_sig(&self) -> Result<Vec<u8>> {
        decode_b64(&self.sig)
    }
}

/// Decode a DSSE base64 field
///
/// DSSE producers disagree on the alphabet, so standard encoding is tried
/// first and URL-safe encoding second.
pub fn decode_b64(s: &str) -> Result<Vec<u8>> {
    match STANDARD.decode(s) {
        Ok(bytes) => Ok(bytes),
        Err(err) => URL_SAFE.decode(s).map_err(|_| err.into()),
    }
}

/// Compute the Pre-Authentication Encoding (PAE)
///
/// Format: `DSSEv1 <len(type)> <type> <len(body)> <body>`
pub fn pae(payload_type: &str, payload: &[u8]) -> Vec<u8> {
    let header = format!(
        "DSSEv1 {} {} {} ",
        payload_type.len(),
        payload_type,
        payload.len()
    );
    let mut result = Vec::with_capacity(header.len() + payload.len());
    result.extend_from_slice(header.as_bytes());
    result.extend_from_slice(payload);
    result
}
