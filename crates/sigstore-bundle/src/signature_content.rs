//! Signature content of a bundle
//!
//! A bundle signs either a bare artifact digest ([`MessageSignature`]) or a
//! DSSE envelope wrapping an in-toto statement ([`Envelope`]).

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sigstore_crypto::{sha256, Verifier};
use sigstore_types::{DsseEnvelope, HashAlgorithm, Sha256Hash, Statement, INTOTO_MEDIA_TYPE};
use std::borrow::Cow;

/// A detached signature over an artifact digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSignature {
    digest: Vec<u8>,
    digest_algorithm: String,
    signature: Vec<u8>,
}

impl MessageSignature {
    /// `digest_algorithm` uses the protobuf enum spelling, e.g. `SHA2_256`
    pub fn new(digest: Vec<u8>, digest_algorithm: impl Into<String>, signature: Vec<u8>) -> Self {
        Self {
            digest,
            digest_algorithm: digest_algorithm.into(),
            signature,
        }
    }

    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    pub fn digest_algorithm(&self) -> &str {
        &self.digest_algorithm
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Check that `file` hashes to the stored digest
    pub fn ensure_file_matches_digest(&self, file: &[u8]) -> Result<()> {
        self.require_sha256()?;

        let computed = sha256(file);
        if computed.as_bytes()[..] != self.digest[..] {
            return Err(Error::IntegrityMismatch(format!(
                "artifact digest {} does not match signed digest",
                computed.to_hex()
            )));
        }
        Ok(())
    }

    /// Verify the signature over the stored digest
    pub fn check_signature(&self, verifier: &Verifier) -> Result<()> {
        self.require_sha256()?;

        let digest = Sha256Hash::try_from_slice(&self.digest)
            .map_err(|e| Error::SignatureInvalid(format!("malformed digest: {}", e)))?;
        verifier
            .verify_prehashed(&digest, &self.signature)
            .map_err(crypto_signature_error)
    }

    fn require_sha256(&self) -> Result<()> {
        match self.digest_algorithm.parse::<HashAlgorithm>() {
            Ok(HashAlgorithm::Sha2_256) => Ok(()),
            _ => Err(Error::UnsupportedAlgorithm(format!(
                "digest algorithm {}",
                self.digest_algorithm
            ))),
        }
    }
}

/// A DSSE envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    envelope: DsseEnvelope,
}

impl Envelope {
    pub fn new(envelope: DsseEnvelope) -> Self {
        Self { envelope }
    }

    /// The underlying DSSE envelope
    pub fn raw_envelope(&self) -> &DsseEnvelope {
        &self.envelope
    }

    /// Decode the payload as an in-toto statement
    pub fn statement(&self) -> Result<Statement> {
        if self.envelope.payload_type != INTOTO_MEDIA_TYPE {
            return Err(Error::IncorrectMediaType {
                expected: INTOTO_MEDIA_TYPE.to_string(),
                actual: self.envelope.payload_type.clone(),
            });
        }

        let payload = self
            .envelope
            .decode_payload()
            .map_err(Error::DecodingB64)?;
        Statement::from_json(&payload).map_err(Error::DecodingJson)
    }

    /// Decoded bytes of the first signature, or empty when there is none
    ///
    /// Only standard base64 is decoded here; anything else yields empty.
    pub fn signature(&self) -> Vec<u8> {
        self.envelope
            .signatures
            .first()
            .and_then(|sig| STANDARD.decode(&sig.sig).ok())
            .unwrap_or_default()
    }

    /// Check that the payload is exactly the base64 encoding of `file`
    pub fn ensure_file_matches_digest(&self, file: &[u8]) -> Result<()> {
        if self.envelope.payload != STANDARD.encode(file) {
            return Err(Error::IntegrityMismatch(
                "envelope payload does not match artifact".to_string(),
            ));
        }
        Ok(())
    }

    /// Verify the envelope signatures over the payload's PAE
    ///
    /// Passes if any one signature verifies.
    pub fn check_signature(&self, verifier: &Verifier) -> Result<()> {
        if self.envelope.signatures.is_empty() {
            return Err(Error::SignatureInvalid(
                "envelope has no signatures".to_string(),
            ));
        }

        let pae = self
            .envelope
            .pae()
            .map_err(|e| Error::SignatureInvalid(format!("malformed envelope payload: {}", e)))?;

        let mut last_error = None;
        for signature in &self.envelope.signatures {
            let sig = match signature.decode_sig() {
                Ok(sig) => sig,
                Err(e) => {
                    last_error = Some(Error::SignatureInvalid(format!(
                        "malformed envelope signature: {}",
                        e
                    )));
                    continue;
                }
            };
            match verifier.verify(&pae, &sig) {
                Ok(()) => return Ok(()),
                Err(e) => last_error = Some(crypto_signature_error(e)),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::SignatureInvalid("no envelope signature verified".to_string())
        }))
    }
}

/// What a bundle signed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureContent {
    MessageSignature(MessageSignature),
    Envelope(Envelope),
}

impl SignatureContent {
    pub fn as_envelope(&self) -> Option<&Envelope> {
        match self {
            SignatureContent::Envelope(envelope) => Some(envelope),
            SignatureContent::MessageSignature(_) => None,
        }
    }

    pub fn as_message_signature(&self) -> Option<&MessageSignature> {
        match self {
            SignatureContent::MessageSignature(message) => Some(message),
            SignatureContent::Envelope(_) => None,
        }
    }

    /// Raw signature bytes
    ///
    /// Never fails: an envelope without a decodable first signature yields an
    /// empty slice.
    pub fn signature(&self) -> Cow<'_, [u8]> {
        match self {
            SignatureContent::MessageSignature(message) => Cow::Borrowed(message.signature()),
            SignatureContent::Envelope(envelope) => Cow::Owned(envelope.signature()),
        }
    }

    /// Stored digest; `None` for envelopes
    pub fn digest(&self) -> Option<&[u8]> {
        self.as_message_signature().map(MessageSignature::digest)
    }

    /// Stored digest algorithm; `None` for envelopes
    pub fn digest_algorithm(&self) -> Option<&str> {
        self.as_message_signature()
            .map(MessageSignature::digest_algorithm)
    }

    pub fn ensure_file_matches_digest(&self, file: &[u8]) -> Result<()> {
        match self {
            SignatureContent::MessageSignature(message) => message.ensure_file_matches_digest(file),
            SignatureContent::Envelope(envelope) => envelope.ensure_file_matches_digest(file),
        }
    }

    pub fn check_signature(&self, verifier: &Verifier) -> Result<()> {
        match self {
            SignatureContent::MessageSignature(message) => message.check_signature(verifier),
            SignatureContent::Envelope(envelope) => envelope.check_signature(verifier),
        }
    }
}

impl From<MessageSignature> for SignatureContent {
    fn from(message: MessageSignature) -> Self {
        SignatureContent::MessageSignature(message)
    }
}

impl From<Envelope> for SignatureContent {
    fn from(envelope: Envelope) -> Self {
        SignatureContent::Envelope(envelope)
    }
}

impl From<DsseEnvelope> for SignatureContent {
    fn from(envelope: DsseEnvelope) -> Self {
        SignatureContent::Envelope(Envelope::new(envelope))
    }
}

fn crypto_signature_error(err: sigstore_crypto::Error) -> Error {
    match err {
        sigstore_crypto::Error::UnsupportedAlgorithm(msg) => Error::UnsupportedAlgorithm(msg),
        other => Error::SignatureInvalid(other.to_string()),
    }
}
