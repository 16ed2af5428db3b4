//! Signature verification

use crate::error::{Error, Result};
use crate::hash::sha256;
use crate::keys::{PublicKey, SigningScheme};
use ed25519_dalek::Verifier as _;
use p256::ecdsa::signature::hazmat::PrehashVerifier;
use p256::ecdsa::signature::Verifier as _;
use sigstore_types::{HashAlgorithm, Sha256Hash};

/// A public key bound to the hash algorithm signatures are checked with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verifier {
    public_key: PublicKey,
    hash_algorithm: HashAlgorithm,
}

impl Verifier {
    /// Bind a public key to a hash algorithm
    ///
    /// Only SHA-256 is accepted. ECDSA P-384 keys verify a SHA-256 digest;
    /// Ed25519 ignores the hash and signs the message directly.
    pub fn load(public_key: PublicKey, hash_algorithm: HashAlgorithm) -> Result<Self> {
        if hash_algorithm != HashAlgorithm::Sha2_256 {
            return Err(Error::UnsupportedAlgorithm(format!(
                "{} verifier with {}",
                public_key.scheme().name(),
                hash_algorithm
            )));
        }
        Ok(Self {
            public_key,
            hash_algorithm,
        })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash_algorithm
    }

    pub fn scheme(&self) -> SigningScheme {
        self.public_key.scheme()
    }

    /// Verify `signature` over `message`
    ///
    /// ECDSA signatures are accepted in ASN.1 DER or fixed-size form.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()> {
        match &self.public_key {
            PublicKey::EcdsaP256(key) => {
                let sig = parse_p256_signature(signature)?;
                key.verify(message, &sig)
                    .map_err(|e| Error::SignatureInvalid(format!("ECDSA P-256: {}", e)))
            }
            PublicKey::EcdsaP384(_) => self.verify_prehashed(&sha256(message), signature),
            PublicKey::Ed25519(key) => {
                let sig = ed25519_dalek::Signature::from_slice(signature)
                    .map_err(|e| Error::SignatureInvalid(format!("malformed Ed25519 signature: {}", e)))?;
                key.verify(message, &sig)
                    .map_err(|e| Error::SignatureInvalid(format!("Ed25519: {}", e)))
            }
        }
    }

    /// Verify `signature` over a message of which only the SHA-256 digest is known
    pub fn verify_prehashed(&self, digest: &Sha256Hash, signature: &[u8]) -> Result<()> {
        match &self.public_key {
            PublicKey::EcdsaP256(key) => {
                let sig = parse_p256_signature(signature)?;
                key.verify_prehash(digest.as_bytes(), &sig)
                    .map_err(|e| Error::SignatureInvalid(format!("ECDSA P-256: {}", e)))
            }
            PublicKey::EcdsaP384(key) => {
                let sig = parse_p384_signature(signature)?;
                key.verify_prehash(digest.as_bytes(), &sig)
                    .map_err(|e| Error::SignatureInvalid(format!("ECDSA P-384: {}", e)))
            }
            PublicKey::Ed25519(_) => Err(Error::UnsupportedAlgorithm(
                "Ed25519 does not support prehashed verification".to_string(),
            )),
        }
    }
}

fn parse_p256_signature(signature: &[u8]) -> Result<p256::ecdsa::Signature> {
    p256::ecdsa::Signature::from_der(signature)
        .or_else(|_| p256::ecdsa::Signature::from_slice(signature))
        .map_err(|e| Error::SignatureInvalid(format!("malformed ECDSA signature: {}", e)))
}

fn parse_p384_signature(signature: &[u8]) -> Result<p384::ecdsa::Signature> {
    p384::ecdsa::Signature::from_der(signature)
        .or_else(|_| p384::ecdsa::Signature::from_slice(signature))
        .map_err(|e| Error::SignatureInvalid(format!("malformed ECDSA signature: {}", e)))
}
