//! Public keys accepted for Sigstore signatures

use crate::error::{Error, Result};
use const_oid::db::rfc5912::{ID_EC_PUBLIC_KEY, SECP_256_R_1, SECP_384_R_1};
use const_oid::db::rfc8410::ID_ED_25519;
use const_oid::ObjectIdentifier;
use x509_cert::der::Decode;
use x509_cert::spki::SubjectPublicKeyInfoOwned;

/// Signature scheme of a public key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningScheme {
    /// ECDSA over P-256 with SHA-256
    EcdsaP256Sha256,
    /// ECDSA over P-384 with a SHA-256 digest
    EcdsaP384Sha256,
    /// Pure Ed25519
    Ed25519,
}

impl SigningScheme {
    pub fn name(&self) -> &'static str {
        match self {
            SigningScheme::EcdsaP256Sha256 => "ECDSA_P256_SHA256",
            SigningScheme::EcdsaP384Sha256 => "ECDSA_P384_SHA256",
            SigningScheme::Ed25519 => "ED25519",
        }
    }
}

/// A decoded public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    EcdsaP256(p256::ecdsa::VerifyingKey),
    EcdsaP384(p384::ecdsa::VerifyingKey),
    Ed25519(ed25519_dalek::VerifyingKey),
}

impl PublicKey {
    /// Decode a DER-encoded SubjectPublicKeyInfo
    pub fn from_spki_der(der: &[u8]) -> Result<Self> {
        let spki = SubjectPublicKeyInfoOwned::from_der(der)
            .map_err(|e| Error::InvalidKey(format!("failed to parse SubjectPublicKeyInfo: {}", e)))?;
        Self::from_spki(&spki)
    }

    /// Decode a parsed SubjectPublicKeyInfo
    pub fn from_spki(spki: &SubjectPublicKeyInfoOwned) -> Result<Self> {
        let key_bytes = spki
            .subject_public_key
            .as_bytes()
            .ok_or_else(|| Error::InvalidKey("public key bit string is not octet aligned".into()))?;

        if spki.algorithm.oid == ID_EC_PUBLIC_KEY {
            let curve = ec_curve_oid(spki)?;
            if curve == SECP_256_R_1 {
                p256::ecdsa::VerifyingKey::from_sec1_bytes(key_bytes)
                    .map(PublicKey::EcdsaP256)
                    .map_err(|e| Error::InvalidKey(format!("malformed P-256 public key: {}", e)))
            } else if curve == SECP_384_R_1 {
                p384::ecdsa::VerifyingKey::from_sec1_bytes(key_bytes)
                    .map(PublicKey::EcdsaP384)
                    .map_err(|e| Error::InvalidKey(format!("malformed P-384 public key: {}", e)))
            } else {
                Err(Error::InvalidKey(format!("unsupported EC curve: {}", curve)))
            }
        } else if spki.algorithm.oid == ID_ED_25519 {
            let raw: [u8; 32] = key_bytes.try_into().map_err(|_| {
                Error::InvalidKey(format!(
                    "Ed25519 public key must be 32 bytes, got {}",
                    key_bytes.len()
                ))
            })?;
            let key = ed25519_dalek::VerifyingKey::from_bytes(&raw)
                .map_err(|e| Error::InvalidKey(format!("malformed Ed25519 public key: {}", e)))?;
            Ok(PublicKey::Ed25519(key))
        } else {
            Err(Error::InvalidKey(format!(
                "unsupported public key algorithm: {}",
                spki.algorithm.oid
            )))
        }
    }

    pub fn scheme(&self) -> SigningScheme {
        match self {
            PublicKey::EcdsaP256(_) => SigningScheme::EcdsaP256Sha256,
            PublicKey::EcdsaP384(_) => SigningScheme::EcdsaP384Sha256,
            PublicKey::Ed25519(_) => SigningScheme::Ed25519,
        }
    }
}

impl From<p256::ecdsa::VerifyingKey> for PublicKey {
    fn from(key: p256::ecdsa::VerifyingKey) -> Self {
        PublicKey::EcdsaP256(key)
    }
}

impl From<p384::ecdsa::VerifyingKey> for PublicKey {
    fn from(key: p384::ecdsa::VerifyingKey) -> Self {
        PublicKey::EcdsaP384(key)
    }
}

impl From<ed25519_dalek::VerifyingKey> for PublicKey {
    fn from(key: ed25519_dalek::VerifyingKey) -> Self {
        PublicKey::Ed25519(key)
    }
}

/// Extract the EC curve OID from a SubjectPublicKeyInfo
///
/// For EC keys, the algorithm parameters contain the curve OID
fn ec_curve_oid(spki: &SubjectPublicKeyInfoOwned) -> Result<ObjectIdentifier> {
    let Some(params) = &spki.algorithm.parameters else {
        return Err(Error::InvalidKey(
            "EC public key missing curve parameters".to_string(),
        ));
    };

    // value() is the OID content without tag and length
    ObjectIdentifier::from_bytes(params.value())
        .map_err(|e| Error::InvalidKey(format!("failed to parse EC curve OID: {}", e)))
}
