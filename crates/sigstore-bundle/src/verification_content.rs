//! Verification content of a bundle
//!
//! The signer is identified either by a short-lived certificate chain issued
//! by a Fulcio certificate authority ([`CertificateChain`]) or by a hint naming
//! a long-lived key registered in the trust material ([`PublicKeyIdentifier`]).
//!
//! Certificate chains are evaluated at the leaf's `notBefore`, not the current
//! time. Fulcio certificates live for minutes, and a bundle must keep
//! verifying after its leaf has expired.

use crate::error::{Error, Result};
use crate::signature_content::SignatureContent;
use chrono::{DateTime, Utc};
use const_oid::ObjectIdentifier;
use sigstore_crypto::{build_certificate_path, PublicKey, Verifier, X509Certificate};
use sigstore_trust_root::TrustedMaterial;
use sigstore_types::HashAlgorithm;

/// Fulcio OIDC issuer extension (1.3.6.1.4.1.57264.1.1)
pub const FULCIO_ISSUER_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.4.1.57264.1.1");

/// A key presented for comparison against verification content
#[derive(Debug, Clone, Copy)]
pub enum CandidateKey<'a> {
    Certificate(&'a X509Certificate),
    PublicKey(&'a PublicKey),
    /// Key material of a form that supports no equality check
    Opaque(&'a [u8]),
}

/// Leaf-first certificate chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateChain {
    leaf: X509Certificate,
    intermediates: Vec<X509Certificate>,
}

impl CertificateChain {
    /// Build a chain from leaf-first certificates
    pub fn new(certificates: Vec<X509Certificate>) -> Result<Self> {
        let mut certificates = certificates.into_iter();
        let leaf = certificates.next().ok_or(Error::EmptyCertificateChain)?;
        Ok(Self {
            leaf,
            intermediates: certificates.collect(),
        })
    }

    /// Parse a chain from leaf-first DER encodings
    pub fn from_der_chain<I, B>(ders: I) -> Result<Self>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let certificates = ders
            .into_iter()
            .map(|der| X509Certificate::from_der(der.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::InvalidCertificate)?;
        Self::new(certificates)
    }

    /// The signer's certificate
    pub fn leaf(&self) -> &X509Certificate {
        &self.leaf
    }

    /// Certificates shipped after the leaf; not necessarily on the final path
    pub fn intermediates(&self) -> &[X509Certificate] {
        &self.intermediates
    }

    /// All certificates, leaf first
    pub fn certificates(&self) -> impl Iterator<Item = &X509Certificate> {
        std::iter::once(&self.leaf).chain(self.intermediates.iter())
    }

    pub fn compare_key(&self, candidate: &CandidateKey<'_>, _trust: &dyn TrustedMaterial) -> bool {
        match candidate {
            CandidateKey::Certificate(cert) => *cert == &self.leaf,
            CandidateKey::PublicKey(_) | CandidateKey::Opaque(_) => false,
        }
    }

    pub fn valid_at_time(&self, time: DateTime<Utc>, _trust: &dyn TrustedMaterial) -> bool {
        self.leaf.is_valid_at(time)
    }

    /// Check the signature, then chain the leaf to a trusted authority
    ///
    /// Authorities are tried in order and the first that accepts wins. An
    /// authority is only considered if its validity window covers the whole
    /// leaf validity.
    pub fn verify(&self, content: &SignatureContent, trust: &dyn TrustedMaterial) -> Result<()> {
        let verifier = self
            .leaf
            .public_key()
            .and_then(|key| Verifier::load(key, HashAlgorithm::Sha2_256))
            .map_err(Error::InvalidKey)?;

        tracing::debug!(
            "Checking {} signature against leaf certificate",
            verifier.scheme().name()
        );
        content.check_signature(&verifier)?;

        let not_before = self.leaf.not_before();
        let not_after = self.leaf.not_after();

        for (index, ca) in trust.fulcio_certificate_authorities().iter().enumerate() {
            if !ca.valid_for.covers(not_before, not_after) {
                tracing::debug!(
                    "Skipping certificate authority {} ({}): validity window does not cover leaf {} - {}",
                    index,
                    ca.uri,
                    not_before,
                    not_after
                );
                continue;
            }

            let intermediates: Vec<&X509Certificate> = self
                .intermediates
                .iter()
                .chain(ca.intermediates.iter())
                .collect();

            match build_certificate_path(&self.leaf, &intermediates, &ca.root, not_before) {
                Ok(()) => {
                    tracing::debug!(
                        "Certificate chain verified against certificate authority {} ({})",
                        index,
                        ca.uri
                    );
                    return Ok(());
                }
                Err(e) => {
                    tracing::debug!(
                        "Certificate authority {} ({}) rejected chain: {}",
                        index,
                        ca.uri,
                        e
                    );
                }
            }
        }

        tracing::warn!(
            "No trusted certificate authority accepted the certificate chain for leaf issued at {}",
            not_before
        );
        Err(Error::ChainVerificationFailed)
    }

    /// OIDC issuer recorded by Fulcio in the leaf
    pub fn issuer(&self) -> Option<String> {
        self.leaf
            .extension_value(FULCIO_ISSUER_OID)
            .map(|value| String::from_utf8_lossy(value).into_owned())
    }

    /// First URI Subject Alternative Name of the leaf
    pub fn san(&self) -> Option<String> {
        self.leaf.uri_sans().first().cloned()
    }
}

/// Reference to a key registered in the trust material
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyIdentifier {
    hint: String,
}

impl PublicKeyIdentifier {
    pub fn new(hint: impl Into<String>) -> Self {
        Self { hint: hint.into() }
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn compare_key(&self, candidate: &CandidateKey<'_>, trust: &dyn TrustedMaterial) -> bool {
        let CandidateKey::PublicKey(candidate) = candidate else {
            return false;
        };
        trust
            .public_key_verifier(&self.hint)
            .map(|key| key.public_key() == *candidate)
            .unwrap_or(false)
    }

    pub fn valid_at_time(&self, time: DateTime<Utc>, trust: &dyn TrustedMaterial) -> bool {
        trust
            .public_key_verifier(&self.hint)
            .map(|key| key.valid_at_time(time))
            .unwrap_or(false)
    }

    pub fn verify(&self, content: &SignatureContent, trust: &dyn TrustedMaterial) -> Result<()> {
        let key = trust.public_key_verifier(&self.hint).map_err(|e| {
            tracing::debug!("Public key hint {} not found in trust material", self.hint);
            Error::UnresolvableKey(e)
        })?;
        content.check_signature(key.verifier())
    }
}

/// Who signed a bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationContent {
    CertificateChain(CertificateChain),
    PublicKey(PublicKeyIdentifier),
}

impl VerificationContent {
    pub fn as_certificate_chain(&self) -> Option<&CertificateChain> {
        match self {
            VerificationContent::CertificateChain(chain) => Some(chain),
            VerificationContent::PublicKey(_) => None,
        }
    }

    pub fn as_public_key(&self) -> Option<&PublicKeyIdentifier> {
        match self {
            VerificationContent::PublicKey(key) => Some(key),
            VerificationContent::CertificateChain(_) => None,
        }
    }

    /// Whether `candidate` is the key this content names
    pub fn compare_key(&self, candidate: &CandidateKey<'_>, trust: &dyn TrustedMaterial) -> bool {
        match self {
            VerificationContent::CertificateChain(chain) => chain.compare_key(candidate, trust),
            VerificationContent::PublicKey(key) => key.compare_key(candidate, trust),
        }
    }

    pub fn valid_at_time(&self, time: DateTime<Utc>, trust: &dyn TrustedMaterial) -> bool {
        match self {
            VerificationContent::CertificateChain(chain) => chain.valid_at_time(time, trust),
            VerificationContent::PublicKey(key) => key.valid_at_time(time, trust),
        }
    }

    /// Decide whether `content` was signed by a trusted credential
    pub fn verify(&self, content: &SignatureContent, trust: &dyn TrustedMaterial) -> Result<()> {
        match self {
            VerificationContent::CertificateChain(chain) => chain.verify(content, trust),
            VerificationContent::PublicKey(key) => key.verify(content, trust),
        }
    }

    /// `None` for public keys
    pub fn issuer(&self) -> Option<String> {
        self.as_certificate_chain().and_then(CertificateChain::issuer)
    }

    /// `None` for public keys
    pub fn san(&self) -> Option<String> {
        self.as_certificate_chain().and_then(CertificateChain::san)
    }
}

impl From<CertificateChain> for VerificationContent {
    fn from(chain: CertificateChain) -> Self {
        VerificationContent::CertificateChain(chain)
    }
}

impl From<PublicKeyIdentifier> for VerificationContent {
    fn from(key: PublicKeyIdentifier) -> Self {
        VerificationContent::PublicKey(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigstore_trust_root::{TrustedPublicKey, TrustedRoot, ValidityPeriod};

    fn ed25519_key(seed: u8) -> PublicKey {
        PublicKey::from(ed25519_dalek::SigningKey::from_bytes(&[seed; 32]).verifying_key())
    }

    fn trust_with_key(hint: &str, key: PublicKey) -> TrustedRoot {
        let verifier = Verifier::load(key, HashAlgorithm::Sha2_256).unwrap();
        TrustedRoot::new().with_public_key(hint, TrustedPublicKey::new(verifier))
    }

    #[test]
    fn test_empty_chain_rejected() {
        assert!(matches!(
            CertificateChain::new(Vec::new()),
            Err(Error::EmptyCertificateChain)
        ));
        assert!(matches!(
            CertificateChain::from_der_chain(Vec::<Vec<u8>>::new()),
            Err(Error::EmptyCertificateChain)
        ));
    }

    #[test]
    fn test_malformed_chain_rejected() {
        assert!(matches!(
            CertificateChain::from_der_chain([b"not a certificate".as_slice()]),
            Err(Error::InvalidCertificate(_))
        ));
    }

    #[test]
    fn test_public_key_compare_key() {
        let trust = trust_with_key("k", ed25519_key(1));
        let id = PublicKeyIdentifier::new("k");

        assert!(id.compare_key(&CandidateKey::PublicKey(&ed25519_key(1)), &trust));
        assert!(!id.compare_key(&CandidateKey::PublicKey(&ed25519_key(2)), &trust));
        assert!(!id.compare_key(&CandidateKey::Opaque(b"k"), &trust));

        let unknown = PublicKeyIdentifier::new("missing");
        assert!(!unknown.compare_key(&CandidateKey::PublicKey(&ed25519_key(1)), &trust));
    }

    #[test]
    fn test_public_key_valid_at_time() {
        let start = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let verifier = Verifier::load(ed25519_key(1), HashAlgorithm::Sha2_256).unwrap();
        let trust = TrustedRoot::new().with_public_key(
            "k",
            TrustedPublicKey::new(verifier)
                .with_validity_period(ValidityPeriod::unbounded().starting_at(start)),
        );

        let id = VerificationContent::from(PublicKeyIdentifier::new("k"));
        assert!(id.valid_at_time(start, &trust));
        assert!(!id.valid_at_time(start - chrono::Duration::seconds(1), &trust));
        assert!(!PublicKeyIdentifier::new("missing").valid_at_time(start, &trust));
    }

    #[test]
    fn test_public_key_has_no_identity() {
        let id = VerificationContent::from(PublicKeyIdentifier::new("k"));
        assert_eq!(id.issuer(), None);
        assert_eq!(id.san(), None);
        assert!(id.as_public_key().is_some());
        assert!(id.as_certificate_chain().is_none());
    }

    #[test]
    fn test_issuer_oid() {
        assert_eq!(FULCIO_ISSUER_OID.to_string(), "1.3.6.1.4.1.57264.1.1");
    }
}
