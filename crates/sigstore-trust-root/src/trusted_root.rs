//! Trust material types
//!
//! A [`TrustedRoot`] holds the Fulcio certificate authorities accepted for
//! issuing signing certificates and the long-lived public keys registered by
//! hint. It is assembled in memory; loading it from a serialized trust store
//! is the caller's concern.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use sigstore_crypto::{PublicKey, Verifier, X509Certificate};
use std::collections::HashMap;

/// Source of accepted certificate authorities and registered public keys
pub trait TrustedMaterial: Send + Sync {
    /// Fulcio certificate authorities, in order of preference
    fn fulcio_certificate_authorities(&self) -> &[CertificateAuthority];

    /// Resolve a public key hint to its registered verifier
    fn public_key_verifier(&self, hint: &str) -> Result<&TrustedPublicKey>;
}

/// A time window; a missing bound leaves that side open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidityPeriod {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl ValidityPeriod {
    /// A window open on both sides
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn starting_at(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn ending_at(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Whether `time` falls inside the window, bounds inclusive
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        let after_start = self.start.map_or(true, |s| time >= s);
        let before_end = self.end.map_or(true, |e| time <= e);
        after_start && before_end
    }

    /// Whether the whole interval `[not_before, not_after]` fits inside the window
    ///
    /// Partial overlap does not count.
    pub fn covers(&self, not_before: DateTime<Utc>, not_after: DateTime<Utc>) -> bool {
        let starts_inside = self.start.map_or(true, |s| s <= not_before);
        let ends_inside = self.end.map_or(true, |e| not_after <= e);
        starts_inside && ends_inside
    }
}

/// A Fulcio certificate authority
#[derive(Debug, Clone)]
pub struct CertificateAuthority {
    /// Informational URI of the authority
    pub uri: String,
    pub root: X509Certificate,
    pub intermediates: Vec<X509Certificate>,
    /// Window during which the authority is accepted for issuing certificates
    pub valid_for: ValidityPeriod,
}

impl CertificateAuthority {
    /// An authority rooted at `root`, with no intermediates and no validity window
    pub fn new(root: X509Certificate) -> Self {
        Self {
            uri: String::new(),
            root,
            intermediates: Vec::new(),
            valid_for: ValidityPeriod::unbounded(),
        }
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    pub fn with_intermediate(mut self, intermediate: X509Certificate) -> Self {
        self.intermediates.push(intermediate);
        self
    }

    pub fn with_validity_period(mut self, valid_for: ValidityPeriod) -> Self {
        self.valid_for = valid_for;
        self
    }
}

/// A registered long-lived public key
#[derive(Debug, Clone)]
pub struct TrustedPublicKey {
    verifier: Verifier,
    valid_for: ValidityPeriod,
}

impl TrustedPublicKey {
    pub fn new(verifier: Verifier) -> Self {
        Self {
            verifier,
            valid_for: ValidityPeriod::unbounded(),
        }
    }

    pub fn with_validity_period(mut self, valid_for: ValidityPeriod) -> Self {
        self.valid_for = valid_for;
        self
    }

    pub fn verifier(&self) -> &Verifier {
        &self.verifier
    }

    pub fn public_key(&self) -> &PublicKey {
        self.verifier.public_key()
    }

    pub fn validity_period(&self) -> &ValidityPeriod {
        &self.valid_for
    }

    /// Whether the key is active at `time`
    pub fn valid_at_time(&self, time: DateTime<Utc>) -> bool {
        self.valid_for.contains(time)
    }
}

/// In-memory trust material
#[derive(Debug, Clone, Default)]
pub struct TrustedRoot {
    certificate_authorities: Vec<CertificateAuthority>,
    public_keys: HashMap<String, TrustedPublicKey>,
}

impl TrustedRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a certificate authority; order is preserved
    pub fn with_certificate_authority(mut self, ca: CertificateAuthority) -> Self {
        self.certificate_authorities.push(ca);
        self
    }

    /// Register a public key under `hint`, replacing any previous key for it
    pub fn with_public_key(mut self, hint: impl Into<String>, key: TrustedPublicKey) -> Self {
        self.public_keys.insert(hint.into(), key);
        self
    }
}

impl TrustedMaterial for TrustedRoot {
    fn fulcio_certificate_authorities(&self) -> &[CertificateAuthority] {
        &self.certificate_authorities
    }

    fn public_key_verifier(&self, hint: &str) -> Result<&TrustedPublicKey> {
        self.public_keys
            .get(hint)
            .ok_or_else(|| Error::KeyNotFound(hint.to_string()))
    }
}
