//! X.509 certificate accessors
//!
//! Certificates keep their original DER next to the parsed form. Path
//! building and equality use the original bytes because re-encoding a parsed
//! certificate is not guaranteed to reproduce them.

use crate::error::{Error, Result};
use crate::keys::PublicKey;
use chrono::{DateTime, Utc};
use const_oid::db::rfc5280::ID_CE_SUBJECT_ALT_NAME;
use const_oid::ObjectIdentifier;
use x509_cert::der::Decode;
use x509_cert::ext::pkix::name::GeneralName;
use x509_cert::ext::pkix::SubjectAltName;
use x509_cert::time::Time;
use x509_cert::Certificate;

/// A parsed X.509 certificate together with its DER encoding
#[derive(Debug, Clone)]
pub struct X509Certificate {
    der: Vec<u8>,
    certificate: Certificate,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
    uris: Vec<String>,
}

impl X509Certificate {
    /// Parse a DER-encoded certificate
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let certificate = Certificate::from_der(der)
            .map_err(|e| Error::Certificate(format!("failed to parse certificate: {}", e)))?;

        let validity = &certificate.tbs_certificate.validity;
        let not_before = to_datetime(&validity.not_before)?;
        let not_after = to_datetime(&validity.not_after)?;
        let uris = uri_subject_alt_names(&certificate)?;

        Ok(Self {
            der: der.to_vec(),
            certificate,
            not_before,
            not_after,
            uris,
        })
    }

    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    pub fn certificate(&self) -> &Certificate {
        &self.certificate
    }

    pub fn not_before(&self) -> DateTime<Utc> {
        self.not_before
    }

    pub fn not_after(&self) -> DateTime<Utc> {
        self.not_after
    }

    /// Whether `time` lies within `[not_before, not_after]`, both inclusive
    pub fn is_valid_at(&self, time: DateTime<Utc>) -> bool {
        self.not_before <= time && time <= self.not_after
    }

    /// Decode the subject public key
    pub fn public_key(&self) -> Result<PublicKey> {
        PublicKey::from_spki(&self.certificate.tbs_certificate.subject_public_key_info)
    }

    /// Raw value of the first extension with the given OID
    pub fn extension_value(&self, oid: ObjectIdentifier) -> Option<&[u8]> {
        self.certificate
            .tbs_certificate
            .extensions
            .as_ref()?
            .iter()
            .find(|ext| ext.extn_id == oid)
            .map(|ext| ext.extn_value.as_bytes())
    }

    /// URI-form Subject Alternative Names, in certificate order
    pub fn uri_sans(&self) -> &[String] {
        &self.uris
    }
}

impl PartialEq for X509Certificate {
    fn eq(&self, other: &Self) -> bool {
        self.der == other.der
    }
}

impl Eq for X509Certificate {}

fn to_datetime(time: &Time) -> Result<DateTime<Utc>> {
    let secs = i64::try_from(time.to_unix_duration().as_secs())
        .map_err(|_| Error::Certificate(format!("validity time out of range: {:?}", time)))?;
    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| Error::Certificate(format!("validity time out of range: {:?}", time)))
}

fn uri_subject_alt_names(certificate: &Certificate) -> Result<Vec<String>> {
    let Some(extensions) = certificate.tbs_certificate.extensions.as_ref() else {
        return Ok(Vec::new());
    };
    let Some(san_ext) = extensions
        .iter()
        .find(|ext| ext.extn_id == ID_CE_SUBJECT_ALT_NAME)
    else {
        return Ok(Vec::new());
    };

    let san = SubjectAltName::from_der(san_ext.extn_value.as_bytes()).map_err(|e| {
        Error::Certificate(format!("failed to parse SubjectAltName extension: {}", e))
    })?;

    Ok(san
        .0
        .iter()
        .filter_map(|name| match name {
            GeneralName::UniformResourceIdentifier(uri) => Some(uri.to_string()),
            _ => None,
        })
        .collect())
}
