//! Throwaway PKI for integration tests
//!
//! Builds root → intermediate → leaf with rcgen. The leaf mimics a Fulcio
//! certificate: ten minutes of validity, code-signing EKU, optional issuer
//! extension and URI SAN.

#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use p256::ecdsa::signature::hazmat::PrehashSigner;
use p256::ecdsa::signature::Signer;
use p256::pkcs8::DecodePrivateKey;
use rcgen::{
    BasicConstraints, Certificate, CertificateParams, CustomExtension, DistinguishedName, DnType,
    ExtendedKeyUsagePurpose, Ia5String, IsCa, KeyPair, KeyUsagePurpose, SanType,
};
use sigstore_bundle::crypto::{sha256, X509Certificate};
use sigstore_bundle::trust_root::{CertificateAuthority, ValidityPeriod};
use sigstore_bundle::types::{pae, DsseEnvelope, DsseSignature, INTOTO_MEDIA_TYPE};
use sigstore_bundle::{CertificateChain, MessageSignature, SignatureContent};
use time::{Duration, OffsetDateTime};

pub const ISSUER: &str = "https://token.actions.githubusercontent.com";
pub const SAN: &str = "https://github.com/example/project/.github/workflows/release.yml@refs/heads/main";

/// Leaf issuance instant used by every fixture
pub fn leaf_not_before() -> OffsetDateTime {
    rcgen::date_time_ymd(2024, 3, 1)
}

pub struct LeafOptions {
    pub not_before: OffsetDateTime,
    pub lifetime: Duration,
    pub code_signing: bool,
    pub issuer: Option<&'static str>,
    pub san: Option<&'static str>,
    /// Issue the leaf for a P-384 key instead of P-256
    pub p384: bool,
}

impl Default for LeafOptions {
    fn default() -> Self {
        Self {
            not_before: leaf_not_before(),
            lifetime: Duration::minutes(10),
            code_signing: true,
            issuer: Some(ISSUER),
            san: Some(SAN),
            p384: false,
        }
    }
}

/// Private key of a fixture leaf
pub enum LeafKey {
    P256(p256::ecdsa::SigningKey),
    /// Signs SHA-256 digests, as Sigstore clients do for P-384 certificates
    P384(p384::ecdsa::SigningKey),
}

impl LeafKey {
    /// DER-encoded ECDSA signature over `message`
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        match self {
            LeafKey::P256(key) => {
                let signature: p256::ecdsa::Signature = key.sign(message);
                signature.to_der().as_bytes().to_vec()
            }
            LeafKey::P384(key) => {
                let signature: p384::ecdsa::Signature =
                    key.sign_prehash(sha256(message).as_bytes()).unwrap();
                signature.to_der().as_bytes().to_vec()
            }
        }
    }
}

pub struct Pki {
    pub root: X509Certificate,
    pub intermediate: X509Certificate,
    pub leaf: X509Certificate,
    pub leaf_key: LeafKey,
}

impl Pki {
    pub fn new() -> Self {
        Self::with_leaf(LeafOptions::default())
    }

    pub fn with_leaf(options: LeafOptions) -> Self {
        let (root_cert, root_key) = ca_certificate("test root", None);
        let (intermediate_cert, intermediate_key) =
            ca_certificate("test intermediate", Some((&root_cert, &root_key)));

        let leaf_key = if options.p384 {
            KeyPair::generate_for(&rcgen::PKCS_ECDSA_P384_SHA384).unwrap()
        } else {
            KeyPair::generate().unwrap()
        };
        let leaf_cert = leaf_params(&options)
            .signed_by(&leaf_key, &intermediate_cert, &intermediate_key)
            .unwrap();

        let pkcs8 = leaf_key.serialize_der();
        let leaf_key = if options.p384 {
            LeafKey::P384(p384::ecdsa::SigningKey::from_pkcs8_der(&pkcs8).unwrap())
        } else {
            LeafKey::P256(p256::ecdsa::SigningKey::from_pkcs8_der(&pkcs8).unwrap())
        };

        Self {
            root: X509Certificate::from_der(root_cert.der()).unwrap(),
            intermediate: X509Certificate::from_der(intermediate_cert.der()).unwrap(),
            leaf: X509Certificate::from_der(leaf_cert.der()).unwrap(),
            leaf_key,
        }
    }

    /// Chain as shipped in a bundle: leaf and intermediate
    pub fn chain(&self) -> CertificateChain {
        CertificateChain::new(vec![self.leaf.clone(), self.intermediate.clone()]).unwrap()
    }

    /// Chain carrying only the leaf
    pub fn leaf_only_chain(&self) -> CertificateChain {
        CertificateChain::new(vec![self.leaf.clone()]).unwrap()
    }

    /// Authority whose root anchors this PKI, with no validity window
    pub fn authority(&self) -> CertificateAuthority {
        CertificateAuthority::new(self.root.clone()).with_uri("https://fulcio.test")
    }

    pub fn sign_message(&self, artifact: &[u8]) -> SignatureContent {
        MessageSignature::new(
            sha256(artifact).as_bytes().to_vec(),
            "SHA2_256",
            self.leaf_key.sign(artifact),
        )
        .into()
    }

    pub fn sign_envelope(&self, payload: &[u8]) -> SignatureContent {
        sign_envelope_with(&self.leaf_key, payload)
    }
}

pub fn sign_envelope_with(key: &LeafKey, payload: &[u8]) -> SignatureContent {
    let signature = key.sign(&pae(INTOTO_MEDIA_TYPE, payload));
    DsseEnvelope::new(
        INTOTO_MEDIA_TYPE.to_string(),
        STANDARD.encode(payload),
        vec![DsseSignature::from_bytes(&signature, "")],
    )
    .into()
}

/// Window spanning `[start, end]`, given as offsets from the leaf's notBefore
pub fn window(start: Option<Duration>, end: Option<Duration>) -> ValidityPeriod {
    let mut period = ValidityPeriod::unbounded();
    if let Some(start) = start {
        period = period.starting_at(to_chrono(leaf_not_before() + start));
    }
    if let Some(end) = end {
        period = period.ending_at(to_chrono(leaf_not_before() + end));
    }
    period
}

pub fn to_chrono(time: OffsetDateTime) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::<chrono::Utc>::from_timestamp(time.unix_timestamp(), 0).unwrap()
}

pub fn statement_json() -> Vec<u8> {
    let digest = sha256(b"release artifact").to_hex();
    format!(
        r#"{{"_type":"https://in-toto.io/Statement/v1","subject":[{{"name":"release.tar.gz","digest":{{"sha256":"{}"}}}}],"predicateType":"https://slsa.dev/provenance/v1","predicate":{{"buildDefinition":{{}}}}}}"#,
        digest
    )
    .into_bytes()
}

fn ca_certificate(name: &str, issuer: Option<(&Certificate, &KeyPair)>) -> (Certificate, KeyPair) {
    let key = KeyPair::generate().unwrap();
    let mut params = CertificateParams::default();
    params.distinguished_name = DistinguishedName::new();
    params.distinguished_name.push(DnType::CommonName, name);
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.key_usages = vec![KeyUsagePurpose::KeyCertSign, KeyUsagePurpose::CrlSign];
    params.not_before = rcgen::date_time_ymd(2020, 1, 1);
    params.not_after = rcgen::date_time_ymd(2040, 1, 1);

    let cert = match issuer {
        Some((issuer_cert, issuer_key)) => params.signed_by(&key, issuer_cert, issuer_key),
        None => params.self_signed(&key),
    }
    .unwrap();
    (cert, key)
}

fn leaf_params(options: &LeafOptions) -> CertificateParams {
    let mut params = CertificateParams::default();
    params.distinguished_name = DistinguishedName::new();
    params.is_ca = IsCa::NoCa;
    params.key_usages = vec![KeyUsagePurpose::DigitalSignature];
    params.extended_key_usages = if options.code_signing {
        vec![ExtendedKeyUsagePurpose::CodeSigning]
    } else {
        vec![ExtendedKeyUsagePurpose::ServerAuth]
    };
    params.not_before = options.not_before;
    params.not_after = options.not_before + options.lifetime;
    if let Some(san) = options.san {
        params.subject_alt_names = vec![SanType::URI(Ia5String::try_from(san).unwrap())];
    }
    if let Some(issuer) = options.issuer {
        params.custom_extensions = vec![CustomExtension::from_oid_content(
            &[1, 3, 6, 1, 4, 1, 57264, 1, 1],
            issuer.as_bytes().to_vec(),
        )];
    }
    params
}
