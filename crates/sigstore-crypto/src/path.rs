//! Certificate path building
//!
//! Uses rustls-webpki for RFC 5280 path validation: signatures at each level,
//! validity periods, basic constraints and extended key usage. WebPKI trust
//! anchors carry no validity period, so the root's window is checked here.

use crate::error::{Error, Result};
use crate::x509::X509Certificate;
use chrono::{DateTime, Utc};
use rustls_pki_types::{CertificateDer, UnixTime};
use std::time::Duration;
use webpki::{EndEntityCert, KeyUsage};

/// Extended Key Usage: Code Signing (1.3.6.1.5.5.7.3.3), OID content bytes
pub const EKU_CODE_SIGNING: &[u8] = &[0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x03];

/// Build a path from `leaf` through `intermediates` to `root`
///
/// Every certificate on the path, root included, must be valid at
/// `evaluation_time`. Certificates carrying an extended key usage extension
/// must list code signing; those without one are unrestricted. Intermediates
/// are a pool: unused entries are ignored.
pub fn build_certificate_path(
    leaf: &X509Certificate,
    intermediates: &[&X509Certificate],
    root: &X509Certificate,
    evaluation_time: DateTime<Utc>,
) -> Result<()> {
    if !root.is_valid_at(evaluation_time) {
        return Err(Error::PathBuilding(format!(
            "trust anchor not valid at {} (valid {} to {})",
            evaluation_time,
            root.not_before(),
            root.not_after()
        )));
    }

    let leaf_der = CertificateDer::from(leaf.as_der());
    let end_entity = EndEntityCert::try_from(&leaf_der)
        .map_err(|e| Error::PathBuilding(format!("failed to parse leaf certificate: {:?}", e)))?;

    let root_der = CertificateDer::from(root.as_der());
    let anchors = [webpki::anchor_from_trusted_cert(&root_der)
        .map_err(|e| Error::PathBuilding(format!("failed to create trust anchor: {:?}", e)))?];

    let intermediates: Vec<CertificateDer<'_>> = intermediates
        .iter()
        .map(|cert| CertificateDer::from(cert.as_der()))
        .collect();

    let secs = u64::try_from(evaluation_time.timestamp()).map_err(|_| {
        Error::PathBuilding(format!(
            "evaluation time {} is before the Unix epoch",
            evaluation_time
        ))
    })?;
    let time = UnixTime::since_unix_epoch(Duration::from_secs(secs));

    end_entity
        .verify_for_usage(
            webpki::ALL_VERIFICATION_ALGS,
            &anchors,
            &intermediates,
            time,
            KeyUsage::required_if_present(EKU_CODE_SIGNING),
            None, // No revocation checking
            None,
        )
        .map_err(|e| Error::PathBuilding(format!("{:?}", e)))?;

    Ok(())
}
