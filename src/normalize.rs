// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate normalization and armored file handling.
//!
//! Certificates are stored internally DER-encoded. They arrive in
//! several shapes — armored text, bare base64, raw binary — and
//! [`normalize_certificate`] converts any of them to canonical DER in a
//! single pass: strip armor, decide base64 vs binary with a strict
//! check, decode if needed, then validate the result through the
//! trust-store adapter. Normalizing already-canonical bytes is a no-op.

extern crate alloc;

use alloc::vec::Vec;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::{Error, Result};
#[cfg(feature = "std")]
use crate::pem::to_armor;
use crate::pem::{split_armored_list, strip_armor};
use crate::trust_store::trust_store;
use crate::util::{is_valid_base64, strip_whitespace};

/// Canonical DER certificate bytes.
///
/// Values are created only by normalization and are read-only
/// thereafter; at the point one is returned it has passed structural
/// validation by the trust-store adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateDer(Vec<u8>);

impl CertificateDer {
    pub(crate) fn new(der: Vec<u8>) -> Self {
        Self(der)
    }

    /// The canonical DER bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the value, returning the DER bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CertificateDer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Convert an incoming certificate to canonical DER.
///
/// Accepts armored text, bare base64 (with or without whitespace), or
/// raw DER. The payload is treated as base64 only when it passes a
/// strict alphabet + padding check, so binary input is never decoded by
/// accident. The result is validated through the trust-store adapter
/// before being returned.
pub fn normalize_certificate(rawcert: &[u8]) -> Result<CertificateDer> {
    if rawcert.is_empty() {
        return Err(Error::certificate_format("empty certificate input"));
    }

    let stripped: &[u8] = match core::str::from_utf8(rawcert) {
        Ok(text) => strip_armor(text).as_bytes(),
        Err(_) => rawcert,
    };

    let dercert = if is_valid_base64(stripped) {
        let compact = strip_whitespace(stripped);
        BASE64
            .decode(&compact)
            .map_err(|e| Error::Base64Decode(alloc::string::ToString::to_string(&e)))?
    } else {
        stripped.to_vec()
    };

    validate_certificate(&dercert)?;

    Ok(CertificateDer::new(dercert))
}

/// Validate DER certificate bytes through the trust-store adapter.
///
/// The adapter's malformed-structure signal maps to the bad-encoding
/// format error; any other adapter failure is carried through with its
/// message.
pub fn validate_certificate(dercert: &[u8]) -> Result<()> {
    if let Err(e) = trust_store()?.parse(dercert) {
        log::error!("certificate validation failed: {}", e);
        return Err(e.into());
    }
    Ok(())
}

/// Normalize every armored block in a text, in order.
///
/// The whole batch fails on the first bad block; no partial results are
/// returned.
pub fn load_certificate_list(text: &str) -> Result<Vec<CertificateDer>> {
    split_armored_list(text)
        .into_iter()
        .map(|block| normalize_certificate(block.as_bytes()))
        .collect()
}

/// Read and normalize a certificate from an armored file.
#[cfg(feature = "std")]
pub fn load_certificate_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<CertificateDer> {
    let path = path.as_ref();
    let data = std::fs::read(path)
        .map_err(|e| Error::file(path.to_string_lossy(), e.to_string()))?;
    normalize_certificate(&data)
}

/// Read and normalize a list of certificates from an armored file.
#[cfg(feature = "std")]
pub fn load_certificate_list_from_file<P: AsRef<std::path::Path>>(
    path: P,
) -> Result<Vec<CertificateDer>> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)
        .map_err(|e| Error::file(path.to_string_lossy(), e.to_string()))?;
    load_certificate_list(&data)
}

/// Write a certificate to a file in armored form.
///
/// The input may be armored, base64, or DER; it is normalized to
/// canonical DER and re-armored regardless.
#[cfg(feature = "std")]
pub fn write_certificate<P: AsRef<std::path::Path>>(rawcert: &[u8], path: P) -> Result<()> {
    let path = path.as_ref();
    let dercert = normalize_certificate(rawcert)?;

    std::fs::write(path, to_armor(dercert.as_bytes()))
        .map_err(|e| Error::file(path.to_string_lossy(), e.to_string()))
}

/// Write a list of certificates to a file in armored form.
///
/// Every certificate is normalized before anything is written; the
/// first bad input aborts the whole batch and leaves the file untouched.
#[cfg(feature = "std")]
pub fn write_certificate_list<P, C>(rawcerts: &[C], path: P) -> Result<()>
where
    P: AsRef<std::path::Path>,
    C: AsRef<[u8]>,
{
    let path = path.as_ref();
    let dercerts = rawcerts
        .iter()
        .map(|raw| normalize_certificate(raw.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let mut out = alloc::string::String::new();
    for cert in &dercerts {
        out.push_str(&to_armor(cert.as_bytes()));
        out.push('\n');
    }

    std::fs::write(path, out).map_err(|e| Error::file(path.to_string_lossy(), e.to_string()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(all(test, feature = "rustcrypto-backend"))]
mod tests {
    use super::*;
    use crate::error::CertificateFormatError;
    use crate::testutil;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_normalize_raw_der_is_identity() {
        init_logging();
        let der = testutil::build_test_cert(None);
        let normalized = normalize_certificate(&der).unwrap();
        assert_eq!(normalized.as_bytes(), der.as_slice());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let der = testutil::build_test_cert(None);
        let once = normalize_certificate(&der).unwrap();
        let twice = normalize_certificate(once.as_bytes()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_armored_and_base64() {
        let der = testutil::build_test_cert(None);

        let armored = to_armor(&der);
        let normalized = normalize_certificate(armored.as_bytes()).unwrap();
        assert_eq!(normalized.as_bytes(), der.as_slice());

        // Bare base64 without armor normalizes the same way.
        let body = crate::pem::strip_armor(&armored);
        let normalized = normalize_certificate(body.as_bytes()).unwrap();
        assert_eq!(normalized.as_bytes(), der.as_slice());
    }

    #[test]
    fn test_normalize_rejects_garbage_binary() {
        let err = normalize_certificate(&[0x30, 0x82, 0xFF, 0xFF, 0x00]).unwrap_err();
        assert!(matches!(
            err,
            Error::CertificateFormat(CertificateFormatError::BadEncoding)
        ));
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(matches!(
            normalize_certificate(b"").unwrap_err(),
            Error::CertificateFormat(CertificateFormatError::Other(_))
        ));
    }

    #[test]
    fn test_normalize_noncanonical_base64_fails_decode() {
        // Passes the alphabet/padding pre-check but has non-zero
        // trailing bits, which the strict decoder rejects.
        let err = normalize_certificate(b"AB==").unwrap_err();
        assert!(matches!(err, Error::Base64Decode(_)));
    }

    #[test]
    fn test_round_trip_through_armor() {
        let der = testutil::build_test_cert(Some(testutil::test_san_extension()));
        let armored = to_armor(&der);
        let body = strip_armor(&armored);
        let compact = crate::util::strip_whitespace(body.as_bytes());
        let decoded = BASE64.decode(&compact).unwrap();
        assert_eq!(decoded, der);
    }

    #[test]
    fn test_load_certificate_list() {
        let a = testutil::build_test_cert(None);
        let b = testutil::build_test_cert(Some(testutil::test_eku_extension()));
        let text = alloc::format!("{}\n{}\n", to_armor(&a), to_armor(&b));

        let certs = load_certificate_list(&text).unwrap();
        assert_eq!(certs.len(), 2);
        assert_eq!(certs[0].as_bytes(), a.as_slice());
        assert_eq!(certs[1].as_bytes(), b.as_slice());
    }

    #[test]
    fn test_load_certificate_list_aborts_on_bad_block() {
        let a = testutil::build_test_cert(None);
        let bad = crate::pem::make_pem("bm90IGEgY2VydGlmaWNhdGU=");
        let text = alloc::format!("{}\n{}\n", to_armor(&a), bad);

        assert!(load_certificate_list(&text).is_err());
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_write_and_load_file_round_trip() {
        let der = testutil::build_test_cert(None);
        let path = std::env::temp_dir().join(alloc::format!(
            "idm_x509_test_{}.crt",
            std::process::id()
        ));

        write_certificate(&der, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("-----BEGIN CERTIFICATE-----\n"));
        assert!(text.ends_with("-----END CERTIFICATE-----"));

        let loaded = load_certificate_from_file(&path).unwrap();
        assert_eq!(loaded.as_bytes(), der.as_slice());

        std::fs::remove_file(&path).ok();
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_write_certificate_list_file() {
        let a = testutil::build_test_cert(None);
        let b = testutil::build_test_cert(Some(testutil::test_san_extension()));
        let path = std::env::temp_dir().join(alloc::format!(
            "idm_x509_list_test_{}.crt",
            std::process::id()
        ));

        write_certificate_list(&[a.as_slice(), b.as_slice()], &path).unwrap();
        let loaded = load_certificate_list_from_file(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].as_bytes(), a.as_slice());
        assert_eq!(loaded[1].as_bytes(), b.as_slice());

        std::fs::remove_file(&path).ok();
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_file_error_carries_path() {
        let err = load_certificate_from_file("/nonexistent/idm_x509/ca.crt").unwrap_err();
        match err {
            Error::File(file_err) => {
                assert!(file_err.path.contains("/nonexistent/idm_x509/ca.crt"))
            }
            other => panic!("expected file error, got {:?}", other),
        }
    }
}
