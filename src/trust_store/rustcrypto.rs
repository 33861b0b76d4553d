// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Default trust-store backend over the RustCrypto `x509-cert` parser.

extern crate alloc;

use alloc::string::ToString;
use alloc::vec::Vec;

use der::{Decode, Encode};
use x509_cert::Certificate;

use super::{decimal_from_be_bytes, ParsedCertificate, ParsedExtension, TrustStore, TrustStoreError};

/// Trust-store backend backed by `x509_cert::Certificate`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustCryptoTrustStore;

impl RustCryptoTrustStore {
    /// Create a new backend instance.
    pub fn new() -> Self {
        Self
    }
}

impl TrustStore for RustCryptoTrustStore {
    fn parse(&self, der: &[u8]) -> core::result::Result<ParsedCertificate, TrustStoreError> {
        // A decode failure is the specific malformed-structure signal;
        // everything after a successful parse maps to Other.
        let cert = Certificate::from_der(der).map_err(|_| TrustStoreError::Malformed)?;
        let tbs = &cert.tbs_certificate;

        let subject = tbs
            .subject
            .to_der()
            .map_err(|e| TrustStoreError::Other(e.to_string()))?;
        let issuer = tbs
            .issuer
            .to_der()
            .map_err(|e| TrustStoreError::Other(e.to_string()))?;
        let serial_number = decimal_from_be_bytes(tbs.serial_number.as_bytes());

        let extensions: Vec<ParsedExtension> = match &tbs.extensions {
            Some(exts) => exts
                .iter()
                .map(|ext| ParsedExtension {
                    oid: ext.extn_id,
                    critical: ext.critical,
                    value: ext.extn_value.as_bytes().to_vec(),
                })
                .collect(),
            None => Vec::new(),
        };

        Ok(ParsedCertificate {
            subject,
            issuer,
            serial_number,
            extensions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_is_malformed() {
        let store = RustCryptoTrustStore::new();
        assert_eq!(
            store.parse(&[0x00, 0x01, 0x02]).unwrap_err(),
            TrustStoreError::Malformed
        );
        assert_eq!(store.parse(&[]).unwrap_err(), TrustStoreError::Malformed);
    }

    #[test]
    fn test_parse_minimal_certificate() {
        let store = RustCryptoTrustStore::new();
        let cert = crate::testutil::build_test_cert(None);
        let parsed = store.parse(&cert).unwrap();

        assert_eq!(parsed.serial_number, "42");
        assert!(parsed.extensions.is_empty());
        // Subject and issuer come back as the exact Name sub-encodings.
        assert_eq!(parsed.subject, crate::testutil::test_subject_der());
        assert_eq!(parsed.issuer, crate::testutil::test_issuer_der());
    }
}
