// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Extension container and Extended Key Usage codec.
//!
//! Encoding produces canonical DER: the criticality BOOLEAN is omitted
//! when false (DEFAULT FALSE). The Extended Key Usage criticality is
//! derived from the purpose list itself — `true` unless the any-usage
//! OID appears anywhere in the list.

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use const_oid::ObjectIdentifier;
use der::asn1::OctetString;
use der::{Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence, Tag, Writer};

use super::oids::{EKU_ANY, EXTENDED_KEY_USAGE};
use crate::error::{Error, Result};
use crate::trust_store::trust_store;

// ============================================================================
// Extension - RFC 5280 Section 4.1.2.9
// ============================================================================

/// A single X.509 v3 extension.
///
/// ```asn1
/// Extension  ::=  SEQUENCE  {
///     extnID      OBJECT IDENTIFIER,
///     critical    BOOLEAN DEFAULT FALSE,
///     extnValue   OCTET STRING
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Sequence)]
pub struct Extension {
    /// Extension OID
    pub extn_id: ObjectIdentifier,

    /// Whether this extension is critical
    #[asn1(default = "default_false")]
    pub critical: bool,

    /// Extension value (DER-encoded)
    pub extn_value: OctetString,
}

fn default_false() -> bool {
    false
}

impl Extension {
    /// Create a new extension
    pub fn new(extn_id: ObjectIdentifier, critical: bool, extn_value: Vec<u8>) -> Result<Self> {
        Ok(Self {
            extn_id,
            critical,
            extn_value: OctetString::new(extn_value).map_err(Error::Asn1)?,
        })
    }

    /// Get the extension value as a byte slice
    pub fn value(&self) -> &[u8] {
        self.extn_value.as_bytes()
    }

    /// Parse an Extension from DER-encoded bytes.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        <Self as Decode>::from_der(bytes).map_err(Error::Asn1)
    }

    /// Get the DER encoding of this Extension.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        Encode::to_der(self).map_err(Error::Asn1)
    }
}

// ============================================================================
// Extended Key Usage - RFC 5280 Section 4.2.1.12
// ============================================================================

/// Extended Key Usage extension value.
///
/// ```asn1
/// ExtKeyUsageSyntax ::= SEQUENCE SIZE (1..MAX) OF KeyPurposeId
/// KeyPurposeId ::= OBJECT IDENTIFIER
/// ```
///
/// The purpose list keeps its source order and duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedKeyUsage {
    /// List of key purpose OIDs
    pub key_purposes: Vec<ObjectIdentifier>,
}

impl<'a> DecodeValue<'a> for ExtendedKeyUsage {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let mut key_purposes = Vec::new();
            while !reader.is_finished() {
                key_purposes.push(ObjectIdentifier::decode(reader)?);
            }
            Ok(Self { key_purposes })
        })
    }
}

impl EncodeValue for ExtendedKeyUsage {
    fn value_len(&self) -> der::Result<Length> {
        let mut len = Length::ZERO;
        for oid in &self.key_purposes {
            len = (len + oid.encoded_len()?)?;
        }
        Ok(len)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        for oid in &self.key_purposes {
            oid.encode(writer)?;
        }
        Ok(())
    }
}

impl der::FixedTag for ExtendedKeyUsage {
    const TAG: Tag = Tag::Sequence;
}

impl ExtendedKeyUsage {
    /// Create a new ExtendedKeyUsage
    pub fn new(key_purposes: Vec<ObjectIdentifier>) -> Self {
        Self { key_purposes }
    }

    /// Parse from the extension value bytes
    pub fn from_extension(ext: &Extension) -> Result<Self> {
        <Self as Decode>::from_der(ext.value()).map_err(Error::Asn1)
    }

    /// Check if a specific purpose is present
    pub fn has_purpose(&self, oid: &ObjectIdentifier) -> bool {
        self.key_purposes.iter().any(|p| p == oid)
    }

    /// Derived criticality: an Extended Key Usage extension is critical
    /// unless the any-usage OID is present in the purpose list.
    pub fn criticality(&self) -> bool {
        !self.has_purpose(&EKU_ANY)
    }

    /// Wrap this value into its Extension container.
    pub fn to_extension(&self) -> Result<Extension> {
        let value = Encode::to_der(self).map_err(Error::Asn1)?;
        Extension::new(EXTENDED_KEY_USAGE, self.criticality(), value)
    }
}

/// Encode an Extended Key Usage extension from a purpose OID list.
///
/// The list order is preserved and duplicates are kept. Returns the DER
/// encoding of the full Extension container.
pub fn encode_ext_key_usage(ext_key_usage: &[ObjectIdentifier]) -> Result<Vec<u8>> {
    ExtendedKeyUsage::new(ext_key_usage.to_vec())
        .to_extension()?
        .to_der()
}

/// Read the Extended Key Usage purpose suffixes of a certificate.
///
/// The first extension tagged as Extended Key Usage (in the adapter's
/// reported order) is decoded as a sequence of OIDs; the first four
/// characters of each dotted string are stripped and the suffixes are
/// collected into a set. Order and duplicate count are not preserved.
/// Returns `None` when the certificate carries no extensions or none
/// match — distinct from an empty set.
pub fn get_ext_key_usage(dercert: &[u8]) -> Result<Option<BTreeSet<String>>> {
    let parsed = trust_store()?.parse(dercert)?;
    if parsed.extensions.is_empty() {
        return Ok(None);
    }

    let ext = match parsed
        .extensions
        .iter()
        .find(|e| e.oid == EXTENDED_KEY_USAGE)
    {
        Some(ext) => ext,
        None => return Ok(None),
    };

    let eku = <ExtendedKeyUsage as Decode>::from_der(&ext.value).map_err(Error::Asn1)?;
    let suffixes = eku
        .key_purposes
        .iter()
        .map(|oid| {
            let s = oid.to_string();
            s.get(4..).unwrap_or_default().to_string()
        })
        .collect();

    Ok(Some(suffixes))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;
    use crate::x509::oids::{EKU_CLIENT_AUTH, EKU_SERVER_AUTH};
    use alloc::vec;

    #[test]
    fn test_extension_create() {
        let value = vec![0x30, 0x03, 0x01, 0x01, 0xFF];
        let ext = Extension::new(EXTENDED_KEY_USAGE, true, value.clone()).unwrap();
        assert_eq!(ext.extn_id, EXTENDED_KEY_USAGE);
        assert!(ext.critical);
        assert_eq!(ext.value(), &value);
    }

    #[test]
    fn test_eku_purposes() {
        let eku = ExtendedKeyUsage::new(vec![EKU_SERVER_AUTH, EKU_CLIENT_AUTH]);
        assert!(eku.has_purpose(&EKU_SERVER_AUTH));
        assert!(eku.has_purpose(&EKU_CLIENT_AUTH));
        assert!(!eku.has_purpose(&EKU_ANY));
    }

    #[test]
    fn test_eku_value_round_trip() {
        let eku = ExtendedKeyUsage::new(vec![EKU_SERVER_AUTH, EKU_CLIENT_AUTH]);
        let der = Encode::to_der(&eku).unwrap();
        let decoded = <ExtendedKeyUsage as Decode>::from_der(&der).unwrap();
        assert_eq!(decoded, eku);
    }

    #[test]
    fn test_encode_ext_key_usage_critical() {
        let der = encode_ext_key_usage(&[EKU_SERVER_AUTH]).unwrap();
        let ext = Extension::from_der(&der).unwrap();

        assert_eq!(ext.extn_id, EXTENDED_KEY_USAGE);
        assert!(ext.critical);

        let eku = ExtendedKeyUsage::from_extension(&ext).unwrap();
        assert_eq!(eku.key_purposes, vec![EKU_SERVER_AUTH]);
    }

    #[test]
    fn test_encode_ext_key_usage_any_is_noncritical() {
        let der = encode_ext_key_usage(&[EKU_ANY]).unwrap();
        let ext = Extension::from_der(&der).unwrap();
        assert!(!ext.critical);

        // The any-usage OID anywhere in the list drops criticality.
        let der = encode_ext_key_usage(&[EKU_SERVER_AUTH, EKU_ANY]).unwrap();
        let ext = Extension::from_der(&der).unwrap();
        assert!(!ext.critical);
    }

    #[test]
    fn test_encode_preserves_order_and_duplicates() {
        let der = encode_ext_key_usage(&[EKU_CLIENT_AUTH, EKU_SERVER_AUTH, EKU_CLIENT_AUTH])
            .unwrap();
        let ext = Extension::from_der(&der).unwrap();
        let eku = ExtendedKeyUsage::from_extension(&ext).unwrap();
        assert_eq!(
            eku.key_purposes,
            vec![EKU_CLIENT_AUTH, EKU_SERVER_AUTH, EKU_CLIENT_AUTH]
        );
    }

    #[cfg(feature = "rustcrypto-backend")]
    #[test]
    fn test_get_ext_key_usage_suffixes() {
        let cert = testutil::build_test_cert(Some(testutil::test_eku_extension()));
        let usages = get_ext_key_usage(&cert).unwrap().unwrap();

        let expected: BTreeSet<String> = ["6.1.5.5.7.3.1", "6.1.5.5.7.3.2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(usages, expected);
    }

    #[cfg(feature = "rustcrypto-backend")]
    #[test]
    fn test_get_ext_key_usage_behind_other_extensions() {
        // The EKU extension is found wherever it sits in the adapter's
        // reported order.
        let mut exts = testutil::test_san_extension();
        exts.extend_from_slice(&testutil::test_eku_extension());
        let cert = testutil::build_test_cert(Some(exts));

        let usages = get_ext_key_usage(&cert).unwrap().unwrap();
        assert!(usages.contains("6.1.5.5.7.3.1"));
    }

    #[cfg(feature = "rustcrypto-backend")]
    #[test]
    fn test_get_ext_key_usage_absent() {
        // No extensions at all: explicit absence, not an empty set.
        let cert = testutil::build_test_cert(None);
        assert_eq!(get_ext_key_usage(&cert).unwrap(), None);

        // Extensions present but no EKU match.
        let cert = testutil::build_test_cert(Some(testutil::test_san_extension()));
        assert_eq!(get_ext_key_usage(&cert).unwrap(), None);
    }
}
