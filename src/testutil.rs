// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Hand-built DER fixtures shared by the unit tests.

extern crate alloc;

use alloc::vec::Vec;

use const_oid::ObjectIdentifier;
use der::Encode;

/// Encode one TLV with a definite length (short or two-byte long form).
pub fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(content.len() + 4);
    out.push(tag);
    let len = content.len();
    if len < 0x80 {
        out.push(len as u8);
    } else if len <= 0xFF {
        out.push(0x81);
        out.push(len as u8);
    } else {
        out.push(0x82);
        out.push((len >> 8) as u8);
        out.push(len as u8);
    }
    out.extend_from_slice(content);
    out
}

fn concat(parts: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::new();
    for part in parts {
        out.extend_from_slice(part);
    }
    out
}

fn oid_der(s: &str) -> Vec<u8> {
    Encode::to_der(&ObjectIdentifier::new_unwrap(s)).unwrap()
}

/// SEQUENCE { SET { SEQUENCE { id-at-commonName, UTF8String cn } } }
fn name_der(cn: &str) -> Vec<u8> {
    let atv = tlv(
        0x30,
        &concat(&[&oid_der("2.5.4.3"), &tlv(0x0C, cn.as_bytes())]),
    );
    tlv(0x30, &tlv(0x31, &atv))
}

/// DER of the test certificate's issuer name.
pub fn test_issuer_der() -> Vec<u8> {
    name_der("Test CA")
}

/// DER of the test certificate's subject name.
pub fn test_subject_der() -> Vec<u8> {
    name_der("Test EE")
}

/// DER of the test certificate's serial number (INTEGER 42).
pub fn test_serial_der() -> Vec<u8> {
    tlv(0x02, &[0x2A])
}

/// DER of the test certificate's SubjectPublicKeyInfo.
pub fn test_spki_der() -> Vec<u8> {
    let algorithm = tlv(
        0x30,
        &concat(&[&oid_der("1.2.840.113549.1.1.1"), &tlv(0x05, &[])]),
    );
    // BIT STRING: zero unused bits, one placeholder content byte.
    let key = tlv(0x03, &[0x00, 0x05]);
    tlv(0x30, &concat(&[&algorithm, &key]))
}

fn sig_alg_der() -> Vec<u8> {
    tlv(
        0x30,
        &concat(&[&oid_der("1.2.840.113549.1.1.11"), &tlv(0x05, &[])]),
    )
}

fn validity_der() -> Vec<u8> {
    tlv(
        0x30,
        &concat(&[
            &tlv(0x17, b"200101000000Z"),
            &tlv(0x17, b"300101000000Z"),
        ]),
    )
}

/// A well-formed v3 certificate, optionally carrying one extension.
///
/// The signature is a placeholder; nothing here verifies signatures.
pub fn build_test_cert(extension: Option<Vec<u8>>) -> Vec<u8> {
    let version = tlv(0xA0, &tlv(0x02, &[0x02]));

    let mut tbs_parts: Vec<Vec<u8>> = alloc::vec![
        version,
        test_serial_der(),
        sig_alg_der(),
        test_issuer_der(),
        validity_der(),
        test_subject_der(),
        test_spki_der(),
    ];
    if let Some(ext) = extension {
        tbs_parts.push(tlv(0xA3, &tlv(0x30, &ext)));
    }

    let tbs_content: Vec<&[u8]> = tbs_parts.iter().map(Vec::as_slice).collect();
    let tbs = tlv(0x30, &concat(&tbs_content));

    let signature = tlv(0x03, &[0x00, 0x01]);
    tlv(0x30, &concat(&[&tbs, &sig_alg_der(), &signature]))
}

/// DER of an Extended Key Usage extension (serverAuth + clientAuth,
/// critical).
pub fn test_eku_extension() -> Vec<u8> {
    let eku_value = tlv(
        0x30,
        &concat(&[
            &oid_der("1.3.6.1.5.5.7.3.1"),
            &oid_der("1.3.6.1.5.5.7.3.2"),
        ]),
    );
    tlv(
        0x30,
        &concat(&[
            &oid_der("2.5.29.37"),
            &tlv(0x01, &[0xFF]),
            &tlv(0x04, &eku_value),
        ]),
    )
}

/// DER of a Subject Alternative Name extension wrapping
/// [`test_san_value`].
pub fn test_san_extension() -> Vec<u8> {
    tlv(
        0x30,
        &concat(&[&oid_der("2.5.29.17"), &tlv(0x04, &test_san_value())]),
    )
}

/// A GeneralNames value with five entries: DNS, email, IPv4, a Kerberos
/// principal otherName, and a UPN otherName.
pub fn test_san_value() -> Vec<u8> {
    let dns = tlv(0x82, b"example.com");
    let email = tlv(0x81, b"admin@example.com");
    let ip = tlv(0x87, &[192, 168, 0, 1]);

    let krb5 = other_name(
        "1.3.6.1.5.2.2",
        &krb5_principal_value(&["host", "example.com"], "EXAMPLE.COM"),
    );
    let upn = other_name("1.3.6.1.4.1.311.20.2.3", &tlv(0x0C, b"user@ad.example.test"));

    tlv(0x30, &concat(&[&dns, &email, &ip, &krb5, &upn]))
}

/// An otherName entry: `[0] { type-id, [0] EXPLICIT value }`.
pub fn other_name(type_id: &str, value: &[u8]) -> Vec<u8> {
    tlv(0xA0, &concat(&[&oid_der(type_id), &tlv(0xA0, value)]))
}

/// A KRB5PrincipalName value with the given name components and realm.
pub fn krb5_principal_value(components: &[&str], realm: &str) -> Vec<u8> {
    let realm_part = tlv(0xA0, &tlv(0x1B, realm.as_bytes()));

    let name_type = tlv(0xA0, &tlv(0x02, &[0x01]));
    let strings: Vec<Vec<u8>> = components
        .iter()
        .map(|c| tlv(0x1B, c.as_bytes()))
        .collect();
    let string_slices: Vec<&[u8]> = strings.iter().map(Vec::as_slice).collect();
    let name_string = tlv(0xA1, &tlv(0x30, &concat(&string_slices)));

    let principal = tlv(0xA1, &tlv(0x30, &concat(&[&name_type, &name_string])));

    tlv(0x30, &concat(&[&realm_part, &principal]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tlv_lengths() {
        assert_eq!(tlv(0x0C, b"hi"), alloc::vec![0x0C, 0x02, b'h', b'i']);

        let long = tlv(0x04, &[0xAA; 130]);
        assert_eq!(&long[..3], &[0x04, 0x81, 130]);
        assert_eq!(long.len(), 3 + 130);

        let very_long = tlv(0x04, &[0xAA; 300]);
        assert_eq!(&very_long[..4], &[0x04, 0x82, 0x01, 0x2C]);
    }

    #[test]
    fn test_cert_fixture_is_parseable_by_grammar() {
        let der = build_test_cert(None);
        let cert = crate::certificate::Certificate::from_der(&der).unwrap();
        assert_eq!(cert.to_der().unwrap(), der);
    }
}
