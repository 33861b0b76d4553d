// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Two-pass general-name decoding and specialized otherName payloads.
//!
//! A GeneralNames value is decoded in two aligned passes over the same
//! bytes: the classification pass ([`crate::certificate::name`]) yields
//! a type tag and a display string per entry, and the structural pass
//! here walks the raw sequence to recover, for otherName entries, the
//! type-id OID and the explicit value bytes the classification pass
//! cannot see. Both passes must produce the same entry count; a mismatch
//! is fatal and never silently truncated.
//!
//! Kerberos principal names use GeneralString (tag 27), which `der::Tag`
//! cannot represent, so the structures below are walked with a raw TLV
//! reader.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use const_oid::ObjectIdentifier;
use der::Decode;

use super::oids::{SAN_KRB5PRINCIPALNAME, SAN_UPN};
use crate::certificate::name::{GeneralName, SubjectAltName};
use crate::error::{DecodeError, Error, Result};
use crate::util::to_hex_with_colons;

// =============================================================================
// Raw TLV walking
// =============================================================================

/// One raw DER TLV: tag byte, header size, and content octets.
struct Tlv<'a> {
    tag: u8,
    header_len: usize,
    content: &'a [u8],
}

impl Tlv<'_> {
    fn total_len(&self) -> usize {
        self.header_len + self.content.len()
    }
}

/// Read a single TLV from the front of `data`.
///
/// Supports short-form and 1-4 byte long-form definite lengths;
/// indefinite lengths are not canonical and are rejected.
fn read_tlv(data: &[u8]) -> Result<Tlv<'_>> {
    if data.len() < 2 {
        return Err(DecodeError::UnexpectedEof.into());
    }

    let tag = data[0];
    let (content_len, header_len) = if data[1] & 0x80 == 0 {
        (data[1] as usize, 2usize)
    } else {
        let num_len_bytes = (data[1] & 0x7F) as usize;
        if num_len_bytes == 0 || num_len_bytes > 4 {
            return Err(DecodeError::InvalidLength(alloc::format!(
                "unsupported DER length encoding: {} length bytes",
                num_len_bytes
            ))
            .into());
        }
        if data.len() < 2 + num_len_bytes {
            return Err(DecodeError::UnexpectedEof.into());
        }
        let mut len = 0usize;
        for i in 0..num_len_bytes {
            len = (len << 8) | (data[2 + i] as usize);
        }
        (len, 2 + num_len_bytes)
    };

    if data.len() < header_len + content_len {
        return Err(DecodeError::UnexpectedEof.into());
    }

    Ok(Tlv {
        tag,
        header_len,
        content: &data[header_len..header_len + content_len],
    })
}

/// Read a TLV and require a specific tag byte.
fn expect_tlv(data: &[u8], tag: u8) -> Result<Tlv<'_>> {
    let tlv = read_tlv(data)?;
    if tlv.tag != tag {
        return Err(DecodeError::InvalidTag {
            expected: tag,
            found: tlv.tag,
        }
        .into());
    }
    Ok(tlv)
}

/// Read a TLV that must span `data` exactly, with the given tag.
fn expect_exact_tlv(data: &[u8], tag: u8) -> Result<Tlv<'_>> {
    let tlv = expect_tlv(data, tag)?;
    if tlv.total_len() != data.len() {
        return Err(DecodeError::TrailingData.into());
    }
    Ok(tlv)
}

fn utf8(content: &[u8]) -> Result<String> {
    core::str::from_utf8(content)
        .map(str::to_string)
        .map_err(|_| DecodeError::InvalidUtf8.into())
}

// =============================================================================
// Structural pass
// =============================================================================

/// A general-name entry as seen by the structural pass.
///
/// Only otherName entries carry payload; every other alternative is
/// fully handled by the classification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RawGeneralName {
    /// otherName `[0]`: type-id OID plus the raw explicit-value bytes
    /// (the inner TLV carried by the `[0]` EXPLICIT wrapper)
    OtherName {
        type_id: ObjectIdentifier,
        value: Vec<u8>,
    },
    /// Any standard alternative, identified by its context tag byte
    Standard { tag: u8 },
}

/// Walk a GeneralNames sequence, recovering otherName internals.
pub(crate) fn structural_general_names(data: &[u8]) -> Result<Vec<RawGeneralName>> {
    let seq = expect_exact_tlv(data, 0x30)?;

    let mut names = Vec::new();
    let mut rest = seq.content;
    while !rest.is_empty() {
        let entry = read_tlv(rest)?;
        match entry.tag {
            // otherName [0] IMPLICIT: SEQUENCE { type-id, [0] EXPLICIT value }
            0xA0 => {
                let type_id_tlv = expect_tlv(entry.content, 0x06)?;
                let type_id = ObjectIdentifier::from_bytes(type_id_tlv.content)
                    .map_err(|_| Error::Decode(DecodeError::InvalidLength(
                        "malformed otherName type-id".to_string(),
                    )))?;

                let value_wrapper =
                    expect_exact_tlv(&entry.content[type_id_tlv.total_len()..], 0xA0)?;
                names.push(RawGeneralName::OtherName {
                    type_id,
                    value: value_wrapper.content.to_vec(),
                });
            }
            // Context tags [1]..[8], primitive or constructed
            0x81 | 0x82 | 0x86 | 0x87 | 0x88 | 0xA3 | 0xA4 | 0xA5 => {
                names.push(RawGeneralName::Standard { tag: entry.tag });
            }
            other => {
                return Err(DecodeError::InvalidTag {
                    expected: 0xA0,
                    found: other,
                }
                .into())
            }
        }
        rest = &rest[entry.total_len()..];
    }

    Ok(names)
}

// =============================================================================
// Specialized otherName payloads
// =============================================================================

/// Decoded payload of an otherName entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtherNameValue {
    /// Unrecognized type-id: the OID and raw value bytes, no text decoding
    Generic(ObjectIdentifier, Vec<u8>),
    /// Kerberos principal name, composed as `component[/component...]@REALM`
    Krb5(String),
    /// Windows user principal name, decoded UTF-8 text verbatim
    Upn(String),
}

impl OtherNameValue {
    /// Display string for this payload.
    pub fn display(&self) -> String {
        match self {
            OtherNameValue::Krb5(s) | OtherNameValue::Upn(s) => s.clone(),
            OtherNameValue::Generic(_, bytes) => to_hex_with_colons(bytes),
        }
    }
}

type OtherNameDecoder = fn(&[u8]) -> Result<OtherNameValue>;

/// Decoders for the otherName type-ids this crate understands.
const OTHERNAME_DECODERS: &[(ObjectIdentifier, OtherNameDecoder)] = &[
    (SAN_KRB5PRINCIPALNAME, decode_krb5_value),
    (SAN_UPN, decode_upn_value),
];

fn decode_krb5_value(value: &[u8]) -> Result<OtherNameValue> {
    Ok(OtherNameValue::Krb5(decode_krb5_principal_name(value)?))
}

fn decode_upn_value(value: &[u8]) -> Result<OtherNameValue> {
    Ok(OtherNameValue::Upn(decode_upn(value)?))
}

/// Decode an otherName explicit value according to its type-id.
///
/// Unrecognized type-ids keep the OID and raw bytes without any text
/// decoding.
pub fn decode_other_name(type_id: ObjectIdentifier, value: &[u8]) -> Result<OtherNameValue> {
    for (oid, decoder) in OTHERNAME_DECODERS {
        if *oid == type_id {
            return decoder(value);
        }
    }
    Ok(OtherNameValue::Generic(type_id, value.to_vec()))
}

/// Decode a UPN otherName value: a DER UTF8String.
pub fn decode_upn(value: &[u8]) -> Result<String> {
    let tlv = expect_exact_tlv(value, 0x0C)?;
    utf8(tlv.content)
}

// =============================================================================
// KRB5PrincipalName - RFC 4556 Section 3.2.2
// =============================================================================

// KRB5PrincipalName ::= SEQUENCE {
//     realm          [0] Realm,
//     principalName  [1] PrincipalName
// }
// PrincipalName ::= SEQUENCE {
//     name-type   [0] Int32,
//     name-string [1] SEQUENCE OF KerberosString
// }
// KerberosString ::= GeneralString (tag 27)

/// Decode a KRB5PrincipalName value and compose its display string.
///
/// Name components escape `\` as `\\`, `/` as `\/`, and `@` as `\@`,
/// and are joined by an unescaped `/`; the realm follows an unescaped
/// `@` and escapes `\` and `@` only.
pub fn decode_krb5_principal_name(value: &[u8]) -> Result<String> {
    let outer = expect_exact_tlv(value, 0x30)?;

    let realm_wrapper = expect_tlv(outer.content, 0xA0)?;
    let realm_tlv = expect_exact_tlv(realm_wrapper.content, 0x1B)?;
    let realm = utf8(realm_tlv.content)?;

    let principal_wrapper =
        expect_exact_tlv(&outer.content[realm_wrapper.total_len()..], 0xA1)?;
    let principal = expect_exact_tlv(principal_wrapper.content, 0x30)?;

    let name_type_wrapper = expect_tlv(principal.content, 0xA0)?;
    // name-type is present but not part of the display form.
    expect_exact_tlv(name_type_wrapper.content, 0x02)?;

    let name_string_wrapper =
        expect_exact_tlv(&principal.content[name_type_wrapper.total_len()..], 0xA1)?;
    let name_string = expect_exact_tlv(name_string_wrapper.content, 0x30)?;

    let mut components = Vec::new();
    let mut rest = name_string.content;
    while !rest.is_empty() {
        let component = expect_tlv(rest, 0x1B)?;
        components.push(utf8(component.content)?);
        rest = &rest[component.total_len()..];
    }

    Ok(compose_krb5_principal(&components, &realm))
}

/// Compose the display form of a Kerberos principal.
pub fn compose_krb5_principal(components: &[String], realm: &str) -> String {
    let name = components
        .iter()
        .map(|c| escape_principal_component(c))
        .collect::<Vec<_>>()
        .join("/");
    alloc::format!("{}@{}", name, escape_realm(realm))
}

fn escape_principal_component(component: &str) -> String {
    component
        .replace('\\', "\\\\")
        .replace('/', "\\/")
        .replace('@', "\\@")
}

fn escape_realm(realm: &str) -> String {
    realm.replace('\\', "\\\\").replace('@', "\\@")
}

// =============================================================================
// Aligned two-pass decoding
// =============================================================================

/// One decoded alternative-name entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralNameInfo {
    /// Name type tag; otherName entries carry their type-id OID
    pub kind: GeneralNameKind,

    /// Human-readable type descriptor
    pub desc: &'static str,

    /// Display string value
    pub value: String,

    /// Raw explicit-value bytes, present only for otherName entries
    pub der_value: Option<Vec<u8>>,
}

/// Name type tag of a decoded entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralNameKind {
    /// otherName with its type-id OID
    OtherName(ObjectIdentifier),
    /// rfc822Name
    Rfc822Name,
    /// dNSName
    DnsName,
    /// x400Address
    X400Address,
    /// directoryName
    DirectoryName,
    /// ediPartyName
    EdiPartyName,
    /// uniformResourceIdentifier
    Uri,
    /// iPAddress
    IpAddress,
    /// registeredID
    RegisteredId,
}

fn standard_kind(name: &GeneralName) -> Option<GeneralNameKind> {
    match name {
        GeneralName::OtherName(_) => None,
        GeneralName::Rfc822Name(_) => Some(GeneralNameKind::Rfc822Name),
        GeneralName::DnsName(_) => Some(GeneralNameKind::DnsName),
        GeneralName::X400Address(_) => Some(GeneralNameKind::X400Address),
        GeneralName::DirectoryName(_) => Some(GeneralNameKind::DirectoryName),
        GeneralName::EdiPartyName(_) => Some(GeneralNameKind::EdiPartyName),
        GeneralName::Uri(_) => Some(GeneralNameKind::Uri),
        GeneralName::IpAddress(_) => Some(GeneralNameKind::IpAddress),
        GeneralName::RegisteredId(_) => Some(GeneralNameKind::RegisteredId),
    }
}

/// Decode a GeneralNames value (the data of the Subject Alt Name and
/// Issuer Alt Name extensions, among others) into an ordered list of
/// [`GeneralNameInfo`].
///
/// Runs the classification and structural passes over the same bytes and
/// pairs their results in original sequence order. `der_value` is set
/// for otherName entries, otherwise `None`.
pub fn decode_general_names(data: &[u8]) -> Result<Vec<GeneralNameInfo>> {
    let classified = <SubjectAltName as Decode>::from_der(data).map_err(Error::Asn1)?;
    let structural = structural_general_names(data)?;
    align_general_names(classified.names, structural)
}

/// Pair the two pass outputs, failing on any count mismatch.
pub(crate) fn align_general_names(
    classified: Vec<GeneralName>,
    structural: Vec<RawGeneralName>,
) -> Result<Vec<GeneralNameInfo>> {
    if classified.len() != structural.len() {
        log::error!(
            "general-name decode passes disagree: {} classified vs {} structural entries",
            classified.len(),
            structural.len()
        );
        return Err(Error::Alignment {
            classified: classified.len(),
            structural: structural.len(),
        });
    }

    classified
        .into_iter()
        .zip(structural)
        .map(|(cls, raw)| general_name_info(cls, raw))
        .collect()
}

fn general_name_info(cls: GeneralName, raw: RawGeneralName) -> Result<GeneralNameInfo> {
    match (cls, raw) {
        (GeneralName::OtherName(_), RawGeneralName::OtherName { type_id, value }) => {
            let decoded = decode_other_name(type_id, &value)?;
            Ok(GeneralNameInfo {
                kind: GeneralNameKind::OtherName(type_id),
                desc: "other name",
                value: decoded.display(),
                der_value: Some(value),
            })
        }
        (GeneralName::OtherName(_), RawGeneralName::Standard { tag }) => {
            Err(DecodeError::InvalidTag {
                expected: 0xA0,
                found: tag,
            }
            .into())
        }
        (cls, RawGeneralName::OtherName { .. }) => Err(DecodeError::InvalidTag {
            expected: cls.tag_byte(),
            found: 0xA0,
        }
        .into()),
        (cls, RawGeneralName::Standard { .. }) => {
            let kind = standard_kind(&cls).ok_or(DecodeError::InvalidTag {
                expected: 0xA0,
                found: cls.tag_byte(),
            })?;
            Ok(GeneralNameInfo {
                kind,
                desc: cls.type_desc(),
                value: cls.display_value(),
                der_value: None,
            })
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
