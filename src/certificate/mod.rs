// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate grammar and canonical sub-field extraction.
//!
//! This module defines a minimal structural grammar for an X.509 v3
//! certificate body (RFC 5280 Section 4.1) in which only the tagging
//! skeleton is interpreted. The interesting sub-fields — issuer, subject,
//! serial number, public-key info — are kept as opaque sub-encodings so
//! that extraction returns the exact bytes as they appear inside the
//! source certificate. Callers may byte-compare the results.
//!
//! Structural validation is delegated to the trust-store adapter before
//! any grammar work happens; this layer never decides whether a
//! certificate is well formed.

pub mod name;

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use der::{
    asn1::{BitString, UintRef},
    Any, Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Tag, TagMode,
    TagNumber, Writer,
};

use crate::error::{Error, Result};
use crate::trust_store::trust_store;

// ============================================================================
// Version - RFC 5280 Section 4.1.2.1
// ============================================================================

/// X.509 certificate version.
///
/// ```asn1
/// Version  ::=  INTEGER  {  v1(0), v2(1), v3(2)  }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Version {
    /// Version 1 (value 0)
    V1 = 0,
    /// Version 2 (value 1)
    V2 = 1,
    /// Version 3 (value 2) - Default for modern certificates
    #[default]
    V3 = 2,
}

impl Version {
    /// Get the integer value of the version
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Create a Version from an integer value
    pub fn from_value(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Version::V1),
            1 => Ok(Version::V2),
            2 => Ok(Version::V3),
            _ => Err(Error::Asn1(der::Error::from(der::ErrorKind::Value {
                tag: Tag::Integer,
            }))),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::V1 => write!(f, "v1"),
            Version::V2 => write!(f, "v2"),
            Version::V3 => write!(f, "v3"),
        }
    }
}

// ============================================================================
// Name - RFC 5280 Section 4.1.2.4
// ============================================================================

/// Distinguished Name, kept as an opaque RDN sequence.
///
/// ```asn1
/// Name ::= CHOICE { rdnSequence RDNSequence }
/// RDNSequence ::= SEQUENCE OF RelativeDistinguishedName
/// ```
///
/// The RDN content is never decoded at the attribute level; only the
/// outer SEQUENCE framing is interpreted, which is sufficient to
/// preserve and re-emit the exact sub-encoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Name {
    content: Vec<u8>,
}

impl Name {
    /// The content octets of the RDN sequence (without tag and length).
    pub fn content_bytes(&self) -> &[u8] {
        &self.content
    }

    /// Get the DER encoding of this Name.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        Encode::to_der(self).map_err(Error::Asn1)
    }
}

impl<'a> DecodeValue<'a> for Name {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let content = reader.read_vec(header.length)?;
        Ok(Self { content })
    }
}

impl EncodeValue for Name {
    fn value_len(&self) -> der::Result<Length> {
        self.content.len().try_into()
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        writer.write(&self.content)
    }
}

impl der::FixedTag for Name {
    const TAG: Tag = Tag::Sequence;
}

// ============================================================================
// TBSCertificate - RFC 5280 Section 4.1
// ============================================================================

/// The signed portion of a certificate, with opaque sub-fields.
///
/// ```asn1
/// TBSCertificate  ::=  SEQUENCE  {
///     version         [0]  EXPLICIT Version DEFAULT v1,
///     serialNumber         CertificateSerialNumber,
///     signature            AlgorithmIdentifier,
///     issuer               Name,
///     validity             Validity,
///     subject              Name,
///     subjectPublicKeyInfo SubjectPublicKeyInfo,
///     issuerUniqueID  [1]  IMPLICIT UniqueIdentifier OPTIONAL,
///     subjectUniqueID [2]  IMPLICIT UniqueIdentifier OPTIONAL,
///     extensions      [3]  EXPLICIT Extensions OPTIONAL
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TbsCertificate {
    /// Certificate version (defaults to v1 when the tag is absent)
    pub version: Version,

    /// Serial number content octets. Serial numbers are arbitrary
    /// precision and are never converted to a native integer.
    serial_number_bytes: Vec<u8>,

    /// Signature algorithm identifier, opaque at this layer
    pub signature: Any,

    /// Issuer Distinguished Name, opaque RDN sequence
    pub issuer: Name,

    /// Validity period, opaque at this layer
    pub validity: Any,

    /// Subject Distinguished Name, opaque RDN sequence
    pub subject: Name,

    /// Subject public key information, opaque at this layer
    pub subject_public_key_info: Any,

    /// Issuer unique identifier (v2/v3 only, rarely used)
    pub issuer_unique_id: Option<BitString>,

    /// Subject unique identifier (v2/v3 only, rarely used)
    pub subject_unique_id: Option<BitString>,

    /// Extensions container, opaque at this layer
    pub extensions: Option<Any>,
}

impl TbsCertificate {
    /// Get the serial number content octets
    pub fn serial_number(&self) -> &[u8] {
        &self.serial_number_bytes
    }

    /// Get the serial number as UintRef for encoding
    fn serial_number_ref(&self) -> der::Result<UintRef<'_>> {
        UintRef::new(&self.serial_number_bytes)
    }

    /// Get the DER encoding of this TBSCertificate.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        Encode::to_der(self).map_err(Error::Asn1)
    }
}

impl<'a> DecodeValue<'a> for TbsCertificate {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let version = reader
                .context_specific::<UintRef<'a>>(TagNumber::N0, TagMode::Explicit)?
                .and_then(|v| {
                    let val = v.as_bytes();
                    if val.len() == 1 {
                        Version::from_value(val[0]).ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(Version::V1);

            let serial_number = UintRef::decode(reader)?;
            let serial_number_bytes = serial_number.as_bytes().to_vec();
            let signature = Any::decode(reader)?;
            let issuer = Name::decode(reader)?;
            let validity = Any::decode(reader)?;
            let subject = Name::decode(reader)?;
            let subject_public_key_info = Any::decode(reader)?;

            let issuer_unique_id =
                reader.context_specific::<BitString>(TagNumber::N1, TagMode::Implicit)?;
            let subject_unique_id =
                reader.context_specific::<BitString>(TagNumber::N2, TagMode::Implicit)?;
            let extensions = reader.context_specific::<Any>(TagNumber::N3, TagMode::Explicit)?;

            Ok(Self {
                version,
                serial_number_bytes,
                signature,
                issuer,
                validity,
                subject,
                subject_public_key_info,
                issuer_unique_id,
                subject_unique_id,
                extensions,
            })
        })
    }
}

impl EncodeValue for TbsCertificate {
    fn value_len(&self) -> der::Result<Length> {
        let mut len = Length::ZERO;

        if self.version != Version::V1 {
            let version_bytes = [self.version.value()];
            let version_int = UintRef::new(&version_bytes)?;
            len = (len
                + der::asn1::ContextSpecific {
                    tag_number: TagNumber::N0,
                    tag_mode: TagMode::Explicit,
                    value: version_int,
                }
                .encoded_len()?)?;
        }

        len = (len + self.serial_number_ref()?.encoded_len()?)?;
        len = (len + self.signature.encoded_len()?)?;
        len = (len + self.issuer.encoded_len()?)?;
        len = (len + self.validity.encoded_len()?)?;
        len = (len + self.subject.encoded_len()?)?;
        len = (len + self.subject_public_key_info.encoded_len()?)?;

        if let Some(ref issuer_uid) = self.issuer_unique_id {
            len = (len
                + der::asn1::ContextSpecific {
                    tag_number: TagNumber::N1,
                    tag_mode: TagMode::Implicit,
                    value: issuer_uid.clone(),
                }
                .encoded_len()?)?;
        }

        if let Some(ref subject_uid) = self.subject_unique_id {
            len = (len
                + der::asn1::ContextSpecific {
                    tag_number: TagNumber::N2,
                    tag_mode: TagMode::Implicit,
                    value: subject_uid.clone(),
                }
                .encoded_len()?)?;
        }

        if let Some(ref extensions) = self.extensions {
            len = (len
                + der::asn1::ContextSpecific {
                    tag_number: TagNumber::N3,
                    tag_mode: TagMode::Explicit,
                    value: extensions.clone(),
                }
                .encoded_len()?)?;
        }

        Ok(len)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        if self.version != Version::V1 {
            let version_bytes = [self.version.value()];
            let version_int = UintRef::new(&version_bytes)?;
            der::asn1::ContextSpecific {
                tag_number: TagNumber::N0,
                tag_mode: TagMode::Explicit,
                value: version_int,
            }
            .encode(writer)?;
        }

        self.serial_number_ref()?.encode(writer)?;
        self.signature.encode(writer)?;
        self.issuer.encode(writer)?;
        self.validity.encode(writer)?;
        self.subject.encode(writer)?;
        self.subject_public_key_info.encode(writer)?;

        if let Some(ref issuer_uid) = self.issuer_unique_id {
            der::asn1::ContextSpecific {
                tag_number: TagNumber::N1,
                tag_mode: TagMode::Implicit,
                value: issuer_uid.clone(),
            }
            .encode(writer)?;
        }

        if let Some(ref subject_uid) = self.subject_unique_id {
            der::asn1::ContextSpecific {
                tag_number: TagNumber::N2,
                tag_mode: TagMode::Implicit,
                value: subject_uid.clone(),
            }
            .encode(writer)?;
        }

        if let Some(ref extensions) = self.extensions {
            der::asn1::ContextSpecific {
                tag_number: TagNumber::N3,
                tag_mode: TagMode::Explicit,
                value: extensions.clone(),
            }
            .encode(writer)?;
        }

        Ok(())
    }
}

impl der::FixedTag for TbsCertificate {
    const TAG: Tag = Tag::Sequence;
}

// ============================================================================
// Certificate - RFC 5280 Section 4.1
// ============================================================================

/// X.509 Certificate structure.
///
/// ```asn1
/// Certificate  ::=  SEQUENCE  {
///     tbsCertificate       TBSCertificate,
///     signatureAlgorithm   AlgorithmIdentifier,
///     signatureValue       BIT STRING
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    /// The certificate content that was signed
    pub tbs_certificate: TbsCertificate,

    /// The signature algorithm used by the issuer, opaque at this layer
    pub signature_algorithm: Any,

    /// The signature value
    pub signature_value: BitString,
}

impl Certificate {
    /// Parse a Certificate from DER-encoded bytes.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        <Self as Decode>::from_der(bytes).map_err(Error::Asn1)
    }

    /// Encode the certificate to DER format.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        Encode::to_der(self).map_err(Error::Asn1)
    }
}

impl<'a> DecodeValue<'a> for Certificate {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let tbs_certificate = TbsCertificate::decode(reader)?;
            let signature_algorithm = Any::decode(reader)?;
            let signature_value = BitString::decode(reader)?;

            Ok(Self {
                tbs_certificate,
                signature_algorithm,
                signature_value,
            })
        })
    }
}

impl EncodeValue for Certificate {
    fn value_len(&self) -> der::Result<Length> {
        self.tbs_certificate.encoded_len()?
            + self.signature_algorithm.encoded_len()?
            + self.signature_value.encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.tbs_certificate.encode(writer)?;
        self.signature_algorithm.encode(writer)?;
        self.signature_value.encode(writer)?;
        Ok(())
    }
}

impl der::FixedTag for Certificate {
    const TAG: Tag = Tag::Sequence;
}

// ============================================================================
// Sub-field extraction
// ============================================================================

/// The certificate body fields available for canonical extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TbsField {
    /// Subject Distinguished Name
    Subject,
    /// Issuer Distinguished Name
    Issuer,
    /// Serial number (as a DER INTEGER)
    SerialNumber,
    /// SubjectPublicKeyInfo
    SubjectPublicKeyInfo,
}

impl fmt::Display for TbsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TbsField::Subject => write!(f, "subject"),
            TbsField::Issuer => write!(f, "issuer"),
            TbsField::SerialNumber => write!(f, "serialNumber"),
            TbsField::SubjectPublicKeyInfo => write!(f, "subjectPublicKeyInfo"),
        }
    }
}

/// Extract the exact DER sub-encoding of one certificate body field.
///
/// The input is validated through the trust-store adapter, decoded with
/// the opaque grammar, and the selected field is re-encoded canonically.
/// The returned bytes equal the sub-encoding as it appears inside the
/// input certificate.
pub fn extract_field(dercert: &[u8], field: TbsField) -> Result<Vec<u8>> {
    trust_store()?.parse(dercert)?;

    let cert = Certificate::from_der(dercert)?;
    let tbs = &cert.tbs_certificate;
    match field {
        TbsField::Subject => tbs.subject.to_der(),
        TbsField::Issuer => tbs.issuer.to_der(),
        TbsField::SerialNumber => {
            let serial = tbs.serial_number_ref().map_err(Error::Asn1)?;
            Encode::to_der(&serial).map_err(Error::Asn1)
        }
        TbsField::SubjectPublicKeyInfo => {
            Encode::to_der(&tbs.subject_public_key_info).map_err(Error::Asn1)
        }
    }
}

/// Extract the DER encoding of the subject name.
pub fn get_der_subject(dercert: &[u8]) -> Result<Vec<u8>> {
    extract_field(dercert, TbsField::Subject)
}

/// Extract the DER encoding of the issuer name.
pub fn get_der_issuer(dercert: &[u8]) -> Result<Vec<u8>> {
    extract_field(dercert, TbsField::Issuer)
}

/// Extract the DER encoding of the serial number.
pub fn get_der_serial_number(dercert: &[u8]) -> Result<Vec<u8>> {
    extract_field(dercert, TbsField::SerialNumber)
}

/// Extract the DER encoding of the subject public key info.
pub fn get_der_public_key_info(dercert: &[u8]) -> Result<Vec<u8>> {
    extract_field(dercert, TbsField::SubjectPublicKeyInfo)
}

/// Get the decimal value of the serial number.
pub fn get_serial_number(dercert: &[u8]) -> Result<alloc::string::String> {
    Ok(trust_store()?.parse(dercert)?.serial_number)
}

/// Check whether a certificate is self-signed (issuer equals subject).
pub fn is_self_signed(dercert: &[u8]) -> Result<bool> {
    let parsed = trust_store()?.parse(dercert)?;
    Ok(parsed.subject == parsed.issuer)
}

// ============================================================================
// Tests
// ============================================================================
