// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! GeneralName classification for the Subject Alternative Name extension.
//!
//! This is the first of the two aligned decode passes over a
//! GeneralNames sequence: each entry is classified by its context tag
//! and, for the standard name types, a ready-made display string is
//! produced. Classification cannot distinguish otherName sub-types; the
//! structural pass in [`crate::x509::identity`] supplies the type-id OID
//! and raw value bytes for those.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use const_oid::ObjectIdentifier;
use der::{Decode, DecodeValue, Encode, EncodeValue, ErrorKind, Header, Length, Reader, Tag,
    TagNumber, Writer};

use crate::util::to_hex_with_colons;

// ============================================================================
// GeneralName - RFC 5280 Section 4.2.1.6
// ============================================================================

/// GeneralName classified by context tag.
///
/// ```asn1
/// GeneralName ::= CHOICE {
///     otherName                 [0] OtherName,
///     rfc822Name                [1] IA5String,
///     dNSName                   [2] IA5String,
///     x400Address               [3] ORAddress,
///     directoryName             [4] Name,
///     ediPartyName              [5] EDIPartyName,
///     uniformResourceIdentifier [6] IA5String,
///     iPAddress                 [7] OCTET STRING,
///     registeredID              [8] OBJECT IDENTIFIER
/// }
/// ```
///
/// The otherName, x400Address, directoryName, and ediPartyName variants
/// carry their raw sub-encodings; nothing below the choice tag is
/// interpreted for them here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralName {
    /// otherName `[0]` - raw OtherName content (type-id plus tagged value)
    OtherName(Vec<u8>),
    /// rfc822Name `[1]` - Email address
    Rfc822Name(String),
    /// dNSName `[2]` - DNS hostname
    DnsName(String),
    /// x400Address `[3]` - opaque directory-address form
    X400Address(Vec<u8>),
    /// directoryName `[4]` - raw Name encoding, not attribute-decoded
    DirectoryName(Vec<u8>),
    /// ediPartyName `[5]` - opaque party-name form
    EdiPartyName(Vec<u8>),
    /// uniformResourceIdentifier `[6]` - URI
    Uri(String),
    /// iPAddress `[7]` - raw address octets
    IpAddress(Vec<u8>),
    /// registeredID `[8]` - OID
    RegisteredId(ObjectIdentifier),
}

impl GeneralName {
    /// Human-readable descriptor of the name type.
    pub fn type_desc(&self) -> &'static str {
        match self {
            GeneralName::OtherName(_) => "other name",
            GeneralName::Rfc822Name(_) => "RFC 822 name",
            GeneralName::DnsName(_) => "DNS name",
            GeneralName::X400Address(_) => "X.400 address",
            GeneralName::DirectoryName(_) => "directory name",
            GeneralName::EdiPartyName(_) => "EDI party name",
            GeneralName::Uri(_) => "URI",
            GeneralName::IpAddress(_) => "IP address",
            GeneralName::RegisteredId(_) => "registered OID",
        }
    }

    /// Context tag byte of this choice alternative as it appears on the
    /// wire.
    pub(crate) fn tag_byte(&self) -> u8 {
        match self {
            GeneralName::OtherName(_) => 0xA0,
            GeneralName::Rfc822Name(_) => 0x81,
            GeneralName::DnsName(_) => 0x82,
            GeneralName::X400Address(_) => 0xA3,
            GeneralName::DirectoryName(_) => 0xA4,
            GeneralName::EdiPartyName(_) => 0xA5,
            GeneralName::Uri(_) => 0x86,
            GeneralName::IpAddress(_) => 0x87,
            GeneralName::RegisteredId(_) => 0x88,
        }
    }

    /// Parse an IP address (4 bytes for IPv4, 16 bytes for IPv6).
    pub fn ip_address_string(&self) -> Option<String> {
        if let GeneralName::IpAddress(bytes) = self {
            match bytes.len() {
                4 => Some(alloc::format!(
                    "{}.{}.{}.{}",
                    bytes[0],
                    bytes[1],
                    bytes[2],
                    bytes[3]
                )),
                16 => {
                    let parts: Vec<String> = bytes
                        .chunks(2)
                        .map(|c| alloc::format!("{:x}{:x}", c[0], c[1]))
                        .collect();
                    Some(parts.join(":"))
                }
                _ => None,
            }
        } else {
            None
        }
    }

    /// Ready-made display string for this entry.
    ///
    /// Standard string-valued types display verbatim; opaque forms
    /// display as colon-separated hex. otherName display is resolved by
    /// the structural pass, which knows the type-id.
    pub fn display_value(&self) -> String {
        match self {
            GeneralName::Rfc822Name(s) | GeneralName::DnsName(s) | GeneralName::Uri(s) => {
                s.clone()
            }
            GeneralName::IpAddress(bytes) => self
                .ip_address_string()
                .unwrap_or_else(|| to_hex_with_colons(bytes)),
            GeneralName::RegisteredId(oid) => oid.to_string(),
            GeneralName::OtherName(bytes)
            | GeneralName::X400Address(bytes)
            | GeneralName::DirectoryName(bytes)
            | GeneralName::EdiPartyName(bytes) => to_hex_with_colons(bytes),
        }
    }
}

impl<'a> DecodeValue<'a> for GeneralName {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let tag = header.tag;

        if !tag.is_context_specific() {
            return Err(ErrorKind::TagUnexpected {
                expected: None,
                actual: tag,
            }
            .into());
        }

        match tag.number() {
            TagNumber::N0 => {
                let bytes = reader.read_vec(header.length)?;
                Ok(GeneralName::OtherName(bytes))
            }
            TagNumber::N1 => {
                let bytes = reader.read_vec(header.length)?;
                let s = core::str::from_utf8(&bytes)
                    .map_err(|_| ErrorKind::Value { tag })?
                    .to_string();
                Ok(GeneralName::Rfc822Name(s))
            }
            TagNumber::N2 => {
                let bytes = reader.read_vec(header.length)?;
                let s = core::str::from_utf8(&bytes)
                    .map_err(|_| ErrorKind::Value { tag })?
                    .to_string();
                Ok(GeneralName::DnsName(s))
            }
            TagNumber::N3 => {
                let bytes = reader.read_vec(header.length)?;
                Ok(GeneralName::X400Address(bytes))
            }
            TagNumber::N4 => {
                let bytes = reader.read_vec(header.length)?;
                Ok(GeneralName::DirectoryName(bytes))
            }
            TagNumber::N5 => {
                let bytes = reader.read_vec(header.length)?;
                Ok(GeneralName::EdiPartyName(bytes))
            }
            TagNumber::N6 => {
                let bytes = reader.read_vec(header.length)?;
                let s = core::str::from_utf8(&bytes)
                    .map_err(|_| ErrorKind::Value { tag })?
                    .to_string();
                Ok(GeneralName::Uri(s))
            }
            TagNumber::N7 => {
                let bytes = reader.read_vec(header.length)?;
                Ok(GeneralName::IpAddress(bytes))
            }
            TagNumber::N8 => {
                // IMPLICIT tag: the content octets are the OID body itself.
                let bytes = reader.read_vec(header.length)?;
                let oid = ObjectIdentifier::from_bytes(&bytes)
                    .map_err(|_| ErrorKind::Value { tag })?;
                Ok(GeneralName::RegisteredId(oid))
            }
            _ => Err(ErrorKind::TagUnexpected {
                expected: None,
                actual: tag,
            }
            .into()),
        }
    }
}

impl fmt::Display for GeneralName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneralName::OtherName(_) => write!(f, "otherName:<unresolved>"),
            GeneralName::Rfc822Name(email) => write!(f, "email:{}", email),
            GeneralName::DnsName(dns) => write!(f, "DNS:{}", dns),
            GeneralName::X400Address(_) => write!(f, "X400:{}", self.display_value()),
            GeneralName::DirectoryName(_) => write!(f, "DirName:{}", self.display_value()),
            GeneralName::EdiPartyName(_) => write!(f, "EDI:{}", self.display_value()),
            GeneralName::Uri(uri) => write!(f, "URI:{}", uri),
            GeneralName::IpAddress(_) => write!(f, "IP:{}", self.display_value()),
            GeneralName::RegisteredId(oid) => write!(f, "RegID:{}", oid),
        }
    }
}

// ============================================================================
// SubjectAltName - RFC 5280 Section 4.2.1.6
// ============================================================================

/// SubjectAltName extension value: a sequence of classified names.
///
/// ```asn1
/// SubjectAltName ::= GeneralNames
/// GeneralNames ::= SEQUENCE SIZE (1..MAX) OF GeneralName
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectAltName {
    /// List of alternative names, in certificate order
    pub names: Vec<GeneralName>,
}

impl SubjectAltName {
    /// Get all DNS names.
    pub fn dns_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().filter_map(|n| match n {
            GeneralName::DnsName(dns) => Some(dns.as_str()),
            _ => None,
        })
    }

    /// Get all email addresses.
    pub fn email_addresses(&self) -> impl Iterator<Item = &str> {
        self.names.iter().filter_map(|n| match n {
            GeneralName::Rfc822Name(email) => Some(email.as_str()),
            _ => None,
        })
    }

    /// Get all IP addresses.
    pub fn ip_addresses(&self) -> impl Iterator<Item = &[u8]> {
        self.names.iter().filter_map(|n| match n {
            GeneralName::IpAddress(ip) => Some(ip.as_slice()),
            _ => None,
        })
    }
}

impl<'a> DecodeValue<'a> for SubjectAltName {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let mut names = Vec::new();
        reader.read_nested(header.length, |reader| {
            while !reader.is_finished() {
                let name_header = Header::decode(reader)?;
                let name = GeneralName::decode_value(reader, name_header)?;
                names.push(name);
            }
            Ok(())
        })?;
        Ok(Self { names })
    }
}

// Encoding re-emits the raw sub-encodings captured at decode time and is
// implemented only for the string-valued variants round-tripped by tests;
// this crate composes SAN values it does not originate.
impl EncodeValue for SubjectAltName {
    fn value_len(&self) -> der::Result<Length> {
        let mut len = Length::ZERO;
        for name in &self.names {
            len = (len + raw_entry_len(name)?)?;
        }
        Ok(len)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        for name in &self.names {
            encode_raw_entry(name, writer)?;
        }
        Ok(())
    }
}

impl der::FixedTag for SubjectAltName {
    const TAG: Tag = Tag::Sequence;
}

fn raw_entry_content_len(name: &GeneralName) -> der::Result<Length> {
    match name {
        GeneralName::OtherName(b)
        | GeneralName::X400Address(b)
        | GeneralName::DirectoryName(b)
        | GeneralName::EdiPartyName(b)
        | GeneralName::IpAddress(b) => b.len().try_into(),
        GeneralName::Rfc822Name(s) | GeneralName::DnsName(s) | GeneralName::Uri(s) => {
            s.len().try_into()
        }
        GeneralName::RegisteredId(oid) => Ok(Length::try_from(oid.as_bytes().len())?),
    }
}

fn raw_entry_len(name: &GeneralName) -> der::Result<Length> {
    let content = raw_entry_content_len(name)?;
    (Length::ONE + content.encoded_len()?)? + content
}

fn encode_raw_entry(name: &GeneralName, writer: &mut impl Writer) -> der::Result<()> {
    writer.write_byte(name.tag_byte())?;
    raw_entry_content_len(name)?.encode(writer)?;
    match name {
        GeneralName::OtherName(b)
        | GeneralName::X400Address(b)
        | GeneralName::DirectoryName(b)
        | GeneralName::EdiPartyName(b)
        | GeneralName::IpAddress(b) => writer.write(b),
        GeneralName::Rfc822Name(s) | GeneralName::DnsName(s) | GeneralName::Uri(s) => {
            writer.write(s.as_bytes())
        }
        GeneralName::RegisteredId(oid) => writer.write(oid.as_bytes()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;
    use alloc::vec;

    #[test]
    fn test_general_name_display() {
        let gn = GeneralName::DnsName("example.com".to_string());
        assert_eq!(gn.to_string(), "DNS:example.com");
        assert_eq!(gn.display_value(), "example.com");
        assert_eq!(gn.type_desc(), "DNS name");

        let gn = GeneralName::Rfc822Name("user@example.com".to_string());
        assert_eq!(gn.to_string(), "email:user@example.com");

        let gn = GeneralName::Uri("ldap://example.com".to_string());
        assert_eq!(gn.display_value(), "ldap://example.com");
    }

    #[test]
    fn test_ip_address_strings() {
        let gn = GeneralName::IpAddress(vec![192, 168, 1, 1]);
        assert_eq!(gn.ip_address_string().unwrap(), "192.168.1.1");
        assert_eq!(gn.display_value(), "192.168.1.1");

        // Malformed length falls back to hex display.
        let gn = GeneralName::IpAddress(vec![1, 2, 3]);
        assert_eq!(gn.ip_address_string(), None);
        assert_eq!(gn.display_value(), "01:02:03");
    }

    #[test]
    fn test_classify_subject_alt_name() {
        let san = testutil::test_san_value();
        let decoded = <SubjectAltName as Decode>::from_der(&san).unwrap();

        assert_eq!(decoded.names.len(), 5);
        assert!(matches!(decoded.names[0], GeneralName::DnsName(ref s) if s == "example.com"));
        assert!(
            matches!(decoded.names[1], GeneralName::Rfc822Name(ref s) if s == "admin@example.com")
        );
        assert!(matches!(decoded.names[2], GeneralName::IpAddress(ref b) if b == &[192, 168, 0, 1]));
        assert!(matches!(decoded.names[3], GeneralName::OtherName(_)));
        assert!(matches!(decoded.names[4], GeneralName::OtherName(_)));

        let dns: Vec<&str> = decoded.dns_names().collect();
        assert_eq!(dns, vec!["example.com"]);
    }

    #[test]
    fn test_san_round_trip() {
        let san = testutil::test_san_value();
        let decoded = <SubjectAltName as Decode>::from_der(&san).unwrap();
        assert_eq!(Encode::to_der(&decoded).unwrap(), san);
    }

    #[test]
    fn test_classify_rejects_non_context_tags() {
        // SEQUENCE containing a bare UTF8String is not a GeneralNames value.
        let bad = testutil::tlv(0x30, &testutil::tlv(0x0C, b"oops"));
        assert!(<SubjectAltName as Decode>::from_der(&bad).is_err());
    }
}
