// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Error types for certificate normalization and extension decoding.
//!
//! Every operation in this crate surfaces a typed failure to its caller;
//! there is no silent substitution of defaults and no silent certificate
//! drop. Batch operations abort on the first failure.

extern crate alloc;

use alloc::string::String;
use core::fmt;

/// Result type alias for certificate codec operations
pub type Result<T> = core::result::Result<T, Error>;

/// Top-level error type for all certificate codec operations.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// Malformed base64 payload encountered during normalization
    Base64Decode(String),

    /// Structural validation failure reported by the trust-store adapter
    CertificateFormat(CertificateFormatError),

    /// I/O failure while reading or writing an armored certificate file
    File(FileError),

    /// Errors during DER/ASN.1 parsing (from the der crate)
    Asn1(der::Error),

    /// Structural parse failure in the raw TLV walkers
    Decode(DecodeError),

    /// The classification pass and the structural pass over a
    /// general-names sequence disagreed on the entry count
    Alignment {
        /// Entries produced by the classification pass
        classified: usize,
        /// Entries produced by the structural pass
        structural: usize,
    },
}

/// Structural validation failure from the trust-store adapter.
///
/// The adapter's specific malformed-structure signal is kept distinguishable
/// from every other adapter failure; the normalization pipeline depends on
/// telling these apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateFormatError {
    /// The adapter rejected the bytes as improperly DER-encoded
    BadEncoding,

    /// Any other adapter failure, with its message
    Other(String),
}

/// I/O failure while reading or writing an armored certificate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileError {
    /// Path of the file involved
    pub path: String,

    /// Underlying failure description
    pub reason: String,
}

/// Structural parse failure in the hand-rolled TLV walkers.
///
/// These cover the parts of the grammar the `der` crate cannot express,
/// such as GeneralString (tag 27) inside Kerberos principal names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Unexpected end of input
    UnexpectedEof,

    /// Invalid tag encountered
    InvalidTag {
        /// Tag byte required at this position
        expected: u8,
        /// Tag byte actually read
        found: u8,
    },

    /// Invalid length encoding
    InvalidLength(String),

    /// String content is not valid UTF-8
    InvalidUtf8,

    /// Bytes remain after the outermost value
    TrailingData,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Base64Decode(reason) => write!(f, "Base64 decoding failed: {}", reason),
            Error::CertificateFormat(e) => write!(f, "Certificate format error: {}", e),
            Error::File(e) => write!(f, "File operation failed: {}", e),
            Error::Asn1(e) => write!(f, "ASN.1 error: {}", e),
            Error::Decode(e) => write!(f, "Decode error: {}", e),
            Error::Alignment {
                classified,
                structural,
            } => write!(
                f,
                "General-name pass mismatch: classification pass produced {} entries, structural pass produced {}",
                classified, structural
            ),
        }
    }
}

impl fmt::Display for CertificateFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertificateFormatError::BadEncoding => {
                write!(f, "improperly formatted DER-encoded certificate")
            }
            CertificateFormatError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnexpectedEof => write!(f, "Unexpected end of input"),
            DecodeError::InvalidTag { expected, found } => {
                write!(
                    f,
                    "Invalid tag: expected 0x{:02x}, found 0x{:02x}",
                    expected, found
                )
            }
            DecodeError::InvalidLength(msg) => write!(f, "Invalid length: {}", msg),
            DecodeError::InvalidUtf8 => write!(f, "Invalid UTF-8 string content"),
            DecodeError::TrailingData => write!(f, "Trailing bytes after value"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Convert from der crate errors
impl From<der::Error> for Error {
    fn from(err: der::Error) -> Self {
        Error::Asn1(err)
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Error::Decode(err)
    }
}

impl Error {
    /// Create a base64 decode error
    pub fn base64<S: Into<String>>(reason: S) -> Self {
        Error::Base64Decode(reason.into())
    }

    /// Create a bad-encoding certificate format error
    pub fn bad_encoding() -> Self {
        Error::CertificateFormat(CertificateFormatError::BadEncoding)
    }

    /// Create a generic certificate format error
    pub fn certificate_format<S: Into<String>>(msg: S) -> Self {
        Error::CertificateFormat(CertificateFormatError::Other(msg.into()))
    }

    /// Create a file error
    pub fn file<P: Into<String>, S: Into<String>>(path: P, reason: S) -> Self {
        Error::File(FileError {
            path: path.into(),
            reason: reason.into(),
        })
    }
}
