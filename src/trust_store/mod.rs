// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Trust-store adapter boundary.
//!
//! Full certificate parsing and structural validation is an external
//! capability: given canonical DER bytes the adapter either returns a
//! parsed-certificate handle exposing the subject, issuer, serial number,
//! and extension list, or fails with a distinguishable malformed-structure
//! signal. This crate never reimplements that parser; it consumes it
//! through the [`TrustStore`] trait.
//!
//! The process-wide adapter handle follows a single-initialization
//! discipline: the first caller installs a backend under a once guard,
//! concurrent callers block until installation completes, and later calls
//! read the installed handle without locking. Installation is idempotent.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use const_oid::ObjectIdentifier;
use spin::Once;

use crate::error::{CertificateFormatError, Error, Result};

#[cfg(feature = "rustcrypto-backend")]
mod rustcrypto;
#[cfg(feature = "rustcrypto-backend")]
pub use self::rustcrypto::RustCryptoTrustStore;

/// Failure modes of the trust-store adapter.
///
/// `Malformed` is the adapter's specific bad-structure signal; every
/// other failure is carried through with its message. The normalization
/// pipeline depends on telling these two apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustStoreError {
    /// The bytes are not a well-formed DER certificate
    Malformed,

    /// Any other adapter failure
    Other(String),
}

impl fmt::Display for TrustStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrustStoreError::Malformed => write!(f, "malformed certificate structure"),
            TrustStoreError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl From<TrustStoreError> for Error {
    fn from(err: TrustStoreError) -> Self {
        match err {
            TrustStoreError::Malformed => {
                Error::CertificateFormat(CertificateFormatError::BadEncoding)
            }
            TrustStoreError::Other(msg) => {
                Error::CertificateFormat(CertificateFormatError::Other(msg))
            }
        }
    }
}

/// A single extension as reported by the adapter, in certificate order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedExtension {
    /// Extension OID
    pub oid: ObjectIdentifier,

    /// Criticality flag
    pub critical: bool,

    /// Extension value, without the OCTET STRING wrapper
    pub value: Vec<u8>,
}

/// Parsed-certificate handle returned by the adapter.
///
/// The handle is used for validation and extension lookup only; the
/// canonical bytes themselves stay with the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCertificate {
    /// DER encoding of the subject Name
    pub subject: Vec<u8>,

    /// DER encoding of the issuer Name
    pub issuer: Vec<u8>,

    /// Serial number as a decimal string
    pub serial_number: String,

    /// Extensions in certificate order
    pub extensions: Vec<ParsedExtension>,
}

/// Trust-store adapter trait.
///
/// Implementations wrap an external X.509 parser. Input bytes are assumed
/// to be canonical binary; armored text must be normalized first.
pub trait TrustStore {
    /// Attempt a full parse of a DER certificate.
    fn parse(&self, der: &[u8]) -> core::result::Result<ParsedCertificate, TrustStoreError>;
}

static TRUST_STORE: Once<Box<dyn TrustStore + Send + Sync>> = Once::new();

/// Install a trust-store backend as the process-wide adapter.
///
/// The first call wins; re-invoking after success is a no-op that returns
/// the already-installed handle. Callers racing the first installation
/// block until it completes.
pub fn initialize_trust_store(
    store: Box<dyn TrustStore + Send + Sync>,
) -> &'static (dyn TrustStore + Send + Sync) {
    TRUST_STORE.call_once(|| store).as_ref()
}

/// Get the process-wide trust-store adapter, installing the default
/// backend on first use when one is built in.
#[cfg(feature = "rustcrypto-backend")]
pub fn trust_store() -> Result<&'static (dyn TrustStore + Send + Sync)> {
    Ok(TRUST_STORE
        .call_once(|| {
            log::debug!("installing default RustCrypto trust store backend");
            Box::new(RustCryptoTrustStore::new())
        })
        .as_ref())
}

/// Get the process-wide trust-store adapter.
///
/// Without a built-in backend a handle must have been installed with
/// [`initialize_trust_store`] first.
#[cfg(not(feature = "rustcrypto-backend"))]
pub fn trust_store() -> Result<&'static (dyn TrustStore + Send + Sync)> {
    TRUST_STORE
        .get()
        .map(|s| s.as_ref())
        .ok_or_else(|| Error::certificate_format("no trust store backend registered"))
}

/// Render a big-endian unsigned integer as a decimal string.
///
/// Serial numbers are arbitrary-precision; conversion never goes through
/// a native integer type.
pub(crate) fn decimal_from_be_bytes(bytes: &[u8]) -> String {
    let mut magnitude: Vec<u8> = bytes.iter().copied().skip_while(|&b| b == 0).collect();
    if magnitude.is_empty() {
        return String::from("0");
    }

    let mut digits: Vec<u8> = Vec::new();
    while !magnitude.is_empty() {
        // Divide the whole magnitude by 10, collecting the remainder.
        let mut remainder: u32 = 0;
        let mut quotient: Vec<u8> = Vec::with_capacity(magnitude.len());
        for &b in &magnitude {
            let cur = (remainder << 8) | u32::from(b);
            let q = (cur / 10) as u8;
            remainder = cur % 10;
            if !quotient.is_empty() || q != 0 {
                quotient.push(q);
            }
        }
        digits.push(remainder as u8);
        magnitude = quotient;
    }

    digits.iter().rev().map(|d| (b'0' + d) as char).collect()
}
