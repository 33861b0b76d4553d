// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 certificate normalization and identity-mapping extension codec.
//!
//! Certificates are stored internally DER-encoded but arrive in several
//! shapes: armored text files, bare base64 from a directory attribute,
//! or raw binary from a CA. This crate converts any of them to a
//! canonical binary form, extracts exact sub-encodings of the
//! certificate body (subject, issuer, serial number, public-key info),
//! and encodes/decodes the Extended Key Usage and Subject Alternative
//! Name extensions — including the Kerberos principal and Windows user
//! principal otherName types used for identity mapping.
//!
//! Full structural parsing is delegated to a pluggable trust-store
//! backend; see [`trust_store`].
//!
//! # Example
//! ```no_run
//! use idm_x509::{normalize_certificate, get_der_subject};
//!
//! # fn example(rawcert: &[u8]) -> idm_x509::Result<()> {
//! let cert = normalize_certificate(rawcert)?;
//! let subject = get_der_subject(cert.as_bytes())?;
//! # let _ = subject;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod certificate;
pub mod config;
pub mod error;
pub mod normalize;
pub mod pem;
pub mod trust_store;
pub mod util;
pub mod x509;

#[cfg(test)]
pub(crate) mod testutil;

pub use certificate::name::{GeneralName, SubjectAltName};
pub use certificate::{
    extract_field, get_der_issuer, get_der_public_key_info, get_der_serial_number,
    get_der_subject, get_serial_number, is_self_signed, Certificate, Name, TbsCertificate,
    TbsField, Version,
};
pub use config::{initialize_subject_base, subject_base};
pub use error::{CertificateFormatError, DecodeError, Error, FileError, Result};
pub use normalize::{load_certificate_list, normalize_certificate, validate_certificate, CertificateDer};
#[cfg(feature = "std")]
pub use normalize::{
    load_certificate_from_file, load_certificate_list_from_file, write_certificate,
    write_certificate_list,
};
pub use pem::{make_pem, split_armored_list, strip_armor, to_armor};
pub use trust_store::{
    initialize_trust_store, trust_store, ParsedCertificate, ParsedExtension, TrustStore,
    TrustStoreError,
};
pub use x509::{
    decode_general_names, encode_ext_key_usage, get_ext_key_usage, ExtendedKeyUsage, Extension,
    GeneralNameInfo, GeneralNameKind, OtherNameValue,
};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::certificate::{extract_field, TbsField};
    pub use crate::normalize::{normalize_certificate, CertificateDer};
    pub use crate::x509::{decode_general_names, get_ext_key_usage, GeneralNameInfo};
    pub use crate::{Error, Result};
}
