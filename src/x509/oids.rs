// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! OID constants for the extensions and otherName types this crate
//! encodes and decodes.
//!
//! # References
//! - RFC 5280 Section 4.2 - Certificate Extensions
//! - RFC 4556 Section 3.2.2 - id-pkinit-san (Kerberos principal name)
//! - MS-WCCE - szOID_NT_PRINCIPAL_NAME (user principal name)

use const_oid::ObjectIdentifier;

// =============================================================================
// Extension OIDs - RFC 5280 Section 4.2
// =============================================================================

/// Extended Key Usage - 2.5.29.37
pub const EXTENDED_KEY_USAGE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.37");

/// Subject Alternative Name - 2.5.29.17
pub const SUBJECT_ALT_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.17");

// =============================================================================
// Extended Key Usage purpose OIDs
// =============================================================================

/// TLS Web Server Authentication - 1.3.6.1.5.5.7.3.1
pub const EKU_SERVER_AUTH: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.1");

/// TLS Web Client Authentication - 1.3.6.1.5.5.7.3.2
pub const EKU_CLIENT_AUTH: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.2");

/// Code Signing - 1.3.6.1.5.5.7.3.3
pub const EKU_CODE_SIGNING: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.3");

/// Email Protection - 1.3.6.1.5.5.7.3.4
pub const EKU_EMAIL_PROTECTION: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.4");

/// anyExtendedKeyUsage - 2.5.29.37.0
///
/// When this OID appears anywhere in an Extended Key Usage value, the
/// encoded extension is marked non-critical.
pub const EKU_ANY: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.37.0");

/// Placeholder EKU used when an issuance profile requires a non-empty
/// usage list but no real purpose applies - 1.3.6.1.4.1.3319.6.10.16
pub const EKU_PLACEHOLDER: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.4.1.3319.6.10.16");

// =============================================================================
// otherName type-id OIDs
// =============================================================================

/// Windows user principal name (szOID_NT_PRINCIPAL_NAME) -
/// 1.3.6.1.4.1.311.20.2.3
pub const SAN_UPN: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.4.1.311.20.2.3");

/// Kerberos principal name (id-pkinit-san) - 1.3.6.1.5.2.2
pub const SAN_KRB5PRINCIPALNAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.2.2");

/// Check if an otherName type-id has a specialized decoder.
pub fn is_known_othername(oid: &ObjectIdentifier) -> bool {
    oid == &SAN_UPN || oid == &SAN_KRB5PRINCIPALNAME
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_extension_oids() {
        assert_eq!(EXTENDED_KEY_USAGE.to_string(), "2.5.29.37");
        assert_eq!(SUBJECT_ALT_NAME.to_string(), "2.5.29.17");
    }

    #[test]
    fn test_eku_oids() {
        assert_eq!(EKU_SERVER_AUTH.to_string(), "1.3.6.1.5.5.7.3.1");
        assert_eq!(EKU_CLIENT_AUTH.to_string(), "1.3.6.1.5.5.7.3.2");
        assert_eq!(EKU_CODE_SIGNING.to_string(), "1.3.6.1.5.5.7.3.3");
        assert_eq!(EKU_EMAIL_PROTECTION.to_string(), "1.3.6.1.5.5.7.3.4");
        assert_eq!(EKU_ANY.to_string(), "2.5.29.37.0");
        assert_eq!(EKU_PLACEHOLDER.to_string(), "1.3.6.1.4.1.3319.6.10.16");
    }

    #[test]
    fn test_othername_oids() {
        assert_eq!(SAN_UPN.to_string(), "1.3.6.1.4.1.311.20.2.3");
        assert_eq!(SAN_KRB5PRINCIPALNAME.to_string(), "1.3.6.1.5.2.2");
    }

    #[test]
    fn test_is_known_othername() {
        assert!(is_known_othername(&SAN_UPN));
        assert!(is_known_othername(&SAN_KRB5PRINCIPALNAME));
        assert!(!is_known_othername(&EKU_SERVER_AUTH));
    }
}
