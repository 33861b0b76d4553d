// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 extension support: OID constants, the extension container with
//! the Extended Key Usage codec, and the identity-mapping general-name
//! decoders.

pub mod extensions;
pub mod identity;
pub mod oids;

pub use extensions::{encode_ext_key_usage, get_ext_key_usage, ExtendedKeyUsage, Extension};
pub use identity::{
    compose_krb5_principal, decode_general_names, decode_krb5_principal_name, decode_other_name,
    decode_upn, GeneralNameInfo, GeneralNameKind, OtherNameValue,
};
