// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Cached base naming value.
//!
//! Deployments issue every certificate under a fixed subject base
//! supplied by an external configuration provider. The value is fetched
//! once, on first use, and cached for the lifetime of the process; the
//! provider is never consulted again. Initialization is idempotent and
//! concurrent first callers block until the cached value is available.

extern crate alloc;

use alloc::string::String;

use spin::Once;

static SUBJECT_BASE: Once<String> = Once::new();

/// Fetch and cache the certificate subject base.
///
/// `provider` is invoked only if no value has been cached yet; later
/// calls return the cached value without running the provider.
pub fn initialize_subject_base<F>(provider: F) -> &'static str
where
    F: FnOnce() -> String,
{
    SUBJECT_BASE.call_once(provider).as_str()
}

/// The cached subject base, if it has been initialized.
pub fn subject_base() -> Option<&'static str> {
    SUBJECT_BASE.get().map(String::as_str)
}
