// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Armor transcoding between the textual certificate format and raw DER.
//!
//! The armored format is fixed and byte-exact for interoperating
//! consumers: the base64 body is wrapped at exactly 64 characters per
//! line with CRLF separators, a single `\n` follows the BEGIN marker and
//! precedes the END marker, and there is no trailing newline.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Header marker of an armored certificate block.
pub const PEM_CERT_HEADER: &str = "-----BEGIN CERTIFICATE-----";

/// Footer marker of an armored certificate block.
pub const PEM_CERT_FOOTER: &str = "-----END CERTIFICATE-----";

/// Remove the armor markers from a certificate.
///
/// Returns exactly the substring between the BEGIN and END markers,
/// including any internal whitespace (the caller strips that during
/// base64 decoding). Input without a marker pair is returned unchanged,
/// so raw base64 or binary-looking text can be passed safely.
pub fn strip_armor(text: &str) -> &str {
    if let Some(start) = text.find(PEM_CERT_HEADER) {
        let body_start = start + PEM_CERT_HEADER.len();
        if let Some(end) = text[body_start..].find(PEM_CERT_FOOTER) {
            return &text[body_start..body_start + end];
        }
    }
    text
}

/// Wrap an already base64-encoded body into an armored block.
///
/// Lines are split at exactly 64 characters and joined by CRLF; the last
/// line may be shorter. No trailing newline is emitted.
pub fn make_pem(data: &str) -> String {
    let bytes = data.as_bytes();
    let mut body = String::with_capacity(bytes.len() + bytes.len() / 32 + 2);
    for (i, chunk) in bytes.chunks(64).enumerate() {
        if i > 0 {
            body.push_str("\r\n");
        }
        body.push_str(&String::from_utf8_lossy(chunk));
    }

    let mut out = String::with_capacity(
        PEM_CERT_HEADER.len() + PEM_CERT_FOOTER.len() + body.len() + 2,
    );
    out.push_str(PEM_CERT_HEADER);
    out.push('\n');
    out.push_str(&body);
    out.push('\n');
    out.push_str(PEM_CERT_FOOTER);
    out
}

/// Base64-encode raw DER bytes and wrap them into an armored block.
pub fn to_armor(der: &[u8]) -> String {
    make_pem(&BASE64.encode(der))
}

/// Split a text containing one or more armored blocks into the
/// between-marker bodies, in order of appearance.
///
/// The match is non-greedy and spans newlines; text outside the marker
/// pairs (comments, surrounding whitespace) is ignored. A dangling BEGIN
/// marker without a matching END marker terminates the scan.
pub fn split_armored_list(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(PEM_CERT_HEADER) {
        let body_start = start + PEM_CERT_HEADER.len();
        match rest[body_start..].find(PEM_CERT_FOOTER) {
            Some(end) => {
                blocks.push(&rest[body_start..body_start + end]);
                rest = &rest[body_start + end + PEM_CERT_FOOTER.len()..];
            }
            None => break,
        }
    }

    blocks
}
