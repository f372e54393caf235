//! ARI certificate identifiers.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD as B64URL, Engine};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a certificate in ARI lookups.
///
/// Formed as `base64url(keyIdentifier) "." base64url(serial)`, both without
/// padding, where the serial is the DER INTEGER content octets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateIdentifier(String);

impl CertificateIdentifier {
    /// Build an identifier from the authority key identifier bytes and the
    /// big-endian magnitude of the serial number.
    ///
    /// Leading zero bytes of `serial` are ignored; the positive encoding is
    /// recomputed by [`encode_serial`].
    #[must_use]
    pub fn from_parts(key_identifier: &[u8], serial: &[u8]) -> Self {
        Self(format!(
            "{}.{}",
            B64URL.encode(key_identifier),
            B64URL.encode(encode_serial(serial))
        ))
    }

    /// The identifier as it appears in the renewal-info URL
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CertificateIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CertificateIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Encode an unsigned big-endian magnitude as the shortest two's-complement
/// positive integer: `(bit_length + 8) / 8` bytes.
///
/// A zero byte is prepended whenever the top bit of the leading byte is set,
/// and zero itself encodes as `[0x00]`.
#[must_use]
pub fn encode_serial(magnitude: &[u8]) -> Vec<u8> {
    let start = magnitude
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(magnitude.len());
    let significant = &magnitude[start..];

    let mut out = Vec::with_capacity(significant.len() + 1);
    if significant.first().map_or(true, |&b| b & 0x80 != 0) {
        out.push(0);
    }
    out.extend_from_slice(significant);
    out
}
