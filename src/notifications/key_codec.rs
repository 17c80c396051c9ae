//! VAPID application server key decoding.
//!
//! Servers publish their VAPID public key as URL-safe base64 without
//! padding. The push subscription primitive wants raw bytes, so the key is
//! re-padded, translated back to the standard alphabet and decoded the way
//! a browser's `atob()` would.

// Rust guideline compliant 2026-02

use std::fmt;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use super::error::PushError;

/// Length of an uncompressed SEC1 P-256 point (`0x04 || x || y`).
pub const APPLICATION_SERVER_KEY_LEN: usize = 65;

/// Standard alphabet, canonical padding, lenient about non-zero trailing
/// bits (`atob` ignores them).
const ATOB: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Raw bytes of a decoded application server key.
///
/// Produced once per bootstrap attempt and handed straight to `subscribe`.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedKey(Box<[u8]>);

impl DecodedKey {
    /// The decoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of decoded bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the key decoded to nothing (empty input).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take ownership of the bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.0.into_vec()
    }
}

impl AsRef<[u8]> for DecodedKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for DecodedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DecodedKey").field(&self.0.as_ref()).finish()
    }
}

/// Decode a URL-safe base64 public key into the bytes `subscribe` expects.
///
/// 1. Pad to a multiple of four with `=`.
/// 2. Map `-` to `+` and `_` to `/`.
/// 3. Decode as standard base64.
///
/// Pure and deterministic. Characters outside the alphabet, or a length no
/// padding can fix, fail with [`PushError::InvalidKeyEncoding`].
pub fn decode(input: &str) -> Result<DecodedKey, PushError> {
    let padding = (4 - input.len() % 4) % 4;

    let mut base64 = String::with_capacity(input.len() + padding);
    base64.extend(input.chars().map(|c| match c {
        '-' => '+',
        '_' => '/',
        other => other,
    }));
    base64.extend(std::iter::repeat('=').take(padding));

    let raw = ATOB
        .decode(base64.as_bytes())
        .map_err(|e| PushError::InvalidKeyEncoding(e.to_string()))?;

    Ok(DecodedKey(raw.into_boxed_slice()))
}

/// Check that a decoded key is an uncompressed P-256 point on the curve.
///
/// Push services reject anything else as `applicationServerKey`, so config
/// validation runs this before a deployment ships a bad key.
pub fn validate_application_server_key(key: &DecodedKey) -> Result<(), PushError> {
    let bytes = key.as_bytes();
    if bytes.len() != APPLICATION_SERVER_KEY_LEN || bytes[0] != 0x04 {
        return Err(PushError::InvalidApplicationServerKey(format!(
            "expected {APPLICATION_SERVER_KEY_LEN}-byte uncompressed P-256 point, got {} bytes",
            bytes.len()
        )));
    }

    p256::PublicKey::from_sec1_bytes(bytes).map_err(|e| {
        PushError::InvalidApplicationServerKey(format!("not a point on P-256: {e}"))
    })?;

    Ok(())
}
