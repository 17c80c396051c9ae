//! VAPID key decoding command.
//!
//! Prints the bytes a push subscription would be bound to, as a JSON
//! array, so they can be compared against what a browser receives.
//!
//! ```bash
//! push-bootstrap decode-key SGVsbG8h
//! # [72,101,108,108,111,33]
//! ```

use anyhow::{Context, Result};

use crate::config::Config;
use crate::notifications::key_codec;

/// Decode `key` (or the configured VAPID key) and print its bytes.
///
/// With `check`, also require a valid uncompressed P-256 point.
pub fn run(key: Option<&str>, check: bool, config: &Config) -> Result<()> {
    let key = key.unwrap_or(&config.vapid_public_key);
    let decoded = key_codec::decode(key).context("Failed to decode key")?;

    if check {
        key_codec::validate_application_server_key(&decoded)
            .context("Key is not usable as applicationServerKey")?;
    }

    log::info!("Decoded {} bytes", decoded.len());
    println!("{}", serde_json::to_string(decoded.as_bytes())?);
    Ok(())
}
