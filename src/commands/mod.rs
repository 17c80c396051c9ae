//! CLI subcommand implementations for push-bootstrap.
//!
//! Commands are organized into submodules by domain:
//!
//! - [`decode_key`] - Decode a VAPID public key to its raw bytes
//! - [`sync`] - Post a saved subscription to the registry
//! - [`simulate`] - Run a full bootstrap against the in-memory platform
//!
//! # Usage
//!
//! Commands are invoked from the main CLI dispatcher:
//!
//! ```ignore
//! use push_bootstrap::commands;
//!
//! commands::decode_key::run(None, false, &config)?;
//! commands::sync::run("subscription.json", &config).await?;
//! ```

pub mod decode_key;
pub mod simulate;
pub mod sync;
