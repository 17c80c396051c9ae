//! Application-wide constants for push-bootstrap.
//!
//! Centralizes registry routes and configuration defaults so the CLI,
//! the config layer and the sync client agree on them.
//!
//! # Categories
//!
//! - **Registry**: remote subscription registry location
//! - **Worker**: service worker script registered before subscribing
//! - **VAPID**: default application server key

// ============================================================================
// Registry
// ============================================================================

/// Registry route that accepts a subscription description via POST.
pub const SAVE_SUBSCRIPTION_PATH: &str = "/save-subscription";

/// Registry base URL used when neither config nor env supplies one.
pub const DEFAULT_REGISTRY_URL: &str = "http://localhost:3000";

// ============================================================================
// Worker
// ============================================================================

/// Service worker script path handed to the platform's register call.
pub const DEFAULT_WORKER_SCRIPT: &str = "sw.js";

// ============================================================================
// VAPID
// ============================================================================

/// Public VAPID key of the reference deployment (base64url, 65 bytes decoded).
///
/// Only a starting value for fresh config files. Deployments override it
/// with `PUSH_BOOTSTRAP_VAPID_PUBLIC_KEY` or `config.json`.
pub const DEFAULT_VAPID_PUBLIC_KEY: &str =
    "BDgiCyiO9piCbZWk_2OFlqy-3zdPmtsCNNADUk1W1za5Z8qx76E9u1j9zkuBJb5QociIoOr4xgLbQTpIoovpN7I";
