//! Push subscription description.
//!
//! The platform owns the subscription. This crate only carries its
//! canonical JSON form (the shape of `PushSubscription.toJSON()`) from the
//! platform to the registry.

// Rust guideline compliant 2026-02

use serde::{Deserialize, Serialize};

/// A platform push subscription, as the registry receives it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Push service endpoint URL.
    pub endpoint: String,
    /// Expiry in milliseconds since the epoch (a `DOMHighResTimeStamp`,
    /// so possibly fractional); `null` when the push service sets none.
    #[serde(default)]
    pub expiration_time: Option<f64>,
    /// Message encryption keys.
    pub keys: SubscriptionKeys,
}

/// Keying material of a subscription (RFC 8291).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    /// Client's P-256 ECDH public key (base64url).
    pub p256dh: String,
    /// Shared auth secret (base64url).
    pub auth: String,
}
