//! Error taxonomy for the subscription bootstrap.
//!
//! Every failure surfaces to the caller of `bootstrap()` or `sync()`.
//! Nothing in this crate retries or swallows them.

// Rust guideline compliant 2026-02

use thiserror::Error;

use super::capability::Capability;
use super::platform::PermissionState;

/// Failures of the bootstrap and sync operations.
#[derive(Error, Debug)]
pub enum PushError {
    /// The runtime lacks a required platform service.
    #[error("No support for {0}")]
    UnsupportedCapability(Capability),
    /// The user (or platform policy) did not grant notification permission.
    #[error("Notification permission not granted (decision: {0})")]
    PermissionDenied(PermissionState),
    /// The worker script could not be registered, or its registration
    /// could not be queried.
    #[error("Service worker registration failed: {0}")]
    RegistrationFailed(String),
    /// The platform refused to create a push subscription.
    #[error("Push subscribe failed: {0}")]
    SubscribeFailed(String),
    /// The VAPID public key is not valid URL-safe base64.
    #[error("Invalid application server key encoding: {0}")]
    InvalidKeyEncoding(String),
    /// The VAPID public key decodes but is not an uncompressed P-256 point.
    #[error("Invalid application server key: {0}")]
    InvalidApplicationServerKey(String),
    /// The registry answered with a non-success HTTP status.
    #[error("Registry rejected subscription (HTTP {0})")]
    RegistryRejected(u16),
    /// The registry answered 2xx but the body lacks a string `message`.
    #[error("Malformed registry acknowledgment: {0}")]
    MalformedAck(String),
    /// The registry request never produced a response.
    #[error("Registry request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Failure reported by an injected platform service.
///
/// Platform services are opaque, so only a human-readable reason survives.
/// The coordinator maps it to the [`PushError`] variant for its step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct PlatformError(String);

impl PlatformError {
    /// Create a platform error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    /// The reason reported by the platform.
    pub fn reason(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failure() {
        let err = PushError::UnsupportedCapability(Capability::PushManager);
        assert_eq!(err.to_string(), "No support for Push API");

        let err = PushError::PermissionDenied(PermissionState::Denied);
        assert_eq!(
            err.to_string(),
            "Notification permission not granted (decision: denied)"
        );

        assert_eq!(
            PushError::RegistryRejected(500).to_string(),
            "Registry rejected subscription (HTTP 500)"
        );
    }

    #[test]
    fn test_platform_error_keeps_reason() {
        let err = PlatformError::new("script fetch failed: 404");
        assert_eq!(err.reason(), "script fetch failed: 404");
        assert_eq!(err.to_string(), "script fetch failed: 404");
    }
}
