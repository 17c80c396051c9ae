//! Injected platform services.
//!
//! Browsers expose these as globals (`navigator.serviceWorker`,
//! `Notification`, `PushManager`). Here they are traits so the coordinator
//! can run against any host, including [`super::memory::MemoryPlatform`].
//!
//! ```text
//! PushPlatform (trait)
//!     ├── supports(capability)        via CapabilityProbe
//!     ├── request_permission()
//!     └── register_worker(script) ──► WorkerRegistration (trait)
//!                                         ├── get_subscription()
//!                                         └── subscribe(options)
//! ```

// Rust guideline compliant 2026-02

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::capability::CapabilityProbe;
use super::error::PlatformError;
use super::key_codec::DecodedKey;
use super::subscription::Subscription;

/// The user's notification permission decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// Notifications allowed.
    Granted,
    /// Notifications blocked.
    Denied,
    /// Prompt dismissed without a decision.
    Default,
}

impl PermissionState {
    /// Platform string for this decision.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionState {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "granted" => Ok(Self::Granted),
            "denied" => Ok(Self::Denied),
            "default" => Ok(Self::Default),
            other => Err(PlatformError::new(format!(
                "unknown permission decision: {other}"
            ))),
        }
    }
}

/// Options for creating a push subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribeOptions {
    /// Every push must show a notification. Always `true` from the
    /// coordinator.
    pub user_visible_only: bool,
    /// Decoded VAPID public key the subscription is bound to.
    pub application_server_key: DecodedKey,
}

/// Host runtime services needed to obtain a push subscription.
#[async_trait]
pub trait PushPlatform: CapabilityProbe + Send + Sync {
    /// Handle returned by a successful worker registration.
    type Registration: WorkerRegistration;

    /// Ask the user for notification permission.
    ///
    /// May show a prompt; resolves once the user (or policy) decides.
    async fn request_permission(&self) -> PermissionState;

    /// Register the worker script and wait for its registration handle.
    ///
    /// # Errors
    ///
    /// Fails if the script cannot be fetched or installed.
    async fn register_worker(&self, script_path: &str)
        -> Result<Self::Registration, PlatformError>;
}

/// A registered worker's view of its push subscription.
#[async_trait]
pub trait WorkerRegistration: Send + Sync {
    /// The currently active subscription, if any.
    async fn get_subscription(&self) -> Result<Option<Subscription>, PlatformError>;

    /// Create a subscription bound to `options.application_server_key`.
    async fn subscribe(&self, options: SubscribeOptions) -> Result<Subscription, PlatformError>;
}
