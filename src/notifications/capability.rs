//! Capability gate run before any state-changing platform call.
//!
//! Probes the three platform services push delivery depends on, in a
//! fixed order, and stops at the first one that is missing.

// Rust guideline compliant 2026-02

use std::fmt;

use super::error::PushError;

/// A platform service required for push subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Worker registration (`navigator.serviceWorker` in browsers).
    ServiceWorker,
    /// User-visible notifications (`Notification`).
    Notification,
    /// Push subscriptions (`PushManager`).
    PushManager,
}

impl Capability {
    /// Probe order used by [`check`].
    pub const ORDERED: [Self; 3] = [Self::ServiceWorker, Self::Notification, Self::PushManager];

    /// Human-readable name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::ServiceWorker => "service worker",
            Self::Notification => "Notification API",
            Self::PushManager => "Push API",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Answers whether the host runtime exposes a capability.
///
/// Probing must have no side effects beyond observation.
pub trait CapabilityProbe {
    /// Returns `true` if the runtime supports `capability`.
    fn supports(&self, capability: Capability) -> bool;
}

/// Static capability flags, for hosts that know their support up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Worker registration is available.
    pub service_worker: bool,
    /// Notifications are available.
    pub notification: bool,
    /// Push subscriptions are available.
    pub push_manager: bool,
}

impl Capabilities {
    /// Every capability present.
    pub fn all() -> Self {
        Self {
            service_worker: true,
            notification: true,
            push_manager: true,
        }
    }

    /// Copy of `self` with `capability` removed.
    pub fn without(mut self, capability: Capability) -> Self {
        match capability {
            Capability::ServiceWorker => self.service_worker = false,
            Capability::Notification => self.notification = false,
            Capability::PushManager => self.push_manager = false,
        }
        self
    }
}

impl CapabilityProbe for Capabilities {
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::ServiceWorker => self.service_worker,
            Capability::Notification => self.notification,
            Capability::PushManager => self.push_manager,
        }
    }
}

/// Verify the runtime supports every required capability.
///
/// Probes in [`Capability::ORDERED`] order and fails with
/// [`PushError::UnsupportedCapability`] on the first missing one, without
/// probing the rest. A failure here is a precondition failure, not
/// something to retry.
pub fn check<P: CapabilityProbe + ?Sized>(probe: &P) -> Result<(), PushError> {
    for capability in Capability::ORDERED {
        if !probe.supports(capability) {
            log::warn!("[Push] Runtime has no support for {capability}");
            return Err(PushError::UnsupportedCapability(capability));
        }
    }
    Ok(())
}
