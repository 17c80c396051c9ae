//! Subscription bootstrap.
//!
//! Drives one attempt through a straight line of stages:
//!
//! ```text
//! Start → CapabilityChecked → PermissionGranted → WorkerRegistered
//!       → SubscriptionResolved → Done
//! ```
//!
//! Each stage waits for the previous one. A failure at any stage ends the
//! attempt; nothing already done on the platform is rolled back. An
//! active subscription is always reused, so a runtime never holds two.

// Rust guideline compliant 2026-02

use super::capability;
use super::error::PushError;
use super::key_codec;
use super::platform::{PermissionState, PushPlatform, SubscribeOptions, WorkerRegistration};
use super::subscription::Subscription;
use super::sync::SyncClient;
use crate::constants::DEFAULT_WORKER_SCRIPT;

/// Inputs of a bootstrap attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOptions {
    /// Worker script registered before subscribing.
    pub worker_script: String,
    /// Server VAPID public key, URL-safe base64.
    pub application_server_key: String,
}

impl BootstrapOptions {
    /// Options for `application_server_key` with the default worker script.
    pub fn new(application_server_key: impl Into<String>) -> Self {
        Self {
            worker_script: DEFAULT_WORKER_SCRIPT.to_string(),
            application_server_key: application_server_key.into(),
        }
    }

    /// Use a different worker script.
    pub fn with_worker_script(mut self, worker_script: impl Into<String>) -> Self {
        self.worker_script = worker_script.into();
        self
    }
}

/// Last stage a bootstrap attempt reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStage {
    /// Nothing checked yet.
    Start,
    /// All capabilities present.
    CapabilityChecked,
    /// Notification permission granted.
    PermissionGranted,
    /// Worker registration handle obtained.
    WorkerRegistered,
    /// Existing subscription found or new one created.
    SubscriptionResolved,
    /// Attempt finished.
    Done,
}

/// Obtains the runtime's push subscription, creating it only when absent.
///
/// `bootstrap` takes `&mut self`, so one coordinator never runs two
/// attempts at once.
#[derive(Debug)]
pub struct SubscriptionCoordinator<P> {
    platform: P,
    options: BootstrapOptions,
    stage: BootstrapStage,
}

impl<P: PushPlatform> SubscriptionCoordinator<P> {
    /// Coordinator over `platform`.
    pub fn new(platform: P, options: BootstrapOptions) -> Self {
        Self {
            platform,
            options,
            stage: BootstrapStage::Start,
        }
    }

    /// Stage reached by the most recent attempt.
    pub fn stage(&self) -> BootstrapStage {
        self.stage
    }

    /// The injected platform.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Run a bootstrap attempt and return the active subscription.
    ///
    /// # Errors
    ///
    /// - [`PushError::UnsupportedCapability`] before any platform call
    /// - [`PushError::PermissionDenied`] unless permission is `granted`
    /// - [`PushError::RegistrationFailed`] if the worker cannot be
    ///   registered or queried
    /// - [`PushError::InvalidKeyEncoding`] if the VAPID key is not base64url
    /// - [`PushError::SubscribeFailed`] if the platform refuses to subscribe
    pub async fn bootstrap(&mut self) -> Result<Subscription, PushError> {
        self.stage = BootstrapStage::Start;

        capability::check(&self.platform)?;
        self.advance(BootstrapStage::CapabilityChecked);

        let permission = self.platform.request_permission().await;
        if permission != PermissionState::Granted {
            log::warn!("[Push] Notification permission not granted: {permission}");
            return Err(PushError::PermissionDenied(permission));
        }
        self.advance(BootstrapStage::PermissionGranted);

        let registration = self
            .platform
            .register_worker(&self.options.worker_script)
            .await
            .map_err(|e| PushError::RegistrationFailed(e.to_string()))?;
        self.advance(BootstrapStage::WorkerRegistered);

        let subscription = self.resolve_subscription(&registration).await?;
        self.advance(BootstrapStage::SubscriptionResolved);

        self.advance(BootstrapStage::Done);
        Ok(subscription)
    }

    /// Bootstrap, then post the subscription to the registry once.
    ///
    /// A sync failure leaves the subscription active on the platform but
    /// unknown to the registry; the next call reuses it and tries again.
    pub async fn bootstrap_and_sync(&mut self, sync: &SyncClient) -> Result<String, PushError> {
        let subscription = self.bootstrap().await?;
        sync.sync(&subscription).await
    }

    async fn resolve_subscription(
        &self,
        registration: &P::Registration,
    ) -> Result<Subscription, PushError> {
        let existing = registration
            .get_subscription()
            .await
            .map_err(|e| PushError::RegistrationFailed(e.to_string()))?;

        if let Some(subscription) = existing {
            log::info!(
                "[Push] Reusing existing subscription {}",
                subscription.endpoint
            );
            return Ok(subscription);
        }

        let application_server_key = key_codec::decode(&self.options.application_server_key)?;
        let options = SubscribeOptions {
            user_visible_only: true,
            application_server_key,
        };

        let subscription = registration
            .subscribe(options)
            .await
            .map_err(|e| PushError::SubscribeFailed(e.to_string()))?;

        log::info!("[Push] Created subscription {}", subscription.endpoint);
        Ok(subscription)
    }

    fn advance(&mut self, stage: BootstrapStage) {
        log::debug!("[Push] Bootstrap {:?} -> {:?}", self.stage, stage);
        self.stage = stage;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_VAPID_PUBLIC_KEY;
    use crate::notifications::capability::{Capabilities, Capability};
    use crate::notifications::memory::{CallCounts, MemoryPlatform};
    use crate::notifications::subscription::SubscriptionKeys;

    fn coordinator(platform: &MemoryPlatform) -> SubscriptionCoordinator<MemoryPlatform> {
        SubscriptionCoordinator::new(
            platform.clone(),
            BootstrapOptions::new(DEFAULT_VAPID_PUBLIC_KEY),
        )
    }

    fn existing() -> Subscription {
        Subscription {
            endpoint: "https://push.example.com/existing".to_string(),
            expiration_time: Some(1_700_000_000_000.0),
            keys: SubscriptionKeys {
                p256dh: "p256dh".to_string(),
                auth: "auth".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_fresh_platform_subscribes_once_with_visible_only_and_decoded_key() {
        let platform = MemoryPlatform::new();
        let mut coord = coordinator(&platform);

        let sub = coord.bootstrap().await.expect("bootstrap succeeds");

        assert_eq!(platform.calls().subscribes, 1);
        let options = platform.last_subscribe_options().unwrap();
        assert!(options.user_visible_only);
        assert_eq!(
            options.application_server_key,
            key_codec::decode(DEFAULT_VAPID_PUBLIC_KEY).unwrap()
        );
        assert_eq!(platform.current_subscription(), Some(sub));
        assert_eq!(platform.registered_scripts(), vec!["sw.js".to_string()]);
        assert_eq!(coord.stage(), BootstrapStage::Done);
    }

    #[tokio::test]
    async fn test_existing_subscription_is_reused_unchanged() {
        let platform = MemoryPlatform::new().with_subscription(existing());
        let mut coord = coordinator(&platform);

        let sub = coord.bootstrap().await.unwrap();

        assert_eq!(sub, existing());
        assert_eq!(platform.calls().subscribes, 0);
    }

    #[tokio::test]
    async fn test_second_bootstrap_reuses_first_subscription() {
        let platform = MemoryPlatform::new();
        let mut coord = coordinator(&platform);

        let first = coord.bootstrap().await.unwrap();
        let second = coord.bootstrap().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(platform.calls().subscribes, 1);
        assert_eq!(platform.calls().registrations, 2);
    }

    #[tokio::test]
    async fn test_missing_capability_makes_no_platform_calls() {
        let platform = MemoryPlatform::new()
            .with_capabilities(Capabilities::all().without(Capability::Notification));
        let mut coord = coordinator(&platform);

        let err = coord.bootstrap().await.unwrap_err();

        assert!(matches!(
            err,
            PushError::UnsupportedCapability(Capability::Notification)
        ));
        assert_eq!(platform.calls(), CallCounts::default());
        assert_eq!(coord.stage(), BootstrapStage::Start);
    }

    #[tokio::test]
    async fn test_permission_not_granted_stops_before_registration() {
        for decision in [PermissionState::Denied, PermissionState::Default] {
            let platform = MemoryPlatform::new().with_permission(decision);
            let mut coord = coordinator(&platform);

            let err = coord.bootstrap().await.unwrap_err();

            assert!(matches!(err, PushError::PermissionDenied(d) if d == decision));
            assert_eq!(platform.calls().permission_requests, 1);
            assert_eq!(platform.calls().registrations, 0);
            assert_eq!(coord.stage(), BootstrapStage::CapabilityChecked);
        }
    }

    #[tokio::test]
    async fn test_registration_failure_is_surfaced() {
        let platform = MemoryPlatform::new().failing_registration("failed to fetch sw.js");
        let mut coord = coordinator(&platform);

        let err = coord.bootstrap().await.unwrap_err();

        match err {
            PushError::RegistrationFailed(reason) => assert!(reason.contains("sw.js")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(platform.calls().subscription_queries, 0);
        assert_eq!(coord.stage(), BootstrapStage::PermissionGranted);
    }

    #[tokio::test]
    async fn test_bad_key_fails_without_subscribing() {
        let platform = MemoryPlatform::new();
        let mut coord = SubscriptionCoordinator::new(
            platform.clone(),
            BootstrapOptions::new("not*base64"),
        );

        let err = coord.bootstrap().await.unwrap_err();

        assert!(matches!(err, PushError::InvalidKeyEncoding(_)));
        assert_eq!(platform.calls().subscribes, 0);
        assert_eq!(coord.stage(), BootstrapStage::WorkerRegistered);
    }

    #[tokio::test]
    async fn test_bad_key_is_irrelevant_when_reusing() {
        let platform = MemoryPlatform::new().with_subscription(existing());
        let mut coord = SubscriptionCoordinator::new(
            platform.clone(),
            BootstrapOptions::new("not*base64"),
        );

        assert_eq!(coord.bootstrap().await.unwrap(), existing());
    }

    #[tokio::test]
    async fn test_subscribe_failure_is_surfaced() {
        let platform = MemoryPlatform::new().failing_subscribe("push service unavailable");
        let mut coord = coordinator(&platform);

        let err = coord.bootstrap().await.unwrap_err();

        assert!(matches!(err, PushError::SubscribeFailed(_)));
        assert_eq!(platform.current_subscription(), None);
    }

    #[tokio::test]
    async fn test_custom_worker_script() {
        let platform = MemoryPlatform::new();
        let mut coord = SubscriptionCoordinator::new(
            platform.clone(),
            BootstrapOptions::new(DEFAULT_VAPID_PUBLIC_KEY).with_worker_script("/push-worker.js"),
        );

        coord.bootstrap().await.unwrap();
        assert_eq!(
            platform.registered_scripts(),
            vec!["/push-worker.js".to_string()]
        );
    }
}
