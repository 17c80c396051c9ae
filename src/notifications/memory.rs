//! In-process push platform.
//!
//! Behaves like a browser that persists its push subscription across
//! worker registrations, and records every call it receives. Used by the
//! test suite and by `push-bootstrap simulate` to exercise the registry
//! without a browser.

// Rust guideline compliant 2026-02

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64URL, Engine};
use p256::elliptic_curve::rand_core::{OsRng, RngCore};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::SecretKey;

use super::capability::{Capabilities, Capability, CapabilityProbe};
use super::error::PlatformError;
use super::platform::{PermissionState, PushPlatform, SubscribeOptions, WorkerRegistration};
use super::subscription::{Subscription, SubscriptionKeys};

/// Endpoint prefix for subscriptions minted by [`MemoryPlatform`].
pub const MEMORY_PUSH_SERVICE: &str = "https://push.example.invalid/send";

/// Number of calls each platform service received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    /// `request_permission` calls.
    pub permission_requests: usize,
    /// `register_worker` calls.
    pub registrations: usize,
    /// `get_subscription` calls.
    pub subscription_queries: usize,
    /// `subscribe` calls.
    pub subscribes: usize,
}

#[derive(Debug)]
struct MemoryState {
    capabilities: Capabilities,
    permission: PermissionState,
    registration_error: Option<String>,
    subscribe_error: Option<String>,
    subscription: Option<Subscription>,
    calls: CallCounts,
    probed: Vec<Capability>,
    registered_scripts: Vec<String>,
    last_subscribe: Option<SubscribeOptions>,
}

/// Push platform held entirely in memory.
///
/// Clones share state, so a test can keep one handle for assertions while
/// the coordinator owns another.
#[derive(Debug, Clone)]
pub struct MemoryPlatform {
    state: Arc<Mutex<MemoryState>>,
}

impl Default for MemoryPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPlatform {
    /// Platform with every capability, permission granted, no subscription.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                capabilities: Capabilities::all(),
                permission: PermissionState::Granted,
                registration_error: None,
                subscribe_error: None,
                subscription: None,
                calls: CallCounts::default(),
                probed: Vec::new(),
                registered_scripts: Vec::new(),
                last_subscribe: None,
            })),
        }
    }

    /// Replace the capability flags.
    pub fn with_capabilities(self, capabilities: Capabilities) -> Self {
        self.lock().capabilities = capabilities;
        self
    }

    /// Decision returned by `request_permission`.
    pub fn with_permission(self, permission: PermissionState) -> Self {
        self.lock().permission = permission;
        self
    }

    /// Start with an already-active subscription.
    pub fn with_subscription(self, subscription: Subscription) -> Self {
        self.lock().subscription = Some(subscription);
        self
    }

    /// Make `register_worker` fail with `reason`.
    pub fn failing_registration(self, reason: impl Into<String>) -> Self {
        self.lock().registration_error = Some(reason.into());
        self
    }

    /// Make `subscribe` fail with `reason`.
    pub fn failing_subscribe(self, reason: impl Into<String>) -> Self {
        self.lock().subscribe_error = Some(reason.into());
        self
    }

    /// Calls received so far.
    pub fn calls(&self) -> CallCounts {
        self.lock().calls
    }

    /// Capabilities probed so far, in probe order.
    pub fn probed_capabilities(&self) -> Vec<Capability> {
        self.lock().probed.clone()
    }

    /// Script paths passed to `register_worker`.
    pub fn registered_scripts(&self) -> Vec<String> {
        self.lock().registered_scripts.clone()
    }

    /// Options of the most recent `subscribe` call.
    pub fn last_subscribe_options(&self) -> Option<SubscribeOptions> {
        self.lock().last_subscribe.clone()
    }

    /// The subscription currently held by the platform.
    pub fn current_subscription(&self) -> Option<Subscription> {
        self.lock().subscription.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().expect("MemoryPlatform mutex poisoned")
    }
}

impl CapabilityProbe for MemoryPlatform {
    fn supports(&self, capability: Capability) -> bool {
        let mut state = self.lock();
        state.probed.push(capability);
        state.capabilities.supports(capability)
    }
}

#[async_trait]
impl PushPlatform for MemoryPlatform {
    type Registration = MemoryRegistration;

    async fn request_permission(&self) -> PermissionState {
        let mut state = self.lock();
        state.calls.permission_requests += 1;
        state.permission
    }

    async fn register_worker(&self, script_path: &str) -> Result<MemoryRegistration, PlatformError> {
        let mut state = self.lock();
        state.calls.registrations += 1;
        state.registered_scripts.push(script_path.to_string());

        if let Some(reason) = &state.registration_error {
            return Err(PlatformError::new(reason.clone()));
        }

        Ok(MemoryRegistration {
            state: Arc::clone(&self.state),
        })
    }
}

/// Registration handle issued by [`MemoryPlatform`].
#[derive(Debug, Clone)]
pub struct MemoryRegistration {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryRegistration {
    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().expect("MemoryPlatform mutex poisoned")
    }
}

#[async_trait]
impl WorkerRegistration for MemoryRegistration {
    async fn get_subscription(&self) -> Result<Option<Subscription>, PlatformError> {
        let mut state = self.lock();
        state.calls.subscription_queries += 1;
        Ok(state.subscription.clone())
    }

    async fn subscribe(&self, options: SubscribeOptions) -> Result<Subscription, PlatformError> {
        let mut state = self.lock();
        state.calls.subscribes += 1;
        state.last_subscribe = Some(options.clone());

        if let Some(reason) = &state.subscribe_error {
            return Err(PlatformError::new(reason.clone()));
        }
        if !options.user_visible_only {
            return Err(PlatformError::new("silent push is not supported"));
        }
        if options.application_server_key.is_empty() {
            return Err(PlatformError::new("applicationServerKey is required"));
        }

        let subscription = mint_subscription();
        state.subscription = Some(subscription.clone());
        Ok(subscription)
    }
}

/// Mint a subscription with real P-256 keying material.
fn mint_subscription() -> Subscription {
    let client_key = SecretKey::random(&mut OsRng);
    let p256dh = BASE64URL.encode(client_key.public_key().to_encoded_point(false).as_bytes());

    let mut auth = [0u8; 16];
    OsRng.fill_bytes(&mut auth);

    let mut token = [0u8; 12];
    OsRng.fill_bytes(&mut token);

    Subscription {
        endpoint: format!("{MEMORY_PUSH_SERVICE}/{}", BASE64URL.encode(token)),
        expiration_time: None,
        keys: SubscriptionKeys {
            p256dh,
            auth: BASE64URL.encode(auth),
        },
    }
}
