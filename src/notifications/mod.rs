//! Web push subscription bootstrap.
//!
//! Obtains a browser-style push subscription bound to the server's VAPID
//! key and registers it with the subscription registry, so the server can
//! push to this client later.
//!
//! # Architecture
//!
//! ```text
//! capability::check          worker? notification? push?
//!     ↓
//! PushPlatform::request_permission   must be "granted"
//!     ↓
//! PushPlatform::register_worker      sw.js
//!     ↓
//! WorkerRegistration::get_subscription
//!     ├── Some → reuse
//!     └── None → key_codec::decode(VAPID key) → subscribe(userVisibleOnly)
//!     ↓
//! SyncClient::sync                   POST /save-subscription
//! ```
//!
//! # Platform services
//!
//! The coordinator never touches globals. Hosts inject their services
//! through [`platform::PushPlatform`]; [`memory::MemoryPlatform`] is the
//! in-process implementation.
//!
//! # Stale subscriptions
//!
//! Nothing here unsubscribes. A subscription replaced outside this crate
//! stays in the registry until the server evicts it.

// Rust guideline compliant 2026-02

pub mod capability;
pub mod coordinator;
pub mod error;
pub mod key_codec;
pub mod memory;
pub mod platform;
pub mod subscription;
pub mod sync;

pub use capability::{Capabilities, Capability, CapabilityProbe};
pub use coordinator::{BootstrapOptions, BootstrapStage, SubscriptionCoordinator};
pub use error::{PlatformError, PushError};
pub use key_codec::DecodedKey;
pub use memory::MemoryPlatform;
pub use platform::{PermissionState, PushPlatform, SubscribeOptions, WorkerRegistration};
pub use subscription::{Subscription, SubscriptionKeys};
pub use sync::SyncClient;
