//! Push Bootstrap - web push subscription bootstrap and registry sync.
//!
//! This crate establishes a client's ability to receive push messages:
//! it checks platform support, obtains notification permission, registers
//! the worker, reuses or creates a push subscription bound to the server's
//! VAPID key, and posts that subscription to the server's registry.
//!
//! # Architecture
//!
//! - **Platform** - injected host services (worker, notification, push)
//! - **Coordinator** - linear bootstrap, reuse-or-create
//! - **Sync** - registry HTTP client
//!
//! # Modules
//!
//! - [`notifications`] - Bootstrap protocol, platform seam, registry sync
//! - [`config`] - Configuration loading/saving
//! - [`commands`] - CLI subcommands
//! - [`constants`] - Registry routes and defaults

pub mod commands;
pub mod config;
pub mod constants;
pub mod notifications;

// Re-export commonly used types
pub use config::Config;
pub use notifications::{
    BootstrapOptions, PushError, PushPlatform, Subscription, SubscriptionCoordinator, SyncClient,
};
