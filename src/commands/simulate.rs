//! End-to-end bootstrap against the in-memory platform.
//!
//! Exercises the real registry with a realistic subscription, without a
//! browser. Useful for checking a registry deployment.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::notifications::{MemoryPlatform, SubscriptionCoordinator, SyncClient};

/// Bootstrap a fresh in-memory subscription and, unless `no_sync`, post it.
pub async fn run(no_sync: bool, config: &Config) -> Result<()> {
    let mut coordinator =
        SubscriptionCoordinator::new(MemoryPlatform::new(), config.bootstrap_options());

    if no_sync {
        let subscription = coordinator.bootstrap().await.context("Bootstrap failed")?;
        println!("{}", serde_json::to_string_pretty(&subscription)?);
        return Ok(());
    }

    let client = SyncClient::new(&config.registry_url)?;
    let message = coordinator
        .bootstrap_and_sync(&client)
        .await
        .with_context(|| format!("Bootstrap and sync to {} failed", client.endpoint()))?;

    println!("{message}");
    Ok(())
}
