//! Registry sync command.
//!
//! Posts a subscription previously exported from a browser
//! (`JSON.stringify(subscription)`) to the configured registry.
//!
//! ```bash
//! push-bootstrap sync subscription.json
//! cat subscription.json | push-bootstrap sync -
//! ```

use anyhow::{Context, Result};
use std::io::Read;

use crate::config::Config;
use crate::notifications::{Subscription, SyncClient};

/// Read a subscription from `source` (`-` for stdin) and sync it.
pub async fn run(source: &str, config: &Config) -> Result<()> {
    let subscription = read_subscription(source)?;
    let client = SyncClient::new(&config.registry_url)?;

    let message = client
        .sync(&subscription)
        .await
        .with_context(|| format!("Failed to sync subscription to {}", client.endpoint()))?;

    println!("{message}");
    Ok(())
}

/// Parse a subscription from a file path, or stdin when `source` is `-`.
pub fn read_subscription(source: &str) -> Result<Subscription> {
    let content = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read subscription from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source).with_context(|| format!("Failed to read {source}"))?
    };

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {source} as a push subscription"))
}
