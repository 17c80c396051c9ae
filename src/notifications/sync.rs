//! Registry sync: hand a subscription to the server so it can push later.

// Rust guideline compliant 2026-02

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;

use super::error::PushError;
use super::subscription::Subscription;
use crate::constants::SAVE_SUBSCRIPTION_PATH;

/// Registry acknowledgment body.
#[derive(Debug, Deserialize)]
struct AckResult {
    message: String,
}

/// HTTP client for the subscription registry.
///
/// Enforces no timeout and never retries; callers that want either
/// configure the `reqwest::Client` passed to [`SyncClient::with_client`].
#[derive(Debug, Clone)]
pub struct SyncClient {
    client: Client,
    endpoint: String,
}

impl SyncClient {
    /// Creates a sync client posting to `{registry_url}/save-subscription`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(registry_url: &str) -> Result<Self, PushError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, registry_url))
    }

    /// Creates a sync client with a pre-configured HTTP client.
    pub fn with_client(client: Client, registry_url: &str) -> Self {
        let endpoint = format!(
            "{}{}",
            registry_url.trim_end_matches('/'),
            SAVE_SUBSCRIPTION_PATH
        );
        Self { client, endpoint }
    }

    /// Full URL subscriptions are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post `subscription` to the registry and return its acknowledgment.
    ///
    /// # Errors
    ///
    /// - [`PushError::RegistryRejected`] on a non-2xx status
    /// - [`PushError::MalformedAck`] if a 2xx body has no string `message`
    /// - [`PushError::Transport`] if no response arrives
    pub async fn sync(&self, subscription: &Subscription) -> Result<String, PushError> {
        log::debug!(
            "[Push] Saving subscription {} to {}",
            subscription.endpoint,
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(subscription)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("[Push] Registry rejected subscription: {status}");
            return Err(PushError::RegistryRejected(status.as_u16()));
        }

        let body = response.text().await?;
        let ack: AckResult =
            serde_json::from_str(&body).map_err(|e| PushError::MalformedAck(e.to_string()))?;

        log::info!("[Push] Server acknowledged subscription: {}", ack.message);
        Ok(ack.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::subscription::SubscriptionKeys;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn subscription() -> Subscription {
        Subscription {
            endpoint: "https://push.example.com/send/abc".to_string(),
            expiration_time: None,
            keys: SubscriptionKeys {
                p256dh: "BPp256dh".to_string(),
                auth: "authsecret".to_string(),
            },
        }
    }

    #[test]
    fn test_endpoint_joins_registry_path() {
        let client = SyncClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:3000/save-subscription");
    }

    #[tokio::test]
    async fn test_sync_posts_json_and_returns_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/save-subscription"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "endpoint": "https://push.example.com/send/abc",
                "expirationTime": null,
                "keys": { "p256dh": "BPp256dh", "auth": "authsecret" }
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({ "message": "Subscription saved" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = SyncClient::new(&server.uri()).unwrap();
        let message = client.sync(&subscription()).await.expect("sync succeeds");
        assert_eq!(message, "Subscription saved");
    }

    #[tokio::test]
    async fn test_server_error_is_rejected_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/save-subscription"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = SyncClient::new(&server.uri()).unwrap();
        let err = client.sync(&subscription()).await.unwrap_err();
        assert!(matches!(err, PushError::RegistryRejected(500)));
    }

    #[tokio::test]
    async fn test_ack_without_message_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .mount(&server)
            .await;

        let client = SyncClient::new(&server.uri()).unwrap();
        let err = client.sync(&subscription()).await.unwrap_err();
        assert!(matches!(err, PushError::MalformedAck(_)));
    }

    #[tokio::test]
    async fn test_non_json_ack_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("saved"))
            .mount(&server)
            .await;

        let client = SyncClient::new(&server.uri()).unwrap();
        let err = client.sync(&subscription()).await.unwrap_err();
        assert!(matches!(err, PushError::MalformedAck(_)));
    }

    #[tokio::test]
    async fn test_unreachable_registry_is_transport_error() {
        let client = SyncClient::new("http://127.0.0.1:9").unwrap();
        let err = client.sync(&subscription()).await.unwrap_err();
        assert!(matches!(err, PushError::Transport(_)));
    }
}
