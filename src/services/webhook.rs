//! WebhookNotifier - fire-and-forget status messages to a Discord webhook.

use serde::Serialize;

#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    content: &'a str,
}

/// What happened to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// No webhook configured; nothing was sent.
    Skipped,
    /// The webhook accepted the message.
    Sent,
    /// The post failed; logged only.
    Failed,
}

#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    webhook_url: Option<String>,
    http_client: reqwest::Client,
}

impl WebhookNotifier {
    /// Create a notifier. An empty URL disables notifications.
    pub fn new(webhook_url: Option<String>, http_client: reqwest::Client) -> Self {
        Self {
            webhook_url: webhook_url.filter(|url| !url.is_empty()),
            http_client,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Post `message` to the webhook.
    ///
    /// Never fails: a missing webhook is skipped and delivery problems are
    /// logged as warnings.
    pub async fn notify(&self, message: &str) -> Delivery {
        let Some(url) = self.webhook_url.as_deref() else {
            log::info!("[SKIP] Discord webhook not set.");
            return Delivery::Skipped;
        };

        let result = self
            .http_client
            .post(url)
            .json(&WebhookMessage { content: message })
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => Delivery::Sent,
            Ok(response) => {
                log::warn!("Webhook returned status {}", response.status());
                Delivery::Failed
            }
            Err(e) => {
                log::warn!("Webhook post failed: {}", e);
                Delivery::Failed
            }
        }
    }
}
