//! OneSignal push delivery.
//!
//! Each notification is a single broadcast to the `All` segment of the
//! configured app. Exactly HTTP 200 counts as accepted.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;

use signal_common::config::OneSignalConfig;
use signal_common::error::{DeliveryError, WatchError};
use signal_common::pipeline::PushNotifier;

/// Fixed heading shown above every notification body.
pub const NOTIFICATION_TITLE: &str = "New Data Alert";

/// Segment that addresses every subscriber of the app.
const ALL_SUBSCRIBERS_SEGMENT: &str = "All";

/// Localized text keyed by language code; only English is sent.
#[derive(Debug, Serialize)]
struct LocalizedText<'a> {
    en: &'a str,
}

/// Request body for `POST /api/v1/notifications`.
#[derive(Debug, Serialize)]
struct CreateNotification<'a> {
    app_id: &'a str,
    included_segments: [&'a str; 1],
    headings: LocalizedText<'a>,
    contents: LocalizedText<'a>,
}

pub struct OneSignalNotifier {
    client: reqwest::Client,
    config: OneSignalConfig,
}

impl OneSignalNotifier {
    pub fn new(config: OneSignalConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: OneSignalConfig) -> Self {
        Self { client, config }
    }

    /// Send `message` to all subscribers.
    pub async fn deliver(&self, message: &str) -> Result<(), DeliveryError> {
        let payload = CreateNotification {
            app_id: &self.config.app_id,
            included_segments: [ALL_SUBSCRIBERS_SEGMENT],
            headings: LocalizedText {
                en: NOTIFICATION_TITLE,
            },
            contents: LocalizedText { en: message },
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .header(AUTHORIZATION, format!("Basic {}", self.config.api_key))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status != StatusCode::OK {
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let notification_id = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("id").and_then(|id| id.as_str()).map(str::to_owned));

        tracing::debug!(
            notification_id = notification_id.as_deref().unwrap_or(""),
            body = message,
            "Notification sent"
        );
        Ok(())
    }
}

#[async_trait]
impl PushNotifier for OneSignalNotifier {
    async fn send(&self, message: &str) -> Result<(), WatchError> {
        self.deliver(message).await.map_err(WatchError::from)
    }
}
