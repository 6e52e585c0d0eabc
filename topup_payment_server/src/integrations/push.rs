use std::{sync::Arc, time::Duration};

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use thiserror::Error;

use crate::config::PushConfig;

#[derive(Debug, Error)]
pub enum PushSenderError {
    #[error("Could not initialize the push client. {0}")]
    Initialization(String),
    #[error("The push request failed. {0}")]
    RequestError(String),
    #[error("The push endpoint rejected the notification ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Sends buyer-facing push notifications through an FCM-style HTTP endpoint. Delivery is best effort; the
/// notification record in the database is the durable copy.
#[derive(Clone)]
pub struct PushSender {
    endpoint: String,
    enabled: bool,
    client: Arc<Client>,
}

impl PushSender {
    pub fn new(config: PushConfig) -> Result<Self, PushSenderError> {
        let enabled = config.is_enabled();
        let mut headers = HeaderMap::with_capacity(2);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        if enabled {
            let mut auth = HeaderValue::from_str(&format!("key={}", config.server_key.reveal()))
                .map_err(|e| PushSenderError::Initialization(e.to_string()))?;
            auth.set_sensitive(true);
            headers.insert("Authorization", auth);
        }
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| PushSenderError::Initialization(e.to_string()))?;
        Ok(Self { endpoint: config.endpoint, enabled, client: Arc::new(client) })
    }

    pub async fn send(
        &self,
        token: &str,
        title: &str,
        body: &str,
        image_url: Option<&str>,
    ) -> Result<(), PushSenderError> {
        if !self.enabled {
            trace!("📢️ Push notifications are disabled. Dropping notification.");
            return Ok(());
        }
        let mut notification = serde_json::json!({ "title": title, "body": body });
        if let Some(image) = image_url {
            notification["image"] = serde_json::Value::String(image.to_string());
        }
        let payload = serde_json::json!({ "to": token, "notification": notification });
        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PushSenderError::RequestError(e.to_string()))?;
        if response.status().is_success() {
            debug!("📢️ Push notification sent");
            Ok(())
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| PushSenderError::RequestError(e.to_string()))?;
            Err(PushSenderError::Rejected { status, message })
        }
    }
}
