use std::{sync::Arc, time::Duration};

use log::*;
use reqwest::Client;
use thiserror::Error;

use crate::config::RevalidateConfig;

#[derive(Debug, Error)]
pub enum CacheInvalidatorError {
    #[error("Could not initialize the cache invalidation client. {0}")]
    Initialization(String),
    #[error("The cache invalidation request failed. {0}")]
    RequestError(String),
    #[error("The revalidation endpoint returned {0}")]
    Rejected(u16),
}

/// Tells the storefront to refresh its cached pages after an order lands. The storefront renders order history and
/// coin balances from the same database, so a missed signal only delays the refresh.
#[derive(Clone)]
pub struct CacheInvalidator {
    endpoint: Option<String>,
    paths: Vec<String>,
    client: Arc<Client>,
}

impl CacheInvalidator {
    pub fn new(config: RevalidateConfig) -> Result<Self, CacheInvalidatorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| CacheInvalidatorError::Initialization(e.to_string()))?;
        Ok(Self { endpoint: config.endpoint, paths: config.paths, client: Arc::new(client) })
    }

    pub async fn signal(&self) -> Result<(), CacheInvalidatorError> {
        let endpoint = match &self.endpoint {
            Some(e) => e,
            None => {
                trace!("🔄️ No revalidation endpoint configured. Skipping cache invalidation.");
                return Ok(());
            },
        };
        let response = self
            .client
            .post(endpoint)
            .json(&serde_json::json!({ "paths": self.paths }))
            .send()
            .await
            .map_err(|e| CacheInvalidatorError::RequestError(e.to_string()))?;
        if response.status().is_success() {
            debug!("🔄️ Cache invalidation signal sent for {} paths", self.paths.len());
            Ok(())
        } else {
            Err(CacheInvalidatorError::Rejected(response.status().as_u16()))
        }
    }
}
