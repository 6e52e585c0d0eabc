use std::{sync::Arc, time::Duration};

use gts_common::Rupees;
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde::Deserialize;
use thiserror::Error;
use topup_payment_engine::db_types::TxnRef;

use crate::{config::PhonePeConfig, webhooks::sign_phonepe};

const PAY_API_PATH: &str = "/pg/v1/pay";

#[derive(Debug, Error)]
pub enum PhonePeApiError {
    #[error("Could not initialize the PhonePe API client. {0}")]
    Initialization(String),
    #[error("The PhonePe credentials are not configured.")]
    NotConfigured,
    #[error("The pay request failed. {0}")]
    RequestError(String),
    #[error("PhonePe rejected the pay request ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("Could not interpret the PhonePe response. {0}")]
    JsonError(String),
}

#[derive(Clone)]
pub struct PhonePeApi {
    config: PhonePeConfig,
    client: Arc<Client>,
}

#[derive(Debug, Deserialize)]
struct PayResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<PayResponseData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayResponseData {
    instrument_response: InstrumentResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstrumentResponse {
    redirect_info: RedirectInfo,
}

#[derive(Debug, Deserialize)]
struct RedirectInfo {
    url: String,
}

impl PhonePeApi {
    pub fn new(config: PhonePeConfig) -> Result<Self, PhonePeApiError> {
        let mut headers = HeaderMap::with_capacity(3);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert("accept", HeaderValue::from_static("application/json"));
        let client_id = HeaderValue::from_str(&config.client_id)
            .map_err(|e| PhonePeApiError::Initialization(e.to_string()))?;
        headers.insert("X-CLIENT-ID", client_id);
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| PhonePeApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn is_configured(&self) -> bool {
        !self.config.merchant_id.is_empty() && !self.config.client_secret.reveal().is_empty()
    }

    /// Initiates a pay-page order with PhonePe and returns the URL the buyer must be redirected to.
    ///
    /// The pay payload is base64-encoded and signed with `hex(HMAC-SHA256(secret, base64 + path + secret)) + "###1"`
    /// in the `X-VERIFY` header. The merchant transaction reference is the same token the webhook decoder parses
    /// when the payment settles.
    pub async fn create_pay_page_order(
        &self,
        txn_ref: &TxnRef,
        merchant_user_id: i64,
        amount: Rupees,
    ) -> Result<String, PhonePeApiError> {
        if !self.is_configured() {
            return Err(PhonePeApiError::NotConfigured);
        }
        let payload = serde_json::json!({
            "merchantId": self.config.merchant_id,
            "merchantTransactionId": txn_ref.to_string(),
            "merchantUserId": merchant_user_id.to_string(),
            "amount": amount.value(),
            "redirectUrl": format!("{}/order", self.config.base_url),
            "redirectMode": "REDIRECT",
            "callbackUrl": format!("{}/webhooks/phonepe", self.config.base_url),
            "paymentInstrument": { "type": "PAY_PAGE" },
        });
        let encoded = base64::encode(payload.to_string());
        let secret = self.config.client_secret.reveal();
        let checksum = sign_phonepe(secret, format!("{encoded}{PAY_API_PATH}{secret}").as_bytes());
        let url = format!("{}{PAY_API_PATH}", self.config.host_url);
        trace!("📱️ Sending pay request for {txn_ref} to {url}");
        let response = self
            .client
            .post(url)
            .header("X-VERIFY", checksum)
            .header("X-MERCHANT-ID", &self.config.merchant_id)
            .json(&serde_json::json!({ "request": encoded }))
            .send()
            .await
            .map_err(|e| PhonePeApiError::RequestError(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| PhonePeApiError::RequestError(e.to_string()))?;
            return Err(PhonePeApiError::ApiError { status, message });
        }
        let result = response.json::<PayResponse>().await.map_err(|e| PhonePeApiError::JsonError(e.to_string()))?;
        if !result.success {
            let message = result.message.unwrap_or_else(|| "Failed to create payment link.".to_string());
            return Err(PhonePeApiError::ApiError { status: 200, message });
        }
        let redirect_url = result
            .data
            .ok_or_else(|| PhonePeApiError::JsonError("Response is missing the data field".to_string()))?
            .instrument_response
            .redirect_info
            .url;
        debug!("📱️ Pay page created for {txn_ref}");
        Ok(redirect_url)
    }
}
