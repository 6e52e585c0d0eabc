use log::*;
use serde::Deserialize;
use topup_payment_engine::db_types::{DedupKey, PaymentEvent};

use super::verify::DecodeError;

const PAYMENT_CAPTURED: &str = "payment.captured";

#[derive(Debug, Deserialize)]
struct Webhook {
    event: String,
    #[serde(default)]
    payload: Option<WebhookPayload>,
}

#[derive(Debug, Deserialize)]
struct WebhookPayload {
    payment: PaymentWrapper,
}

#[derive(Debug, Deserialize)]
struct PaymentWrapper {
    entity: PaymentEntity,
}

#[derive(Debug, Deserialize)]
struct PaymentEntity {
    /// The Razorpay payment id; stored in the order's `utr` column as the de-duplication key.
    id: String,
    #[serde(default)]
    notes: Notes,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Notes {
    #[serde(default)]
    product_id: Option<String>,
    #[serde(default)]
    gaming_id: Option<String>,
}

/// Decodes a Razorpay webhook body into a normalized payment event.
///
/// Only `payment.captured` events are actionable; everything else is acknowledged as a no-op. The gaming id and
/// product id travel in the payment's `notes`, set by the storefront when the Razorpay order was created. Razorpay
/// reports no settled amount we trust for pricing, so `settled_amount` is `None` and the final price is computed
/// from the product record.
pub fn decode_razorpay_webhook(body: &[u8]) -> Result<Option<PaymentEvent>, DecodeError> {
    let webhook: Webhook = serde_json::from_slice(body).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
    if webhook.event != PAYMENT_CAPTURED {
        info!("💳️ Ignoring Razorpay webhook for event {}", webhook.event);
        return Ok(None);
    }
    let payload = webhook.payload.ok_or_else(|| DecodeError::MissingField("payload".to_string()))?;
    let entity = payload.payment.entity;
    let product_id = entity.notes.product_id.ok_or_else(|| DecodeError::MissingField("notes.productId".to_string()))?;
    let gaming_id = entity.notes.gaming_id.ok_or_else(|| DecodeError::MissingField("notes.gamingId".to_string()))?;
    let event = PaymentEvent {
        dedup: DedupKey::Utr(entity.id),
        gaming_id,
        product_id,
        settled_amount: None,
    };
    Ok(Some(event))
}
