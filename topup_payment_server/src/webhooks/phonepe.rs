use std::str::FromStr;

use gts_common::Rupees;
use log::*;
use serde::Deserialize;
use topup_payment_engine::db_types::{DedupKey, PaymentEvent, TxnRef};

use super::verify::DecodeError;

const PAYMENT_SUCCESS: &str = "PAYMENT_SUCCESS";

/// The outer webhook body. The actual callback is a base64-encoded JSON document in `response`.
#[derive(Debug, Deserialize)]
struct CallbackEnvelope {
    response: String,
}

#[derive(Debug, Deserialize)]
struct Callback {
    code: String,
    #[serde(default)]
    data: Option<CallbackData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallbackData {
    merchant_transaction_id: String,
    /// Settled amount in paise.
    amount: i64,
}

/// Decodes a PhonePe callback body into a normalized payment event.
///
/// Returns `Ok(None)` for callbacks that are well-formed but not actionable (any code other than
/// `PAYMENT_SUCCESS`); those are acknowledged so the provider stops redelivering them. The merchant transaction
/// reference carries the gaming id and product id minted at checkout (see
/// [`TxnRef`]).
pub fn decode_phonepe_callback(body: &[u8]) -> Result<Option<PaymentEvent>, DecodeError> {
    let envelope: CallbackEnvelope =
        serde_json::from_slice(body).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
    let inner = base64::decode(&envelope.response).map_err(|e| DecodeError::InvalidBase64(e.to_string()))?;
    let callback: Callback = serde_json::from_slice(&inner).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
    if callback.code != PAYMENT_SUCCESS {
        info!("📱️ Ignoring PhonePe callback with code {}", callback.code);
        return Ok(None);
    }
    let data = callback.data.ok_or_else(|| DecodeError::MissingField("data".to_string()))?;
    let txn_ref = TxnRef::from_str(&data.merchant_transaction_id)
        .map_err(|e| DecodeError::InvalidTransactionReference(e.to_string()))?;
    let event = PaymentEvent {
        dedup: DedupKey::TransactionId(data.merchant_transaction_id),
        gaming_id: txn_ref.gaming_id,
        product_id: txn_ref.product_id,
        settled_amount: Some(Rupees::from_paise(data.amount)),
    };
    Ok(Some(event))
}
