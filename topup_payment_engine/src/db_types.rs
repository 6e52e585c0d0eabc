use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use gts_common::Rupees;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------   OrderStatusType     -------------------------------------------------------
/// The terminal status assigned to an order at creation time. The webhook core never transitions an order after it
/// has been created; fulfilment tooling outside this crate picks up `Processing` orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum OrderStatusType {
    /// The product grants coins and settles immediately.
    Completed,
    /// Payment received; fulfilment of the game item is pending.
    Processing,
    /// A manually submitted UTR is awaiting admin review. Never assigned by the reconciler.
    #[sqlx(rename = "Pending UTR")]
    #[serde(rename = "Pending UTR")]
    PendingUtr,
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Completed => write!(f, "Completed"),
            OrderStatusType::Processing => write!(f, "Processing"),
            OrderStatusType::PendingUtr => write!(f, "Pending UTR"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid order status: {0}")]
pub struct StatusConversionError(String);

impl FromStr for OrderStatusType {
    type Err = StatusConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Completed" => Ok(Self::Completed),
            "Processing" => Ok(Self::Processing),
            "Pending UTR" => Ok(Self::PendingUtr),
            s => Err(StatusConversionError(s.to_string())),
        }
    }
}

//--------------------------------------    PaymentMethod      -------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Settled through a UPI payment provider. Everything the webhook core creates is UPI.
    #[sqlx(rename = "UPI")]
    #[serde(rename = "UPI")]
    Upi,
    /// Paid from the in-store coin wallet (storefront flow, outside this crate).
    Wallet,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Upi => write!(f, "UPI"),
            PaymentMethod::Wallet => write!(f, "Wallet"),
        }
    }
}

//--------------------------------------     ProviderKind      -------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    PhonePe,
    Razorpay,
}

impl Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::PhonePe => write!(f, "PhonePe"),
            ProviderKind::Razorpay => write!(f, "Razorpay"),
        }
    }
}

//--------------------------------------       DedupKey        -------------------------------------------------------
/// The provider-supplied reference that uniquely identifies a settled payment. PhonePe events carry the merchant
/// transaction id; Razorpay events carry the payment id (stored in the order's `utr` column). Each variant maps to
/// its own UNIQUE-indexed column, which is what actually guarantees at-most-once order creation under concurrent
/// redelivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DedupKey {
    TransactionId(String),
    Utr(String),
}

impl DedupKey {
    pub fn key(&self) -> &str {
        match self {
            DedupKey::TransactionId(s) => s.as_str(),
            DedupKey::Utr(s) => s.as_str(),
        }
    }

    pub fn provider(&self) -> ProviderKind {
        match self {
            DedupKey::TransactionId(_) => ProviderKind::PhonePe,
            DedupKey::Utr(_) => ProviderKind::Razorpay,
        }
    }
}

impl Display for DedupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DedupKey::TransactionId(s) => write!(f, "txn:{s}"),
            DedupKey::Utr(s) => write!(f, "utr:{s}"),
        }
    }
}

//--------------------------------------        TxnRef         -------------------------------------------------------
/// The PhonePe merchant transaction reference, encoded as `{millisecond-timestamp}-{gamingId}-{productId}`.
///
/// The checkout endpoint mints these when initiating a payment; the webhook decoder parses them back out of the
/// provider callback. Neither the gaming id nor the product id may contain a hyphen, which the storefront's
/// identifier rules already guarantee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxnRef {
    pub timestamp_ms: i64,
    pub gaming_id: String,
    pub product_id: String,
}

impl TxnRef {
    pub fn new<S1: Into<String>, S2: Into<String>>(gaming_id: S1, product_id: S2) -> Self {
        Self { timestamp_ms: Utc::now().timestamp_millis(), gaming_id: gaming_id.into(), product_id: product_id.into() }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid transaction reference: {0}")]
pub struct TxnRefError(pub String);

impl FromStr for TxnRef {
    type Err = TxnRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split('-').collect::<Vec<_>>();
        if parts.len() != 3 {
            return Err(TxnRefError(format!("expected 3 hyphen-delimited parts, got {}", parts.len())));
        }
        let timestamp_ms =
            parts[0].parse::<i64>().map_err(|e| TxnRefError(format!("timestamp segment is not numeric: {e}")))?;
        if parts[1].is_empty() || parts[2].is_empty() {
            return Err(TxnRefError("gaming id and product id segments must be non-empty".to_string()));
        }
        Ok(Self { timestamp_ms, gaming_id: parts[1].to_string(), product_id: parts[2].to_string() })
    }
}

impl Display for TxnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.timestamp_ms, self.gaming_id, self.product_id)
    }
}

//--------------------------------------      PaymentEvent     -------------------------------------------------------
/// A verified, decoded payment-provider notification, normalized across providers. This is the sole input to the
/// reconciliation flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentEvent {
    /// The provider reference that de-duplicates redeliveries of this event.
    pub dedup: DedupKey,
    pub gaming_id: String,
    pub product_id: String,
    /// The amount actually settled at the gateway, when the provider reports one (PhonePe). When present it is
    /// authoritative for the order's final price; when absent the price is computed from the product record.
    pub settled_amount: Option<Rupees>,
}

impl PaymentEvent {
    pub fn provider(&self) -> ProviderKind {
        self.dedup.provider()
    }
}

//--------------------------------------        Product        -------------------------------------------------------
/// A storefront product. Read-only input to reconciliation; owned by the catalogue subsystem.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Rupees,
    pub image_url: Option<String>,
    /// Maximum number of coins a buyer may redeem against this product.
    pub coins_applicable: Option<i64>,
    /// When true, buying this product grants `quantity` coins instead of consuming them.
    pub is_coin_product: bool,
    pub quantity: i64,
    /// Cost basis used as the final price when the product is a coin grant.
    pub purchase_price: Option<Rupees>,
    pub is_available: bool,
}

//--------------------------------------         User          -------------------------------------------------------
/// A storefront user. The reconciler reads these fields and applies coin deltas; everything else is owned by the
/// account subsystem.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub gaming_id: String,
    pub coins: i64,
    /// Referral code of whoever referred this user. Set once at signup, immutable thereafter.
    pub referred_by_code: Option<String>,
    pub fcm_token: Option<String>,
    pub is_redeem_disabled: bool,
}

//--------------------------------------       LegacyUser      -------------------------------------------------------
/// The referral ledger. Keyed by referral code; the wallet only ever grows via increments.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LegacyUser {
    pub id: i64,
    pub referral_code: String,
    pub wallet_balance: Rupees,
}

//--------------------------------------        NewOrder       -------------------------------------------------------
/// An order about to be inserted. Built inside the reconciliation transaction from the product and user rows read
/// in that same transaction, so the coin arithmetic can never race a concurrent balance change.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i64,
    pub gaming_id: String,
    pub product_id: String,
    pub product_name: String,
    pub product_price: Rupees,
    pub product_image_url: Option<String>,
    pub payment_method: PaymentMethod,
    pub status: OrderStatusType,
    pub dedup: DedupKey,
    pub referral_code: Option<String>,
    pub coins_used: i64,
    pub final_price: Rupees,
    pub is_coin_product: bool,
    /// Audit snapshot of the buyer's balance before this order was applied.
    pub coins_at_time_of_purchase: i64,
}

//--------------------------------------         Order         -------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub gaming_id: String,
    pub product_id: String,
    pub product_name: String,
    pub product_price: Rupees,
    pub product_image_url: Option<String>,
    pub payment_method: PaymentMethod,
    pub status: OrderStatusType,
    pub transaction_id: Option<String>,
    pub utr: Option<String>,
    pub referral_code: Option<String>,
    pub coins_used: i64,
    pub final_price: Rupees,
    pub is_coin_product: bool,
    pub coins_at_time_of_purchase: i64,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// The provider de-duplication key this order was created under.
    pub fn dedup_key(&self) -> Option<DedupKey> {
        match (&self.transaction_id, &self.utr) {
            (Some(txn), _) => Some(DedupKey::TransactionId(txn.clone())),
            (None, Some(utr)) => Some(DedupKey::Utr(utr.clone())),
            (None, None) => None,
        }
    }
}

//--------------------------------------     Notification      -------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub gaming_id: String,
    pub message: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub gaming_id: String,
    pub message: String,
    pub image_url: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------    ReconciledOrder    -------------------------------------------------------
/// The result of a successful atomic reconciliation: the order as inserted, plus the bits of user state the
/// side-effect dispatcher needs after the transaction has committed.
#[derive(Debug, Clone)]
pub struct ReconciledOrder {
    pub order: Order,
    /// Push-notification token of the buyer, if they registered one.
    pub fcm_token: Option<String>,
}
