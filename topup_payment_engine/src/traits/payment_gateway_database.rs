use thiserror::Error;

use crate::db_types::{DedupKey, Order, PaymentEvent, Product, ReconciledOrder, User};

/// The storage contract for the reconciliation core.
///
/// Backends must provide:
/// * the idempotency lookup keyed on the provider de-duplication reference,
/// * the atomic reconciliation commit (order insert + coin mutation + referral reward + notification, all or
///   nothing),
/// * read-only product/user lookups for the order-initiation collaborator,
/// * the non-transactional gaming-id promotion used by the side-effect dispatcher.
#[allow(async_fn_in_trait)]
pub trait PaymentGatewayDatabase: Clone {
    /// The URL of the database.
    fn url(&self) -> &str;

    /// Fetches the product with the given catalogue id, or `None` if it does not exist.
    async fn fetch_product(&self, product_id: &str) -> Result<Option<Product>, PaymentGatewayError>;

    /// Fetches the user with the given gaming id, or `None` if it does not exist.
    async fn fetch_user_by_gaming_id(&self, gaming_id: &str) -> Result<Option<User>, PaymentGatewayError>;

    /// The idempotency guard: returns the id of the order already created under the given de-duplication key, if
    /// any. Providers redeliver webhooks, so a hit here means the event was fully processed before and must be
    /// acknowledged without side effects.
    ///
    /// This pre-check is advisory; the UNIQUE index on the de-duplication column is what makes racing duplicate
    /// deliveries safe (the loser's transaction aborts inside [`Self::reconcile_payment`]).
    async fn order_id_for_dedup_key(&self, key: &DedupKey) -> Result<Option<i64>, PaymentGatewayError>;

    /// Applies the financial side effects of a verified, decoded payment event in ONE atomic transaction:
    /// * loads the product and user (missing either ⇒ error, nothing written),
    /// * computes the coin redemption, final price and terminal status from the balance read in this transaction,
    /// * inserts the order (unique de-duplication key),
    /// * credits the coin grant or debits the redeemed coins,
    /// * credits the referral reward when the order completes for a referred buyer,
    /// * inserts the user-facing notification record.
    ///
    /// Any failure rolls the whole transaction back; the event stays unprocessed and is safe to redeliver.
    async fn reconcile_payment(&self, event: &PaymentEvent) -> Result<ReconciledOrder, PaymentGatewayError>;

    /// Fetches an order by its internal id.
    async fn fetch_order_by_id(&self, id: i64) -> Result<Option<Order>, PaymentGatewayError>;

    /// Housekeeping performed by the side-effect dispatcher after non-coin purchases: records the gaming id in the
    /// promoted-identifiers table. Runs outside any transaction and is idempotent.
    async fn promote_gaming_id(&self, gaming_id: &str) -> Result<(), PaymentGatewayError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), PaymentGatewayError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Error)]
pub enum PaymentGatewayError {
    #[error("Internal database error: {0}")]
    DatabaseError(String),
    #[error("An order has already been processed for payment reference [{0}]")]
    OrderAlreadyExists(DedupKey),
    #[error("Product {0} does not exist")]
    ProductNotFound(String),
    #[error("No user found with gaming id {0}")]
    UserNotFound(String),
}

impl From<sqlx::Error> for PaymentGatewayError {
    fn from(e: sqlx::Error) -> Self {
        PaymentGatewayError::DatabaseError(e.to_string())
    }
}
