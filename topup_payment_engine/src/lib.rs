//! Top-up Payment Engine
//!
//! The reconciliation core of the gaming top-up storefront. Payment providers confirm settled payments
//! asynchronously via webhooks; this library takes the normalized [`db_types::PaymentEvent`] produced by the
//! server layer and applies the financial side effects (order creation, coin debits/credits, referral rewards and
//! the user-facing notification record) exactly once, inside a single database transaction.
//!
//! The library is split into:
//! 1. Database types and backend contracts ([`db_types`], [`traits`]). SQLite is the supported backend
//!    ([`SqliteDatabase`]); the reconciliation flow only talks to the [`traits::PaymentGatewayDatabase`] trait, so
//!    other backends can be slotted in.
//! 2. The reconciliation API ([`ReconciliationApi`]), which runs the idempotency guard and the atomic commit, and
//!    emits an [`events::OrderReconciledEvent`] after the transaction lands. Best-effort side effects (push
//!    notifications, cache invalidation, gaming-id promotion) subscribe to these events via the hook system in
//!    [`events`] and can never roll back or fail a committed reconciliation.

pub mod db_types;
pub mod events;
pub mod helpers;
mod reconciliation_api;
pub mod sqlite;
pub mod traits;

pub use reconciliation_api::ReconciliationApi;
pub use sqlite::SqliteDatabase;
pub use traits::{PaymentGatewayDatabase, PaymentGatewayError};
