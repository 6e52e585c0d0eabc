//! Backend contracts for the payment engine.
//!
//! [`PaymentGatewayDatabase`] defines everything a storage backend must expose to support the reconciliation flow:
//! the idempotency lookup, the atomic reconciliation commit, the read-only lookups used by the checkout
//! collaborator, and the non-transactional housekeeping writes used by the side-effect dispatcher.
mod payment_gateway_database;

pub use payment_gateway_database::{PaymentGatewayDatabase, PaymentGatewayError};
