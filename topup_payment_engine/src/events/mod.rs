//! Stateless pub/sub hooks for post-commit side effects.
//!
//! The server layer registers handlers at startup (push notification, cache invalidation, gaming-id promotion);
//! the reconciliation API publishes an [`OrderReconciledEvent`] after each atomic commit. Handlers run on their own
//! tasks and can never fail a webhook response or roll back a committed transaction.
mod channel;
mod event_types;
mod hooks;

pub use channel::{EventHandler, EventProducer, Handler};
pub use event_types::OrderReconciledEvent;
pub use hooks::{EventHandlers, EventHooks, EventProducers};
