//! The high-level reconciliation flow.
//!
//! [`ReconciliationApi`] sits between the webhook handlers and the storage backend. It owns the idempotency
//! pre-check, delegates the atomic commit to the backend, and publishes the post-commit event that triggers
//! best-effort side effects.
use log::*;

use crate::{
    db_types::{PaymentEvent, ReconciledOrder},
    events::{EventProducers, OrderReconciledEvent},
    traits::{PaymentGatewayDatabase, PaymentGatewayError},
};

pub struct ReconciliationApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B: std::fmt::Debug> std::fmt::Debug for ReconciliationApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReconciliationApi ({:?})", self.db)
    }
}

impl<B> ReconciliationApi<B>
where B: PaymentGatewayDatabase
{
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut B {
        &mut self.db
    }

    /// Reconciles a verified payment event against the store.
    ///
    /// The flow is:
    /// 1. Idempotency guard. If an order already exists under the event's de-duplication key, return
    ///    [`PaymentGatewayError::OrderAlreadyExists`] without touching anything.
    /// 2. Atomic commit via [`PaymentGatewayDatabase::reconcile_payment`]. The UNIQUE index on the de-duplication
    ///    column backstops the guard, so a racing duplicate also lands on `OrderAlreadyExists`.
    /// 3. Publish [`OrderReconciledEvent`] to the registered hooks. Publication is fire-and-forget; a full channel
    ///    or a panicking handler can delay side effects but never un-commit the order.
    pub async fn process_event(&self, event: &PaymentEvent) -> Result<ReconciledOrder, PaymentGatewayError> {
        debug!("🔄️ Processing {} payment event [{}]", event.provider(), event.dedup);
        if let Some(order_id) = self.db.order_id_for_dedup_key(&event.dedup).await? {
            info!("🔄️ Event [{}] was already reconciled as order #{order_id}. Ignoring redelivery.", event.dedup);
            return Err(PaymentGatewayError::OrderAlreadyExists(event.dedup.clone()));
        }
        let reconciled = self.db.reconcile_payment(event).await?;
        info!(
            "🔄️ Order #{} created for {} ({}), status {}, final price {}",
            reconciled.order.id,
            reconciled.order.gaming_id,
            reconciled.order.product_name,
            reconciled.order.status,
            reconciled.order.final_price
        );
        self.publish_order_reconciled(reconciled.clone()).await;
        Ok(reconciled)
    }

    async fn publish_order_reconciled(&self, reconciled: ReconciledOrder) {
        let event = OrderReconciledEvent::from(reconciled);
        for producer in &self.producers.order_reconciled_producers {
            trace!("🔄️ Publishing OrderReconciled event for order #{}", event.order.id);
            producer.publish_event(event.clone()).await;
        }
    }
}
