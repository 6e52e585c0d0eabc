//! Post-commit side effects.
//!
//! Registered once at startup as an [`EventHooks`] hook; the engine publishes one
//! [`OrderReconciledEvent`](topup_payment_engine::events::OrderReconciledEvent) per committed order. Each effect
//! runs independently: a failure is logged at warn level and never prevents the others, and nothing here can touch
//! the webhook response or the committed transaction.
use log::*;
use topup_payment_engine::{db_types::Order, events::EventHooks, PaymentGatewayDatabase, SqliteDatabase};

use crate::integrations::{CacheInvalidator, PushSender};

pub fn reconciliation_hooks(db: SqliteDatabase, push: PushSender, invalidator: CacheInvalidator) -> EventHooks {
    let mut hooks = EventHooks::default();
    hooks.on_order_reconciled(move |event| {
        let db = db.clone();
        let push = push.clone();
        let invalidator = invalidator.clone();
        Box::pin(async move {
            let order = &event.order;
            if !order.is_coin_product {
                if let Err(e) = db.promote_gaming_id(&order.gaming_id).await {
                    warn!("🪝️ Could not promote gaming id [{}]. {e}", order.gaming_id);
                }
            }
            if let Some(token) = event.fcm_token.as_deref() {
                let (title, body) = push_notification_content(order);
                if let Err(e) = push.send(token, &title, &body, order.product_image_url.as_deref()).await {
                    warn!("🪝️ Could not send push notification for order #{}. {e}", order.id);
                }
            }
            if let Err(e) = invalidator.signal().await {
                warn!("🪝️ Could not signal cache invalidation for order #{}. {e}", order.id);
            }
        })
    });
    hooks
}

fn push_notification_content(order: &Order) -> (String, String) {
    if order.is_coin_product {
        (
            "Top-up Store: Purchase Successful!".to_string(),
            format!("Your purchase of {} for {} was successful!", order.product_name, order.final_price),
        )
    } else {
        (
            "Top-up Store: Payment Received".to_string(),
            format!(
                "Your payment of {} for \"{}\" has been confirmed. Currently, it's under processing.",
                order.final_price, order.product_name
            ),
        )
    }
}

#[cfg(test)]
mod test {
    use chrono::Utc;
    use gts_common::Rupees;
    use topup_payment_engine::db_types::{Order, OrderStatusType, PaymentMethod};

    use super::push_notification_content;

    fn order(is_coin_product: bool) -> Order {
        Order {
            id: 1,
            user_id: 1,
            gaming_id: "GID123".to_string(),
            product_id: "60f1abc".to_string(),
            product_name: "1000 Diamonds".to_string(),
            product_price: Rupees::from_rupees(499),
            product_image_url: None,
            payment_method: PaymentMethod::Upi,
            status: if is_coin_product { OrderStatusType::Completed } else { OrderStatusType::Processing },
            transaction_id: None,
            utr: Some("pay_1".to_string()),
            referral_code: None,
            coins_used: 0,
            final_price: Rupees::from_rupees(499),
            is_coin_product,
            coins_at_time_of_purchase: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn coin_purchases_announce_success() {
        let (title, body) = push_notification_content(&order(true));
        assert_eq!(title, "Top-up Store: Purchase Successful!");
        assert_eq!(body, "Your purchase of 1000 Diamonds for ₹499 was successful!");
    }

    #[test]
    fn item_purchases_announce_processing() {
        let (title, body) = push_notification_content(&order(false));
        assert_eq!(title, "Top-up Store: Payment Received");
        assert_eq!(body, "Your payment of ₹499 for \"1000 Diamonds\" has been confirmed. Currently, it's under processing.");
    }
}
