//! `SqliteDatabase` is a concrete implementation of the reconciliation engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements the [`PaymentGatewayDatabase`] trait defined in the
//! [`crate::traits`] module.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::db::{db_url, legacy_users, new_pool, notifications, orders, products, promoted_ids, users};
use crate::{
    db_types::{
        DedupKey,
        NewNotification,
        NewOrder,
        Order,
        OrderStatusType,
        PaymentEvent,
        PaymentMethod,
        Product,
        ReconciledOrder,
        User,
    },
    helpers::{coins_used, final_price, notification_message, referral_reward, terminal_status},
    traits::{PaymentGatewayDatabase, PaymentGatewayError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object with a connection to the database at `GTS_DATABASE_URL`.
    pub async fn new(max_connections: u32) -> Result<Self, PaymentGatewayError> {
        let url = db_url();
        Self::new_with_url(&url, max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, PaymentGatewayError> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl PaymentGatewayDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn fetch_product(&self, product_id: &str) -> Result<Option<Product>, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let product = products::product_by_id(product_id, &mut conn).await?;
        Ok(product)
    }

    async fn fetch_user_by_gaming_id(&self, gaming_id: &str) -> Result<Option<User>, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let user = users::user_by_gaming_id(gaming_id, &mut conn).await?;
        Ok(user)
    }

    async fn order_id_for_dedup_key(&self, key: &DedupKey) -> Result<Option<i64>, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let id = orders::order_id_for_dedup_key(key, &mut conn).await?;
        Ok(id)
    }

    /// Takes a verified payment event, and in a single atomic transaction,
    /// * loads the product and user the event refers to,
    /// * computes the coin redemption and final price from the balance read in this transaction,
    /// * inserts the order under the event's de-duplication key,
    /// * grants coins (coin products) or debits the redeemed coins,
    /// * credits the referrer's wallet when the order completes for a referred buyer,
    /// * records the user-facing notification.
    ///
    /// Any failure, including a duplicate de-duplication key that slipped past the advisory guard, rolls the whole
    /// transaction back.
    async fn reconcile_payment(&self, event: &PaymentEvent) -> Result<ReconciledOrder, PaymentGatewayError> {
        let mut tx = self.pool.begin().await?;
        let product = products::product_by_id(&event.product_id, &mut tx)
            .await?
            .ok_or_else(|| PaymentGatewayError::ProductNotFound(event.product_id.clone()))?;
        let user = users::user_by_gaming_id(&event.gaming_id, &mut tx)
            .await?
            .ok_or_else(|| PaymentGatewayError::UserNotFound(event.gaming_id.clone()))?;
        let coins_used = coins_used(&product, user.coins);
        let final_price = final_price(event.settled_amount, &product, coins_used);
        let status = terminal_status(&product);
        let new_order = NewOrder {
            user_id: user.id,
            gaming_id: user.gaming_id.clone(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            product_price: product.price,
            product_image_url: product.image_url.clone(),
            payment_method: PaymentMethod::Upi,
            status,
            dedup: event.dedup.clone(),
            referral_code: user.referred_by_code.clone(),
            coins_used,
            final_price,
            is_coin_product: product.is_coin_product,
            coins_at_time_of_purchase: user.coins,
        };
        let order = orders::insert_order(new_order, &mut tx).await?;
        if product.is_coin_product {
            users::adjust_coins(user.id, product.quantity, &mut tx).await?;
        } else if coins_used > 0 {
            users::adjust_coins(user.id, -coins_used, &mut tx).await?;
        }
        if order.status == OrderStatusType::Completed {
            if let Some(code) = &user.referred_by_code {
                legacy_users::credit_wallet(code, referral_reward(final_price), &mut tx).await?;
            }
        }
        let message = notification_message(&product.name, final_price, product.is_coin_product);
        notifications::insert_notification(
            NewNotification { gaming_id: user.gaming_id.clone(), message, image_url: product.image_url.clone() },
            &mut tx,
        )
        .await?;
        tx.commit().await?;
        debug!("🗃️ Order #{} committed for event [{}]", order.id, event.dedup);
        Ok(ReconciledOrder { order, fcm_token: user.fcm_token })
    }

    async fn fetch_order_by_id(&self, id: i64) -> Result<Option<Order>, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_id(id, &mut conn).await?;
        Ok(order)
    }

    async fn promote_gaming_id(&self, gaming_id: &str) -> Result<(), PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        promoted_ids::promote(gaming_id, &mut conn).await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), PaymentGatewayError> {
        self.pool.close().await;
        Ok(())
    }
}
