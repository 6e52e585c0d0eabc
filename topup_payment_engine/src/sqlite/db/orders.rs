use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{DedupKey, NewOrder, Order},
    traits::PaymentGatewayError,
};

/// Inserts a new order using the given connection. This is not atomic on its own. Embed the call inside a
/// transaction and pass `&mut *tx` as the connection argument to make it part of the reconciliation commit.
///
/// The de-duplication key lands in either `transaction_id` or `utr`; each column carries a partial UNIQUE index, so
/// a racing duplicate delivery fails here with a unique violation and the whole transaction rolls back.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, PaymentGatewayError> {
    let (transaction_id, utr) = match &order.dedup {
        DedupKey::TransactionId(txn) => (Some(txn.as_str()), None),
        DedupKey::Utr(utr) => (None, Some(utr.as_str())),
    };
    let inserted = sqlx::query_as::<_, Order>(
        r#"
            INSERT INTO orders (
                user_id,
                gaming_id,
                product_id,
                product_name,
                product_price,
                product_image_url,
                payment_method,
                status,
                transaction_id,
                utr,
                referral_code,
                coins_used,
                final_price,
                is_coin_product,
                coins_at_time_of_purchase
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *;
        "#,
    )
    .bind(order.user_id)
    .bind(&order.gaming_id)
    .bind(&order.product_id)
    .bind(&order.product_name)
    .bind(order.product_price)
    .bind(&order.product_image_url)
    .bind(order.payment_method)
    .bind(order.status)
    .bind(transaction_id)
    .bind(utr)
    .bind(&order.referral_code)
    .bind(order.coins_used)
    .bind(order.final_price)
    .bind(order.is_coin_product)
    .bind(order.coins_at_time_of_purchase)
    .fetch_one(conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(err) if err.is_unique_violation() => {
            PaymentGatewayError::OrderAlreadyExists(order.dedup.clone())
        },
        e => e.into(),
    })?;
    debug!("📝️ Order [{}] inserted with id {}", order.dedup, inserted.id);
    Ok(inserted)
}

/// Returns the id of the order already recorded under the given de-duplication key, if any.
pub async fn order_id_for_dedup_key(
    key: &DedupKey,
    conn: &mut SqliteConnection,
) -> Result<Option<i64>, sqlx::Error> {
    let query = match key {
        DedupKey::TransactionId(_) => "SELECT id FROM orders WHERE transaction_id = $1",
        DedupKey::Utr(_) => "SELECT id FROM orders WHERE utr = $1",
    };
    let id = sqlx::query_scalar::<_, i64>(query).bind(key.key()).fetch_optional(conn).await?;
    Ok(id)
}

pub async fn fetch_order_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(order)
}
