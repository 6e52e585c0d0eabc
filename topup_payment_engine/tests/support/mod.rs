pub mod prepare_env;

use gts_common::Rupees;
use topup_payment_engine::{db_types::Product, sqlite::db::legacy_users, SqliteDatabase};

pub async fn seed_product(db: &SqliteDatabase, product: &Product) {
    sqlx::query(
        r#"INSERT INTO products (id, name, price, image_url, coins_applicable, is_coin_product, quantity,
           purchase_price, is_available) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"#,
    )
    .bind(&product.id)
    .bind(&product.name)
    .bind(product.price)
    .bind(&product.image_url)
    .bind(product.coins_applicable)
    .bind(product.is_coin_product)
    .bind(product.quantity)
    .bind(product.purchase_price)
    .bind(product.is_available)
    .execute(db.pool())
    .await
    .expect("Error seeding product");
}

pub async fn seed_user(db: &SqliteDatabase, gaming_id: &str, coins: i64, referred_by_code: Option<&str>) {
    sqlx::query("INSERT INTO users (gaming_id, coins, referred_by_code, fcm_token) VALUES ($1, $2, $3, $4)")
        .bind(gaming_id)
        .bind(coins)
        .bind(referred_by_code)
        .bind(Some("fcm-token-1"))
        .execute(db.pool())
        .await
        .expect("Error seeding user");
}

pub async fn seed_legacy_user(db: &SqliteDatabase, referral_code: &str, wallet_balance: Rupees) {
    sqlx::query("INSERT INTO legacy_users (referral_code, wallet_balance) VALUES ($1, $2)")
        .bind(referral_code)
        .bind(wallet_balance)
        .execute(db.pool())
        .await
        .expect("Error seeding legacy user");
}

pub async fn user_coins(db: &SqliteDatabase, gaming_id: &str) -> i64 {
    sqlx::query_scalar("SELECT coins FROM users WHERE gaming_id = $1")
        .bind(gaming_id)
        .fetch_one(db.pool())
        .await
        .expect("Error fetching coin balance")
}

pub async fn wallet_balance(db: &SqliteDatabase, referral_code: &str) -> Rupees {
    let mut conn = db.pool().acquire().await.expect("Error acquiring connection");
    legacy_users::legacy_user_by_referral_code(referral_code, &mut conn)
        .await
        .expect("Error fetching referrer")
        .expect("No referrer with that code")
        .wallet_balance
}

pub async fn notification_count(db: &SqliteDatabase, gaming_id: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE gaming_id = $1")
        .bind(gaming_id)
        .fetch_one(db.pool())
        .await
        .expect("Error counting notifications")
}

pub async fn order_count(db: &SqliteDatabase) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders").fetch_one(db.pool()).await.expect("Error counting orders")
}
