use sqlx::SqliteConnection;

use crate::db_types::Product;

pub async fn product_by_id(product_id: &str, conn: &mut SqliteConnection) -> Result<Option<Product>, sqlx::Error> {
    let product = sqlx::query_as::<_, Product>(
        r#"SELECT id, name, price, image_url, coins_applicable, is_coin_product, quantity, purchase_price,
           is_available FROM products WHERE id = $1"#,
    )
    .bind(product_id)
    .fetch_optional(conn)
    .await?;
    Ok(product)
}
