use log::debug;
use sqlx::SqliteConnection;

use crate::{db_types::User, traits::PaymentGatewayError};

pub async fn user_by_gaming_id(gaming_id: &str, conn: &mut SqliteConnection) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, gaming_id, coins, referred_by_code, fcm_token, is_redeem_disabled FROM users WHERE gaming_id = $1",
    )
    .bind(gaming_id)
    .fetch_optional(conn)
    .await?;
    Ok(user)
}

/// Applies a coin delta to the user's balance. Positive for coin-product grants, negative for redemptions. The CHECK
/// constraint on the `coins` column rejects any delta that would drive the balance negative, aborting the enclosing
/// transaction.
pub async fn adjust_coins(user_id: i64, delta: i64, conn: &mut SqliteConnection) -> Result<(), PaymentGatewayError> {
    let result =
        sqlx::query("UPDATE users SET coins = coins + $1 WHERE id = $2").bind(delta).bind(user_id).execute(conn).await?;
    if result.rows_affected() == 0 {
        return Err(PaymentGatewayError::DatabaseError(format!("Coin adjustment matched no user with id {user_id}")));
    }
    debug!("🪙️ Adjusted coin balance of user #{user_id} by {delta}");
    Ok(())
}
