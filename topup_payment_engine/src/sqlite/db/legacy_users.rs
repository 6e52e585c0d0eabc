use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::LegacyUser;
use gts_common::Rupees;

pub async fn legacy_user_by_referral_code(
    code: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<LegacyUser>, sqlx::Error> {
    let user = sqlx::query_as::<_, LegacyUser>(
        "SELECT id, referral_code, wallet_balance FROM legacy_users WHERE referral_code = $1",
    )
    .bind(code)
    .fetch_optional(conn)
    .await?;
    Ok(user)
}

/// Credits the referral wallet of the given referral code. A code that matches no referrer is a no-op; referral
/// codes are free-form user input at signup and a dangling one must not fail the purchase.
pub async fn credit_wallet(code: &str, amount: Rupees, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    let result = sqlx::query("UPDATE legacy_users SET wallet_balance = wallet_balance + $1 WHERE referral_code = $2")
        .bind(amount)
        .bind(code)
        .execute(conn)
        .await?;
    if result.rows_affected() > 0 {
        debug!("💸️ Credited {amount} to referral wallet [{code}]");
    } else {
        debug!("💸️ Referral code [{code}] matched no wallet. Skipping reward.");
    }
    Ok(())
}
