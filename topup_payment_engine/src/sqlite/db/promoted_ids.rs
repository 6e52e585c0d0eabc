use log::trace;
use sqlx::SqliteConnection;

/// Records a gaming id in the promoted-identifiers table. Idempotent; re-promoting an id is a no-op.
pub async fn promote(gaming_id: &str, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO promoted_ids (gaming_id) VALUES ($1) ON CONFLICT (gaming_id) DO NOTHING")
        .bind(gaming_id)
        .execute(conn)
        .await?;
    trace!("🏷️ Gaming id [{gaming_id}] promoted");
    Ok(())
}

pub async fn is_promoted(gaming_id: &str, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let id = sqlx::query_scalar::<_, String>("SELECT gaming_id FROM promoted_ids WHERE gaming_id = $1")
        .bind(gaming_id)
        .fetch_optional(conn)
        .await?;
    Ok(id.is_some())
}
