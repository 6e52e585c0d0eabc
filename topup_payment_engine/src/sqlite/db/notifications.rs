use sqlx::SqliteConnection;

use crate::db_types::{NewNotification, Notification};

pub async fn insert_notification(
    notification: NewNotification,
    conn: &mut SqliteConnection,
) -> Result<Notification, sqlx::Error> {
    let inserted = sqlx::query_as::<_, Notification>(
        "INSERT INTO notifications (gaming_id, message, image_url) VALUES ($1, $2, $3) RETURNING *;",
    )
    .bind(&notification.gaming_id)
    .bind(&notification.message)
    .bind(&notification.image_url)
    .fetch_one(conn)
    .await?;
    Ok(inserted)
}

pub async fn notifications_for_gaming_id(
    gaming_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Vec<Notification>, sqlx::Error> {
    let notifications =
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE gaming_id = $1 ORDER BY created_at")
            .bind(gaming_id)
            .fetch_all(conn)
            .await?;
    Ok(notifications)
}
