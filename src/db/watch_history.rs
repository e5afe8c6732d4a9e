use crate::core::AppError;
use crate::models::watch_history::WatchHistoryResponse;
use chrono::Utc;
use sqlx::MySqlPool;

/// Upsert keyed on the unique (user_id, movie_id) pair. The write is
/// last-write-wins for both fields: a null position or completion flag
/// overwrites whatever was stored before. `watched_at` survives from the
/// first insert; `last_updated` moves on every write.
pub async fn upsert_watch_progress(
    pool: &MySqlPool,
    user_id: i32,
    movie_id: i64,
    watch_position_seconds: Option<i32>,
    completed: Option<bool>,
) -> Result<(), AppError> {
    let now = Utc::now().naive_utc();

    sqlx::query(
        r#"
        INSERT INTO tbl_watch_history
            (user_id, movie_id, watch_position_seconds, completed, watched_at, last_updated)
        VALUES (?, ?, ?, ?, ?, ?)
        ON DUPLICATE KEY UPDATE
            watch_position_seconds = VALUES(watch_position_seconds),
            completed = VALUES(completed),
            last_updated = VALUES(last_updated)
        "#,
    )
    .bind(user_id)
    .bind(movie_id)
    .bind(watch_position_seconds)
    .bind(completed)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(())
}

pub async fn get_user_watch_history(
    pool: &MySqlPool,
    user_id: i32,
) -> Result<Vec<WatchHistoryResponse>, AppError> {
    let history = sqlx::query_as::<_, WatchHistoryResponse>(
        r#"
        SELECT wh.movie_id, m.title AS movie_title, m.poster_url,
               wh.watch_position_seconds, wh.completed, wh.watched_at, wh.last_updated
        FROM tbl_watch_history wh
        JOIN tbl_movies m ON wh.movie_id = m.id
        WHERE wh.user_id = ?
        ORDER BY wh.last_updated DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(history)
}

pub async fn clear_user_watch_history(pool: &MySqlPool, user_id: i32) -> Result<(), AppError> {
    sqlx::query("DELETE FROM tbl_watch_history WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(AppError::db_error)?;

    Ok(())
}
