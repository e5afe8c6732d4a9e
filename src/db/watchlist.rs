use crate::core::AppError;
use crate::models::watchlist::WatchlistMovie;
use chrono::Utc;
use sqlx::MySqlPool;

pub async fn add_to_watchlist(
    pool: &MySqlPool,
    user_id: i32,
    movie_id: i64,
) -> Result<(), AppError> {
    let now = Utc::now().naive_utc();

    sqlx::query(
        r#"
        INSERT INTO tbl_watchlist (user_id, movie_id, created_at)
        VALUES (?, ?, ?)
        ON DUPLICATE KEY UPDATE user_id = user_id
        "#,
    )
    .bind(user_id)
    .bind(movie_id)
    .bind(now)
    .execute(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(())
}

pub async fn remove_from_watchlist(
    pool: &MySqlPool,
    user_id: i32,
    movie_id: i64,
) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM tbl_watchlist WHERE user_id = ? AND movie_id = ?")
        .bind(user_id)
        .bind(movie_id)
        .execute(pool)
        .await
        .map_err(AppError::db_error)?;

    Ok(result.rows_affected() > 0)
}

pub async fn fetch_user_watchlist(
    pool: &MySqlPool,
    user_id: i32,
) -> Result<Vec<WatchlistMovie>, AppError> {
    let watchlist = sqlx::query_as::<_, WatchlistMovie>(
        r#"
        SELECT w.movie_id, m.title, m.genre, m.poster_url, w.created_at AS added_at
        FROM tbl_watchlist w
        JOIN tbl_movies m ON w.movie_id = m.id
        WHERE w.user_id = ?
        ORDER BY w.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(watchlist)
}
