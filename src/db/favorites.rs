use crate::core::AppError;
use crate::models::favorites::FavoriteMovie;
use chrono::Utc;
use sqlx::MySqlPool;

pub async fn add_favorite(pool: &MySqlPool, user_id: i32, movie_id: i64) -> Result<(), AppError> {
    let now = Utc::now().naive_utc();

    // Re-favoriting is harmless; the unique pair keeps a single row.
    sqlx::query(
        r#"
        INSERT INTO tbl_favorites (user_id, movie_id, created_at)
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

pub async fn remove_favorite(
    pool: &MySqlPool,
    user_id: i32,
    movie_id: i64,
) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM tbl_favorites WHERE user_id = ? AND movie_id = ?")
        .bind(user_id)
        .bind(movie_id)
        .execute(pool)
        .await
        .map_err(AppError::db_error)?;

    Ok(result.rows_affected() > 0)
}

pub async fn fetch_user_favorites(
    pool: &MySqlPool,
    user_id: i32,
) -> Result<Vec<FavoriteMovie>, AppError> {
    let favorites = sqlx::query_as::<_, FavoriteMovie>(
        r#"
        SELECT f.movie_id, m.title, m.genre, m.poster_url, f.created_at AS added_at
        FROM tbl_favorites f
        JOIN tbl_movies m ON f.movie_id = m.id
        WHERE f.user_id = ?
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(favorites)
}

pub async fn is_favorite(pool: &MySqlPool, user_id: i32, movie_id: i64) -> Result<bool, AppError> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM tbl_favorites WHERE user_id = ? AND movie_id = ?")
            .bind(user_id)
            .bind(movie_id)
            .fetch_one(pool)
            .await
            .map_err(AppError::db_error)?;

    Ok(count > 0)
}
