use crate::core::AppError;
use crate::models::movies::{Movie, MovieSummary};
use crate::models::pagination::PaginationQuery;
use chrono::Utc;
use sqlx::MySqlPool;

pub async fn fetch_movie_by_id(pool: &MySqlPool, movie_id: i64) -> Result<Option<Movie>, AppError> {
    let movie = sqlx::query_as::<_, Movie>(
        r#"
        SELECT id, title, description, genre, release_year, duration_seconds,
               video_url, poster_url, view_count, created_at, updated_at
        FROM tbl_movies
        WHERE id = ?
        "#,
    )
    .bind(movie_id)
    .fetch_optional(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(movie)
}

pub async fn fetch_movies(
    pool: &MySqlPool,
    pagination: &PaginationQuery,
) -> Result<(Vec<MovieSummary>, i64), AppError> {
    let movies = sqlx::query_as::<_, MovieSummary>(
        r#"
        SELECT id, title, genre, release_year, duration_seconds, poster_url, view_count
        FROM tbl_movies
        ORDER BY created_at DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(pagination.per_page)
    .bind(pagination.offset())
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    let (total_items,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tbl_movies")
        .fetch_one(pool)
        .await
        .map_err(AppError::db_error)?;

    Ok((movies, total_items))
}

pub async fn search_movies(
    pool: &MySqlPool,
    query: &str,
    pagination: &PaginationQuery,
) -> Result<(Vec<MovieSummary>, i64), AppError> {
    let pattern = format!("%{}%", query);

    let movies = sqlx::query_as::<_, MovieSummary>(
        r#"
        SELECT id, title, genre, release_year, duration_seconds, poster_url, view_count
        FROM tbl_movies
        WHERE title LIKE ? OR genre LIKE ?
        ORDER BY view_count DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(pagination.per_page)
    .bind(pagination.offset())
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    let (total_items,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM tbl_movies WHERE title LIKE ? OR genre LIKE ?")
            .bind(&pattern)
            .bind(&pattern)
            .fetch_one(pool)
            .await
            .map_err(AppError::db_error)?;

    Ok((movies, total_items))
}

// Single conditional UPDATE so concurrent streams of the same title never
// lose an increment.
pub async fn increment_view_count(pool: &MySqlPool, movie_id: i64) -> Result<(), AppError> {
    sqlx::query("UPDATE tbl_movies SET view_count = view_count + 1 WHERE id = ?")
        .bind(movie_id)
        .execute(pool)
        .await
        .map_err(AppError::db_error)?;

    Ok(())
}

pub async fn update_movie_video(
    pool: &MySqlPool,
    movie_id: i64,
    video_url: &str,
) -> Result<(), AppError> {
    let now = Utc::now().naive_utc();

    sqlx::query("UPDATE tbl_movies SET video_url = ?, updated_at = ? WHERE id = ?")
        .bind(video_url)
        .bind(now)
        .bind(movie_id)
        .execute(pool)
        .await
        .map_err(AppError::db_error)?;

    Ok(())
}
