use crate::core::AppError;
use crate::models::comments::CommentResponse;
use chrono::Utc;
use sqlx::MySqlPool;

pub async fn create_comment(
    pool: &MySqlPool,
    user_id: i32,
    movie_id: i64,
    content: &str,
) -> Result<CommentResponse, AppError> {
    let now = Utc::now().naive_utc();

    let result = sqlx::query(
        r#"
        INSERT INTO tbl_comments (user_id, movie_id, content, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(movie_id)
    .bind(content)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(AppError::db_error)?;

    let comment_id = result.last_insert_id() as i64;

    get_comment_by_id(pool, comment_id).await
}

pub async fn get_comment_by_id(
    pool: &MySqlPool,
    comment_id: i64,
) -> Result<CommentResponse, AppError> {
    let comment = sqlx::query_as::<_, CommentResponse>(
        r#"
        SELECT c.id, c.movie_id, c.user_id, u.name AS user_name,
               c.content, c.created_at, c.updated_at
        FROM tbl_comments c
        JOIN tbl_users u ON c.user_id = u.id
        WHERE c.id = ?
        "#,
    )
    .bind(comment_id)
    .fetch_one(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(comment)
}

pub async fn fetch_comments_for_movie(
    pool: &MySqlPool,
    movie_id: i64,
) -> Result<Vec<CommentResponse>, AppError> {
    let comments = sqlx::query_as::<_, CommentResponse>(
        r#"
        SELECT c.id, c.movie_id, c.user_id, u.name AS user_name,
               c.content, c.created_at, c.updated_at
        FROM tbl_comments c
        JOIN tbl_users u ON c.user_id = u.id
        WHERE c.movie_id = ?
        ORDER BY c.created_at DESC
        "#,
    )
    .bind(movie_id)
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(comments)
}

/// Returns whether a row was changed; callers decide if a miss is an
/// ownership problem or a stale id.
pub async fn update_comment(
    pool: &MySqlPool,
    comment_id: i64,
    user_id: i32,
    content: &str,
) -> Result<bool, AppError> {
    let now = Utc::now().naive_utc();

    let result = sqlx::query(
        "UPDATE tbl_comments SET content = ?, updated_at = ? WHERE id = ? AND user_id = ?",
    )
    .bind(content)
    .bind(now)
    .bind(comment_id)
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_comment(
    pool: &MySqlPool,
    comment_id: i64,
    user_id: i32,
    is_admin: bool,
) -> Result<bool, AppError> {
    let result = if is_admin {
        sqlx::query("DELETE FROM tbl_comments WHERE id = ?")
            .bind(comment_id)
            .execute(pool)
            .await
    } else {
        sqlx::query("DELETE FROM tbl_comments WHERE id = ? AND user_id = ?")
            .bind(comment_id)
            .bind(user_id)
            .execute(pool)
            .await
    }
    .map_err(AppError::db_error)?;

    Ok(result.rows_affected() > 0)
}
