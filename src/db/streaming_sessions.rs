use crate::core::AppError;
use crate::models::streaming::ActiveStreamResponse;
use chrono::{NaiveDateTime, Utc};
use sqlx::MySqlPool;

/// Fraction of a movie's known duration that counts as a complete watch.
const COMPLETION_THRESHOLD: f64 = 0.9;

pub async fn create_session(
    pool: &MySqlPool,
    session_id: &str,
    user_id: Option<i32>,
    movie_id: i64,
    ip_address: Option<&str>,
    user_agent: Option<&str>,
) -> Result<(), AppError> {
    let now = Utc::now().naive_utc();

    sqlx::query(
        r#"
        INSERT INTO tbl_streaming_sessions
            (session_id, user_id, movie_id, ip_address, user_agent, start_time, completed)
        VALUES (?, ?, ?, ?, ?, ?, FALSE)
        "#,
    )
    .bind(session_id)
    .bind(user_id)
    .bind(movie_id)
    .bind(ip_address)
    .bind(user_agent)
    .bind(now)
    .execute(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(())
}

/// Close a session: stamp `end_time`, record the watched duration, and flag
/// completion when at least 90 % of a known movie duration was watched. An
/// unknown `session_id` is a silent no-op, and an unknown movie duration
/// never auto-completes.
pub async fn end_session(
    pool: &MySqlPool,
    session_id: &str,
    duration_watched: Option<i32>,
) -> Result<(), AppError> {
    let session: Option<(i64, Option<i32>)> = sqlx::query_as(
        r#"
        SELECT s.id, m.duration_seconds
        FROM tbl_streaming_sessions s
        JOIN tbl_movies m ON s.movie_id = m.id
        WHERE s.session_id = ?
        "#,
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await
    .map_err(AppError::db_error)?;

    let Some((row_id, movie_duration)) = session else {
        return Ok(());
    };

    let completed = match (duration_watched, movie_duration) {
        (Some(watched), Some(total)) => {
            f64::from(watched) >= f64::from(total) * COMPLETION_THRESHOLD
        }
        _ => false,
    };

    let now = Utc::now().naive_utc();

    sqlx::query(
        r#"
        UPDATE tbl_streaming_sessions
        SET end_time = ?, duration_watched = ?, completed = ?
        WHERE id = ?
        "#,
    )
    .bind(now)
    .bind(duration_watched)
    .bind(completed)
    .bind(row_id)
    .execute(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(())
}

pub async fn find_active_sessions(
    pool: &MySqlPool,
    since: NaiveDateTime,
) -> Result<Vec<ActiveStreamResponse>, AppError> {
    let sessions = sqlx::query_as::<_, ActiveStreamResponse>(
        r#"
        SELECT s.session_id, s.movie_id, m.title AS movie_title,
               s.user_id, s.ip_address, s.start_time
        FROM tbl_streaming_sessions s
        JOIN tbl_movies m ON s.movie_id = m.id
        WHERE s.start_time >= ? AND s.end_time IS NULL
        ORDER BY s.start_time DESC
        "#,
    )
    .bind(since)
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(sessions)
}

// Session rows as a view-count proxy, independent of the fast counter on
// the movie row.
pub async fn count_sessions_for_movie(pool: &MySqlPool, movie_id: i64) -> Result<i64, AppError> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM tbl_streaming_sessions WHERE movie_id = ?")
            .bind(movie_id)
            .fetch_one(pool)
            .await
            .map_err(AppError::db_error)?;

    Ok(count)
}
