use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Catalog row. `video_url` is an opaque reference: a full URL, a relative
/// upload path, or a bare file name. `duration_seconds` may be unknown.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub duration_seconds: Option<i32>,
    pub video_url: String,
    pub poster_url: Option<String>,
    pub view_count: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub duration_seconds: Option<i32>,
    pub poster_url: Option<String>,
    pub view_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct MovieSearchQuery {
    pub q: String,
}

/// `view_count` is the authoritative fast counter on the movie row;
/// `recorded_sessions` counts session rows and may lag behind it.
#[derive(Debug, Serialize)]
pub struct MovieViewStats {
    pub movie_id: i64,
    pub view_count: i64,
    pub recorded_sessions: i64,
}
