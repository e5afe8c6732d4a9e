use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One row per (user, movie) pair, upserted. `watched_at` marks first
/// contact, `last_updated` the most recent write.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct WatchHistory {
    pub id: i64,
    pub user_id: i32,
    pub movie_id: i64,
    pub watch_position_seconds: Option<i32>,
    pub completed: Option<bool>,
    pub watched_at: NaiveDateTime,
    pub last_updated: NaiveDateTime,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct WatchHistoryResponse {
    pub movie_id: i64,
    pub movie_title: String,
    pub poster_url: Option<String>,
    pub watch_position_seconds: Option<i32>,
    pub completed: Option<bool>,
    pub watched_at: NaiveDateTime,
    pub last_updated: NaiveDateTime,
}
