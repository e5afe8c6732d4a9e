use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One playback attempt. Created when a stream starts, mutated once when the
/// client reports the stream ended, never deleted. `user_id` is null for
/// anonymous playback.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct StreamingSession {
    pub id: i64,
    pub session_id: String,
    pub user_id: Option<i32>,
    pub movie_id: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub duration_watched: Option<i32>,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct VideoProgressRequest {
    pub movie_id: i64,
    pub current_position: Option<i32>,
    pub total_duration: Option<i32>,
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct EndStreamRequest {
    pub session_id: String,
    pub duration_watched: Option<i32>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ActiveStreamResponse {
    pub session_id: String,
    pub movie_id: i64,
    pub movie_title: String,
    pub user_id: Option<i32>,
    pub ip_address: Option<String>,
    pub start_time: NaiveDateTime,
}
