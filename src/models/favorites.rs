use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct FavoriteMovie {
    pub movie_id: i64,
    pub title: String,
    pub genre: Option<String>,
    pub poster_url: Option<String>,
    pub added_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct FavoriteStatus {
    pub movie_id: i64,
    pub favorited: bool,
}
