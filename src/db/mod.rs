pub mod comments;
pub mod favorites;
pub mod movies;
pub mod streaming_sessions;
pub mod users;
pub mod watch_history;
pub mod watchlist;
