pub mod comments;
pub mod favorites;
pub mod movies;
pub mod pagination;
pub mod streaming;
pub mod users;
pub mod watch_history;
pub mod watchlist;
