pub mod core;
pub mod db;
pub mod models;
pub mod movie_api_web_server;
pub mod routes;
