pub mod byte_range;
pub mod config;
pub mod jwt_auth;
mod responses;
mod telementry;
pub mod video_path;
pub mod video_stream;

pub use self::config::AppConfig;
pub use responses::*;
pub use telementry::*;
