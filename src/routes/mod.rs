use actix_files as fs;

use actix_web::web::{scope, ServiceConfig};
use actix_web::Scope;
use comments::{create_comment, delete_comment, get_movie_comments, update_comment};
use favorites::{add_favorite, check_favorite_status, get_my_favorites, remove_favorite};
use movies::{get_movie_details, get_movies, search_movies};
use streaming::{
    end_stream, get_active_streams, get_movie_view_stats, mark_completed, stream_video,
    update_progress,
};
use uploads::upload_video;
use users::{get_profile, login, register};
use watch_history::{clear_watch_history, get_my_watch_history};
use watchlist::{add_to_watchlist, get_my_watchlist, remove_from_watchlist};

mod comments;
mod favorites;
mod health_check;
mod movies;
mod streaming;
mod uploads;
mod users;
mod watch_history;
mod watchlist;

use crate::routes::health_check::*;

const POSTERS_DIR: &str = "./static/posters";

fn util_routes() -> Scope {
    scope("").service(health_check)
}

fn users_routes() -> Scope {
    scope("users")
        .service(register)
        .service(login)
        .service(get_profile)
}

fn movies_routes() -> Scope {
    scope("movies")
        .service(search_movies)
        .service(get_movies)
        .service(get_movie_details)
        .service(upload_video)
        // comment routes
        .service(create_comment)
        .service(get_movie_comments)
        .service(update_comment)
        .service(delete_comment)
        // favorite and watchlist toggles
        .service(add_favorite)
        .service(remove_favorite)
        .service(check_favorite_status)
        .service(add_to_watchlist)
        .service(remove_from_watchlist)
}

fn streaming_routes() -> Scope {
    // `/active` and the POST endpoints must register before the `{movie_id}`
    // catch-all or they would never match.
    scope("stream")
        .service(get_active_streams)
        .service(update_progress)
        .service(mark_completed)
        .service(end_stream)
        .service(get_movie_view_stats)
        .service(stream_video)
}

fn watch_history_routes() -> Scope {
    scope("watch-history")
        .service(get_my_watch_history)
        .service(clear_watch_history)
}

fn favorites_routes() -> Scope {
    scope("favorites").service(get_my_favorites)
}

fn watchlist_routes() -> Scope {
    scope("watchlist").service(get_my_watchlist)
}

fn static_files_routes() -> Scope {
    // Poster images are public static assets
    scope("static").service(fs::Files::new("/posters", POSTERS_DIR))
}

pub fn movie_api_routes(conf: &mut ServiceConfig) {
    conf.service(
        scope("api/v1")
            .service(users_routes())
            .service(movies_routes())
            .service(streaming_routes())
            .service(watch_history_routes())
            .service(favorites_routes())
            .service(watchlist_routes())
            .service(static_files_routes())
            .service(util_routes()),
    );
}
