use std::path::Path;

use actix_web::http::header;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Result};
use chrono::{Duration, Utc};
use sqlx::MySqlPool;
use tracing::instrument;
use uuid::Uuid;

use crate::core::config::VideoStorageConfig;
use crate::core::jwt_auth::{self, JwtClaims};
use crate::core::video_path::{self, VideoPathError};
use crate::core::video_stream;
use crate::core::{AppError, AppErrorResponse, AppErrorType, AppSuccessResponse};
use crate::db::{movies, streaming_sessions, watch_history};
use crate::models::movies::MovieViewStats;
use crate::models::streaming::{EndStreamRequest, VideoProgressRequest};
use crate::models::users::MessageResponse;

#[instrument(name = "Stream Video", skip(pool, video_config, req))]
#[get("/{movie_id}")]
pub async fn stream_video(
    pool: web::Data<MySqlPool>,
    video_config: web::Data<VideoStorageConfig>,
    movie_id: web::Path<i64>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let movie_id = movie_id.into_inner();

    let movie = movies::fetch_movie_by_id(pool.get_ref(), movie_id)
        .await?
        .ok_or_else(|| AppError::not_found("Movie not found"))?;

    let video_root = Path::new(&video_config.directory);
    let video_file = match video_path::resolve_video_path(&movie.video_url, video_root) {
        Ok(path) => path,
        Err(VideoPathError::OutsideRoot) => {
            tracing::error!(
                "Security violation: video reference for movie {} escapes the video directory",
                movie.id
            );
            return Err(AppError {
                message: Some("Access denied".to_string()),
                cause: None,
                error_type: AppErrorType::ForbiddenError,
            });
        }
        Err(VideoPathError::NotFound) => {
            tracing::warn!("Video file not found for movie {}", movie.id);
            return Err(AppError::not_found("Video file not found"));
        }
    };

    // Track the playback attempt. Bookkeeping is best-effort: a failed
    // session insert or counter bump must never take down the stream itself.
    let session_id = Uuid::new_v4().to_string();
    let user_id = jwt_auth::optional_user_id(&req);
    let ip_address = client_ip_address(&req);
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());

    if let Err(e) = streaming_sessions::create_session(
        pool.get_ref(),
        &session_id,
        user_id,
        movie.id,
        ip_address.as_deref(),
        user_agent.as_deref(),
    )
    .await
    {
        tracing::warn!("Failed to record streaming session {}: {}", session_id, e);
    }

    if let Err(e) = movies::increment_view_count(pool.get_ref(), movie.id).await {
        tracing::warn!("Failed to increment view count for movie {}: {}", movie.id, e);
    }

    let range_header = req
        .headers()
        .get(header::RANGE)
        .and_then(|value| value.to_str().ok());

    tracing::info!("Streaming video for movie {} (session {})", movie.id, session_id);

    video_stream::serve_video_file(&video_file, range_header).await
}

#[instrument(name = "Update Watch Progress", skip(pool, claims, request))]
#[post("/progress")]
pub async fn update_progress(
    pool: web::Data<MySqlPool>,
    claims: JwtClaims,
    request: web::Json<VideoProgressRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;

    let movie = movies::fetch_movie_by_id(pool.get_ref(), request.movie_id).await?;
    let Some(movie) = movie else {
        return Ok(HttpResponse::BadRequest().json(AppErrorResponse {
            success: false,
            message: "Movie not found".to_string(),
        }));
    };

    // The caller asked for a state change, so a failed upsert is their 400.
    if let Err(e) = watch_history::upsert_watch_progress(
        pool.get_ref(),
        user_id,
        movie.id,
        request.current_position,
        request.completed,
    )
    .await
    {
        tracing::error!("Failed to update watch progress: {}", e);
        return Ok(HttpResponse::BadRequest().json(AppErrorResponse {
            success: false,
            message: "Failed to update watch progress".to_string(),
        }));
    }

    tracing::info!("Progress updated for user {} on movie {}", user_id, movie.id);

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Progress updated successfully".to_string(),
        },
        message: "Progress updated successfully".to_string(),
        pagination: None,
    }))
}

#[instrument(name = "Mark Movie Completed", skip(pool, claims))]
#[post("/complete/{movie_id}")]
pub async fn mark_completed(
    pool: web::Data<MySqlPool>,
    claims: JwtClaims,
    movie_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;
    let movie_id = movie_id.into_inner();

    let movie = movies::fetch_movie_by_id(pool.get_ref(), movie_id).await?;
    let Some(movie) = movie else {
        return Ok(HttpResponse::BadRequest().json(AppErrorResponse {
            success: false,
            message: "Movie not found".to_string(),
        }));
    };

    if let Err(e) =
        watch_history::upsert_watch_progress(pool.get_ref(), user_id, movie.id, None, Some(true))
            .await
    {
        tracing::error!("Failed to mark movie {} as completed: {}", movie.id, e);
        return Ok(HttpResponse::BadRequest().json(AppErrorResponse {
            success: false,
            message: "Failed to mark movie as completed".to_string(),
        }));
    }

    tracing::info!("Movie {} marked as completed by user {}", movie.id, user_id);

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Movie marked as completed".to_string(),
        },
        message: "Movie marked as completed".to_string(),
        pagination: None,
    }))
}

#[instrument(name = "End Streaming Session", skip(pool, request))]
#[post("/end")]
pub async fn end_stream(
    pool: web::Data<MySqlPool>,
    request: web::Json<EndStreamRequest>,
) -> Result<HttpResponse, AppError> {
    // Unknown tokens are ignored on purpose: clients may retry the end call
    // after the session has already been closed out.
    streaming_sessions::end_session(pool.get_ref(), &request.session_id, request.duration_watched)
        .await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Streaming session ended".to_string(),
        },
        message: "Streaming session ended".to_string(),
        pagination: None,
    }))
}

#[instrument(name = "Get Active Streams", skip(pool, claims))]
#[get("/active")]
pub async fn get_active_streams(
    pool: web::Data<MySqlPool>,
    claims: JwtClaims,
) -> Result<HttpResponse, AppError> {
    if !claims.is_admin() {
        return Err(AppError::forbidden_error("Administrator access required"));
    }

    let since = Utc::now().naive_utc() - Duration::hours(1);
    let sessions = streaming_sessions::find_active_sessions(pool.get_ref(), since).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: sessions,
        message: "Active streams retrieved successfully".to_string(),
        pagination: None,
    }))
}

#[instrument(name = "Get Movie View Stats", skip(pool))]
#[get("/{movie_id}/views")]
pub async fn get_movie_view_stats(
    pool: web::Data<MySqlPool>,
    movie_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let movie_id = movie_id.into_inner();

    let movie = movies::fetch_movie_by_id(pool.get_ref(), movie_id)
        .await?
        .ok_or_else(|| AppError::not_found("Movie not found"))?;

    let recorded_sessions =
        streaming_sessions::count_sessions_for_movie(pool.get_ref(), movie.id).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MovieViewStats {
            movie_id: movie.id,
            view_count: movie.view_count,
            recorded_sessions,
        },
        message: "View stats retrieved successfully".to_string(),
        pagination: None,
    }))
}

/// Proxy-aware client address: first `X-Forwarded-For` entry, then
/// `X-Real-IP`, then the raw peer address.
fn client_ip_address(req: &HttpRequest) -> Option<String> {
    if let Some(forwarded) = header_str(req, "X-Forwarded-For") {
        if !forwarded.is_empty() {
            return forwarded.split(',').next().map(|ip| ip.trim().to_string());
        }
    }

    if let Some(real_ip) = header_str(req, "X-Real-IP") {
        if !real_ip.is_empty() {
            return Some(real_ip.to_string());
        }
    }

    req.peer_addr().map(|addr| addr.ip().to_string())
}

fn header_str<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|value| value.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn forwarded_header_wins_and_takes_the_first_entry() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .insert_header(("X-Real-IP", "198.51.100.4"))
            .to_http_request();

        assert_eq!(client_ip_address(&req), Some("203.0.113.7".to_string()));
    }

    #[test]
    fn real_ip_is_used_when_forwarded_is_absent() {
        let req = TestRequest::default()
            .insert_header(("X-Real-IP", "198.51.100.4"))
            .to_http_request();

        assert_eq!(client_ip_address(&req), Some("198.51.100.4".to_string()));
    }

    #[test]
    fn no_proxy_headers_falls_back_to_the_peer_address() {
        let req = TestRequest::default().to_http_request();

        // Test requests carry no connection, so the chain bottoms out empty.
        assert_eq!(client_ip_address(&req), None);
    }
}
