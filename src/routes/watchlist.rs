use actix_web::{delete, get, post, web, HttpResponse, Result};
use sqlx::MySqlPool;
use tracing::instrument;

use crate::core::jwt_auth::JwtClaims;
use crate::core::{AppError, AppSuccessResponse};
use crate::db::{movies, watchlist};
use crate::models::users::MessageResponse;

#[instrument(name = "Add to Watchlist", skip(pool, claims))]
#[post("/{movie_id}/watchlist")]
pub async fn add_to_watchlist(
    pool: web::Data<MySqlPool>,
    claims: JwtClaims,
    movie_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;
    let movie_id = movie_id.into_inner();

    movies::fetch_movie_by_id(pool.get_ref(), movie_id)
        .await?
        .ok_or_else(|| AppError::not_found("Movie not found"))?;

    watchlist::add_to_watchlist(pool.get_ref(), user_id, movie_id).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Movie added to watchlist".to_string(),
        },
        message: "Movie added to watchlist".to_string(),
        pagination: None,
    }))
}

#[instrument(name = "Remove from Watchlist", skip(pool, claims))]
#[delete("/{movie_id}/watchlist")]
pub async fn remove_from_watchlist(
    pool: web::Data<MySqlPool>,
    claims: JwtClaims,
    movie_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;

    let removed =
        watchlist::remove_from_watchlist(pool.get_ref(), user_id, movie_id.into_inner()).await?;

    if !removed {
        return Err(AppError::not_found("Movie is not in your watchlist"));
    }

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Movie removed from watchlist".to_string(),
        },
        message: "Movie removed from watchlist".to_string(),
        pagination: None,
    }))
}

#[instrument(name = "Get My Watchlist", skip(pool, claims))]
#[get("")]
pub async fn get_my_watchlist(
    pool: web::Data<MySqlPool>,
    claims: JwtClaims,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;

    let watchlist = watchlist::fetch_user_watchlist(pool.get_ref(), user_id).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: watchlist,
        message: "Watchlist retrieved successfully".to_string(),
        pagination: None,
    }))
}
