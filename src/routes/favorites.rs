use actix_web::{delete, get, post, web, HttpResponse, Result};
use sqlx::MySqlPool;
use tracing::instrument;

use crate::core::jwt_auth::JwtClaims;
use crate::core::{AppError, AppSuccessResponse};
use crate::db::{favorites, movies};
use crate::models::favorites::FavoriteStatus;
use crate::models::users::MessageResponse;

#[instrument(name = "Add Favorite", skip(pool, claims))]
#[post("/{movie_id}/favorite")]
pub async fn add_favorite(
    pool: web::Data<MySqlPool>,
    claims: JwtClaims,
    movie_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;
    let movie_id = movie_id.into_inner();

    movies::fetch_movie_by_id(pool.get_ref(), movie_id)
        .await?
        .ok_or_else(|| AppError::not_found("Movie not found"))?;

    favorites::add_favorite(pool.get_ref(), user_id, movie_id).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Movie added to favorites".to_string(),
        },
        message: "Movie added to favorites".to_string(),
        pagination: None,
    }))
}

#[instrument(name = "Remove Favorite", skip(pool, claims))]
#[delete("/{movie_id}/favorite")]
pub async fn remove_favorite(
    pool: web::Data<MySqlPool>,
    claims: JwtClaims,
    movie_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;

    let removed = favorites::remove_favorite(pool.get_ref(), user_id, movie_id.into_inner()).await?;

    if !removed {
        return Err(AppError::not_found("Movie is not in your favorites"));
    }

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Movie removed from favorites".to_string(),
        },
        message: "Movie removed from favorites".to_string(),
        pagination: None,
    }))
}

#[instrument(name = "Check Favorite Status", skip(pool, claims))]
#[get("/{movie_id}/favorite")]
pub async fn check_favorite_status(
    pool: web::Data<MySqlPool>,
    claims: JwtClaims,
    movie_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;
    let movie_id = movie_id.into_inner();

    let favorited = favorites::is_favorite(pool.get_ref(), user_id, movie_id).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: FavoriteStatus { movie_id, favorited },
        message: "Favorite status retrieved successfully".to_string(),
        pagination: None,
    }))
}

#[instrument(name = "Get My Favorites", skip(pool, claims))]
#[get("")]
pub async fn get_my_favorites(
    pool: web::Data<MySqlPool>,
    claims: JwtClaims,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;

    let favorites = favorites::fetch_user_favorites(pool.get_ref(), user_id).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: favorites,
        message: "Favorites retrieved successfully".to_string(),
        pagination: None,
    }))
}
