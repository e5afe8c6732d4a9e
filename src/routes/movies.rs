use actix_web::{get, web, HttpResponse, Result};
use sqlx::MySqlPool;
use tracing::instrument;

use crate::core::{AppError, AppSuccessResponse};
use crate::db::movies;
use crate::models::movies::MovieSearchQuery;
use crate::models::pagination::{PaginationMeta, PaginationQuery};

#[instrument(name = "Get Movies", skip(pool, pagination))]
#[get("")]
pub async fn get_movies(
    pool: web::Data<MySqlPool>,
    pagination: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let mut pagination = pagination.into_inner();
    pagination.validate();

    let (data, total_items) = movies::fetch_movies(pool.get_ref(), &pagination).await?;

    let pagination_meta = PaginationMeta::new(pagination.page, pagination.per_page, total_items);

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data,
        message: "Movies retrieved successfully".to_string(),
        pagination: Some(pagination_meta),
    }))
}

#[instrument(name = "Search Movies", skip(pool, pagination))]
#[get("/search")]
pub async fn search_movies(
    pool: web::Data<MySqlPool>,
    query: web::Query<MovieSearchQuery>,
    pagination: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let mut pagination = pagination.into_inner();
    pagination.validate();

    let (data, total_items) =
        movies::search_movies(pool.get_ref(), &query.q, &pagination).await?;

    let pagination_meta = PaginationMeta::new(pagination.page, pagination.per_page, total_items);

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data,
        message: "Search results retrieved successfully".to_string(),
        pagination: Some(pagination_meta),
    }))
}

#[instrument(name = "Get Movie Details", skip(pool))]
#[get("/{movie_id}")]
pub async fn get_movie_details(
    pool: web::Data<MySqlPool>,
    movie_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let movie = movies::fetch_movie_by_id(pool.get_ref(), movie_id.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Movie not found"))?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: movie,
        message: "Movie retrieved successfully".to_string(),
        pagination: None,
    }))
}
