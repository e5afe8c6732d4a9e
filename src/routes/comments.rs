use actix_web::{delete, get, post, put, web, HttpResponse, Result};
use sqlx::MySqlPool;
use tracing::instrument;

use crate::core::jwt_auth::JwtClaims;
use crate::core::{AppError, AppErrorResponse, AppSuccessResponse};
use crate::db::{comments, movies};
use crate::models::comments::{CreateCommentRequest, UpdateCommentRequest};
use crate::models::users::MessageResponse;

#[instrument(name = "Create Comment", skip(pool, claims, request))]
#[post("/{movie_id}/comments")]
pub async fn create_comment(
    pool: web::Data<MySqlPool>,
    claims: JwtClaims,
    movie_id: web::Path<i64>,
    request: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;
    let movie_id = movie_id.into_inner();

    if request.content.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(AppErrorResponse {
            success: false,
            message: "Comment content cannot be empty".to_string(),
        }));
    }

    movies::fetch_movie_by_id(pool.get_ref(), movie_id)
        .await?
        .ok_or_else(|| AppError::not_found("Movie not found"))?;

    let comment =
        comments::create_comment(pool.get_ref(), user_id, movie_id, request.content.trim()).await?;

    Ok(HttpResponse::Created().json(AppSuccessResponse {
        success: true,
        data: comment,
        message: "Comment created successfully".to_string(),
        pagination: None,
    }))
}

#[instrument(name = "Get Movie Comments", skip(pool))]
#[get("/{movie_id}/comments")]
pub async fn get_movie_comments(
    pool: web::Data<MySqlPool>,
    movie_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let comments = comments::fetch_comments_for_movie(pool.get_ref(), movie_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: comments,
        message: "Comments retrieved successfully".to_string(),
        pagination: None,
    }))
}

#[instrument(name = "Update Comment", skip(pool, claims, request))]
#[put("/comments/{comment_id}")]
pub async fn update_comment(
    pool: web::Data<MySqlPool>,
    claims: JwtClaims,
    comment_id: web::Path<i64>,
    request: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;

    let updated =
        comments::update_comment(pool.get_ref(), comment_id.into_inner(), user_id, &request.content)
            .await?;

    if !updated {
        return Err(AppError::not_found("Comment not found"));
    }

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Comment updated successfully".to_string(),
        },
        message: "Comment updated successfully".to_string(),
        pagination: None,
    }))
}

#[instrument(name = "Delete Comment", skip(pool, claims))]
#[delete("/comments/{comment_id}")]
pub async fn delete_comment(
    pool: web::Data<MySqlPool>,
    claims: JwtClaims,
    comment_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;

    let deleted = comments::delete_comment(
        pool.get_ref(),
        comment_id.into_inner(),
        user_id,
        claims.is_admin(),
    )
    .await?;

    if !deleted {
        return Err(AppError::not_found("Comment not found"));
    }

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Comment deleted successfully".to_string(),
        },
        message: "Comment deleted successfully".to_string(),
        pagination: None,
    }))
}
