use actix_web::{delete, get, web, HttpResponse, Result};
use sqlx::MySqlPool;

use crate::core::jwt_auth::JwtClaims;
use crate::core::{AppError, AppSuccessResponse};
use crate::db::watch_history;
use crate::models::users::MessageResponse;

#[tracing::instrument(name = "Get Watch History", skip(pool, claims))]
#[get("")]
pub async fn get_my_watch_history(
    pool: web::Data<MySqlPool>,
    claims: JwtClaims,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;

    let history = watch_history::get_user_watch_history(pool.get_ref(), user_id).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: history,
        message: "Watch history retrieved successfully".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Clear Watch History", skip(pool, claims))]
#[delete("")]
pub async fn clear_watch_history(
    pool: web::Data<MySqlPool>,
    claims: JwtClaims,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;

    watch_history::clear_user_watch_history(pool.get_ref(), user_id).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Watch history cleared successfully".to_string(),
        },
        message: "Watch history cleared successfully".to_string(),
        pagination: None,
    }))
}
