use crate::core::jwt_auth::{generate_jwt_token, JwtClaims};
use crate::core::{AppError, AppErrorResponse, AppSuccessResponse};
use crate::db::users;
use crate::models::users::{LoginRequest, LoginResponse, RegisterRequest, UserProfile};
use actix_web::{get, post, web, HttpResponse, Result};
use chrono::{Duration, Utc};
use sqlx::MySqlPool;

#[tracing::instrument(name = "Register User", skip(pool, request))]
#[post("/register")]
pub async fn register(
    pool: web::Data<MySqlPool>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    if users::email_exists(&pool, &request.email).await? {
        return Ok(HttpResponse::BadRequest().json(AppErrorResponse {
            success: false,
            message: "A user with this email address already exists".to_string(),
        }));
    }

    if !is_valid_email(&request.email) {
        return Ok(HttpResponse::BadRequest().json(AppErrorResponse {
            success: false,
            message: "Please provide a valid email address".to_string(),
        }));
    }

    if request.password.len() < 6 {
        return Ok(HttpResponse::BadRequest().json(AppErrorResponse {
            success: false,
            message: "Password must be at least 6 characters long".to_string(),
        }));
    }

    let user = users::create_user(&pool, &request).await?;
    let user_profile = UserProfile::from(user);

    Ok(HttpResponse::Created().json(AppSuccessResponse {
        success: true,
        data: user_profile,
        message: "User registered successfully".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "User Login", skip(pool, request))]
#[post("/login")]
pub async fn login(
    pool: web::Data<MySqlPool>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let user = match users::get_user_by_email(&pool, &request.email).await? {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(AppErrorResponse {
                success: false,
                message: "Email or password is incorrect".to_string(),
            }));
        }
    };

    if !users::verify_password(&request.password, &user.password).await? {
        return Ok(HttpResponse::Unauthorized().json(AppErrorResponse {
            success: false,
            message: "Email or password is incorrect".to_string(),
        }));
    }

    let expires_at = Utc::now() + Duration::hours(24);
    let claims = JwtClaims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role.clone(),
        exp: expires_at.timestamp() as usize,
    };

    let token = generate_jwt_token(&claims)?;
    let user_profile = UserProfile::from(user);

    let response = LoginResponse {
        user: user_profile,
        token,
        expires_at,
    };

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: response,
        message: "Login successful".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Get User Profile", skip(pool, claims))]
#[get("/profile")]
pub async fn get_profile(
    pool: web::Data<MySqlPool>,
    claims: JwtClaims,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;

    let user = users::get_user_by_id(&pool, user_id).await?;
    let user_profile = UserProfile::from(user);

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: user_profile,
        message: "Profile retrieved successfully".to_string(),
        pagination: None,
    }))
}

fn is_valid_email(email: &str) -> bool {
    email.contains('@') && email.contains('.') && email.len() > 5
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;

    #[test]
    fn generated_emails_pass_validation() {
        for _ in 0..20 {
            let email: String = SafeEmail().fake();
            assert!(is_valid_email(&email), "rejected {}", email);
        }
    }

    #[test]
    fn obviously_broken_emails_are_rejected() {
        for email in ["", "a@b", "plainaddress", "no-at-sign.com"] {
            assert!(!is_valid_email(email));
        }
    }
}
