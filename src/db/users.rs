use crate::core::AppError;
use crate::models::users::{RegisterRequest, User};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use sqlx::MySqlPool;

const USER_COLUMNS: &str =
    "id, name, email, password, role, status, created_at, updated_at";

pub async fn create_user(pool: &MySqlPool, request: &RegisterRequest) -> Result<User, AppError> {
    let now = Utc::now().naive_utc();

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(request.password.as_bytes(), &salt)
        .map_err(|_| AppError::internal_error("Failed to hash password"))?
        .to_string();

    let result = sqlx::query(
        r#"
        INSERT INTO tbl_users (name, email, password, role, status, created_at, updated_at)
        VALUES (?, ?, ?, 'user', 1, ?, ?)
        "#,
    )
    .bind(&request.name)
    .bind(&request.email)
    .bind(&password_hash)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(AppError::db_error)?;

    let user_id = result.last_insert_id() as i32;

    get_user_by_id(pool, user_id).await
}

pub async fn email_exists(pool: &MySqlPool, email: &str) -> Result<bool, AppError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tbl_users WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await
        .map_err(AppError::db_error)?;

    Ok(count > 0)
}

pub async fn get_user_by_email(pool: &MySqlPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM tbl_users WHERE email = ? AND status = 1",
        USER_COLUMNS
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(user)
}

pub async fn get_user_by_id(pool: &MySqlPool, user_id: i32) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM tbl_users WHERE id = ? AND status = 1",
        USER_COLUMNS
    ))
    .bind(user_id)
    .fetch_one(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(user)
}

pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::internal_error("Invalid password"))?;

    let argon2 = Argon2::default();
    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
