use crate::core::AppError;
use actix_web::{dev::Payload, Error as ActixWebError};
use actix_web::{error::ErrorUnauthorized, http, FromRequest, HttpRequest};
use core::fmt;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};

const JWT_SECRET: &str = "QX9RMKEOPLVANZIE27OLWQEMovieStreamTOKENKEY";

#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::to_string(&self).unwrap())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JwtClaims {
    pub sub: String, // user ID
    pub email: String,
    pub role: String,
    pub exp: usize, // expiration time
}

impl JwtClaims {
    pub fn user_id(&self) -> Result<i32, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }

    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

impl FromRequest for JwtClaims {
    type Error = ActixWebError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match decode_claims_from_request(req) {
            Some(claims) => ready(Ok(claims)),
            None => {
                let error = ErrorResponse {
                    message: "Invalid login credentials".to_string(),
                    success: false,
                };
                ready(Err(ErrorUnauthorized(error)))
            }
        }
    }
}

fn decode_claims_from_request(req: &HttpRequest) -> Option<JwtClaims> {
    let token = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|auth_header| auth_header.strip_prefix("Bearer "))?;

    decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(JWT_SECRET.as_ref()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}

/// User id from an optional bearer token. Anonymous callers yield `None`
/// instead of an error, so endpoints like streaming stay open to guests.
pub fn optional_user_id(req: &HttpRequest) -> Option<i32> {
    decode_claims_from_request(req)?.sub.parse().ok()
}

pub fn generate_jwt_token(claims: &JwtClaims) -> Result<String, AppError> {
    let header = Header::default();
    let encoding_key = EncodingKey::from_secret(JWT_SECRET.as_ref());

    encode(&header, claims, &encoding_key)
        .map_err(|_| AppError::internal_error("Failed to generate JWT token"))
}
