use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse, Responder};
use futures_util::TryStreamExt;
use sqlx::MySqlPool;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    core::{
        config::VideoStorageConfig,
        jwt_auth::JwtClaims,
        video_path, AppError, AppErrorType, AppSuccessResponse,
    },
    db::movies,
    models::users::MessageResponse,
};

const MAX_VIDEO_SIZE: usize = 500 * 1024 * 1024; // 500MB

#[instrument(name = "Upload Video", skip(pool, video_config, claims, payload))]
#[post("/{movie_id}/upload")]
pub async fn upload_video(
    pool: web::Data<MySqlPool>,
    video_config: web::Data<VideoStorageConfig>,
    claims: JwtClaims,
    movie_id: web::Path<i64>,
    mut payload: Multipart,
) -> Result<impl Responder, AppError> {
    if !claims.is_admin() {
        return Err(AppError {
            message: Some("Only administrators can upload videos".to_string()),
            cause: None,
            error_type: AppErrorType::ForbiddenError,
        });
    }

    let movie_id = movie_id.into_inner();

    let movie = movies::fetch_movie_by_id(pool.get_ref(), movie_id)
        .await?
        .ok_or_else(|| AppError::not_found("Movie not found"))?;

    fs::create_dir_all(&video_config.directory).map_err(|e| {
        tracing::error!("Failed to create video directory: {:?}", e);
        AppError {
            message: Some("Failed to prepare video directory".to_string()),
            cause: Some(e.to_string()),
            error_type: AppErrorType::InternalServerError,
        }
    })?;

    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(mut field) = payload.try_next().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {:?}", e);
        AppError {
            message: Some("Invalid file upload format".to_string()),
            cause: Some(e.to_string()),
            error_type: AppErrorType::PayloadValidationError,
        }
    })? {
        let content_disposition = field.content_disposition();
        let field_name = content_disposition.get_name().unwrap_or("");

        match field_name {
            "file" => {
                let filename = content_disposition
                    .get_filename()
                    .ok_or_else(|| AppError {
                        message: Some("Filename is required".to_string()),
                        cause: None,
                        error_type: AppErrorType::PayloadValidationError,
                    })?
                    .to_string();

                let mut file_bytes = Vec::new();
                while let Some(chunk) = field.try_next().await.map_err(|e| AppError {
                    message: Some("Failed to read file data".to_string()),
                    cause: Some(e.to_string()),
                    error_type: AppErrorType::PayloadValidationError,
                })? {
                    file_bytes.extend_from_slice(&chunk);
                    if file_bytes.len() > MAX_VIDEO_SIZE {
                        return Err(AppError {
                            message: Some(
                                "File size exceeds maximum limit (500MB)".to_string(),
                            ),
                            cause: None,
                            error_type: AppErrorType::PayloadValidationError,
                        });
                    }
                }

                file_data = Some((filename, file_bytes));
            }
            _ => {
                // Skip unknown fields
                while let Some(_) = field.try_next().await.map_err(|_| AppError {
                    message: Some("Failed to skip unknown field".to_string()),
                    cause: None,
                    error_type: AppErrorType::PayloadValidationError,
                })? {}
            }
        }
    }

    let (filename, file_bytes) = file_data.ok_or_else(|| AppError {
        message: Some("File is required".to_string()),
        cause: None,
        error_type: AppErrorType::PayloadValidationError,
    })?;

    // Name the stored file ourselves; the client name only contributes its
    // extension, sanitized the same way playback resolution does.
    let file_extension = Path::new(&video_path::sanitize_file_name(&filename))
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("mp4")
        .to_string();
    let unique_filename = format!(
        "{}_{}.{}",
        Uuid::new_v4(),
        chrono::Utc::now().timestamp(),
        file_extension
    );
    let file_path = Path::new(&video_config.directory).join(&unique_filename);

    let mut file = fs::File::create(&file_path).map_err(|e| {
        tracing::error!("Failed to create file {}: {:?}", file_path.display(), e);
        AppError {
            message: Some("Failed to save file".to_string()),
            cause: Some(e.to_string()),
            error_type: AppErrorType::InternalServerError,
        }
    })?;

    file.write_all(&file_bytes).map_err(|e| {
        tracing::error!("Failed to write file data: {:?}", e);
        AppError {
            message: Some("Failed to save file".to_string()),
            cause: Some(e.to_string()),
            error_type: AppErrorType::InternalServerError,
        }
    })?;

    movies::update_movie_video(pool.get_ref(), movie.id, &unique_filename)
        .await
        .map_err(|e| {
            // Clean up the file if the database update fails
            let _ = fs::remove_file(&file_path);
            tracing::error!("Failed to update movie video reference: {:?}", e);
            AppError {
                message: Some("Failed to save video metadata".to_string()),
                cause: Some(e.to_string()),
                error_type: AppErrorType::InternalServerError,
            }
        })?;

    tracing::info!("Video uploaded for movie {} as {}", movie.id, unique_filename);

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: format!("Video uploaded successfully as {}", unique_filename),
        },
        message: "Video uploaded successfully".to_string(),
        pagination: None,
    }))
}
