use std::io::SeekFrom;
use std::path::Path;

use actix_web::http::header;
use actix_web::{web::Bytes, HttpResponse};
use futures_util::Stream;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::core::byte_range::{self, ByteRange};
use crate::core::{AppError, AppErrorType};

const STREAM_CHUNK_SIZE: u64 = 64 * 1024;
const CACHE_CONTROL_VALUE: &str = "max-age=3600";

/// Build the HTTP response for a video file, honouring an optional `Range`
/// header. Full and partial bodies are delivered as chunked reads from a
/// freshly opened, seeked file handle, so concurrent requests for the same
/// file never share state and the whole file is never buffered in memory.
pub async fn serve_video_file(
    video_file: &Path,
    range_header: Option<&str>,
) -> Result<HttpResponse, AppError> {
    let metadata = std::fs::metadata(video_file).map_err(|e| AppError {
        message: Some("Video file not found".to_string()),
        cause: Some(e.to_string()),
        error_type: AppErrorType::NotFoundError,
    })?;
    let file_size = metadata.len();

    let content_type = mime_guess::from_path(video_file).first_or_octet_stream();

    // Non-numeric offsets still surface as a 500 rather than a 400, matching
    // the long-standing behavior clients already rely on.
    let range = byte_range::parse_range_header(range_header, file_size).map_err(|e| AppError {
        message: Some("Failed to serve video".to_string()),
        cause: Some(e.to_string()),
        error_type: AppErrorType::InternalServerError,
    })?;

    match range {
        ByteRange::Full => {
            let file = open_video_file(video_file).await?;

            let mut response = HttpResponse::Ok();
            response
                .content_type(content_type.as_ref())
                .insert_header((header::ACCEPT_RANGES, "bytes"))
                .insert_header((header::CACHE_CONTROL, CACHE_CONTROL_VALUE))
                .no_chunking(file_size);
            Ok(response.streaming(file_chunk_stream(file, file_size)))
        }
        ByteRange::Partial { start, end } => {
            let mut file = open_video_file(video_file).await?;
            file.seek(SeekFrom::Start(start)).await.map_err(|e| {
                AppError::internal_error(format!("Failed to seek video file: {}", e))
            })?;

            let content_length = end - start + 1;
            let mut response = HttpResponse::PartialContent();
            response
                .content_type(content_type.as_ref())
                .insert_header((header::ACCEPT_RANGES, "bytes"))
                .insert_header((
                    header::CONTENT_RANGE,
                    format!("bytes {}-{}/{}", start, end, file_size),
                ))
                .insert_header((header::CACHE_CONTROL, CACHE_CONTROL_VALUE))
                .no_chunking(content_length);
            Ok(response.streaming(file_chunk_stream(file, content_length)))
        }
        ByteRange::Unsatisfiable => Ok(HttpResponse::RangeNotSatisfiable()
            .insert_header((header::CONTENT_RANGE, format!("bytes */{}", file_size)))
            .finish()),
    }
}

async fn open_video_file(video_file: &Path) -> Result<File, AppError> {
    File::open(video_file).await.map_err(|e| AppError {
        message: Some("Failed to open video file".to_string()),
        cause: Some(e.to_string()),
        error_type: AppErrorType::InternalServerError,
    })
}

// Reads `length` bytes from the current position of `file` in fixed-size
// chunks. The handle's position carries the range offset, so the stream
// itself only tracks how much is left to send.
fn file_chunk_stream(
    file: File,
    length: u64,
) -> impl Stream<Item = Result<Bytes, std::io::Error>> {
    futures_util::stream::unfold((file, length), |(mut file, remaining)| async move {
        if remaining == 0 {
            return None;
        }

        let capacity = remaining.min(STREAM_CHUNK_SIZE) as usize;
        let mut buffer = vec![0u8; capacity];
        match file.read(&mut buffer).await {
            Ok(0) => None,
            Ok(n) => {
                buffer.truncate(n);
                Some((Ok(Bytes::from(buffer)), (file, remaining - n as u64)))
            }
            Err(e) => Some((Err(e), (file, 0))),
        }
    })
}
