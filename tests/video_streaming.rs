use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use actix_web::body;
use actix_web::http::{header, StatusCode};
use actix_web::ResponseError;
use once_cell::sync::Lazy;
use tempfile::TempDir;

use movie_api::core::video_stream::serve_video_file;
use movie_api::core::{get_subscriber, init_subscriber};

static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber("movie_api_tests".into(), "debug".into(), std::io::stdout);
        init_subscriber(subscriber);
    }
});

fn video_fixture(len: usize) -> (TempDir, PathBuf, Vec<u8>) {
    Lazy::force(&TRACING);

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let data: Vec<u8> = (0..len).map(|i| (i % 256) as u8).collect();
    let path = dir.path().join("clip.mp4");
    let mut file = File::create(&path).expect("Failed to create fixture file");
    file.write_all(&data).expect("Failed to write fixture file");

    (dir, path, data)
}

fn header_value(response: &actix_web::HttpResponse, name: header::HeaderName) -> String {
    response
        .headers()
        .get(name)
        .expect("missing header")
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn full_request_returns_the_entire_file() {
    let (_dir, path, data) = video_fixture(1000);

    let response = serve_video_file(&path, None).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, header::CONTENT_LENGTH), "1000");
    assert_eq!(header_value(&response, header::ACCEPT_RANGES), "bytes");
    assert_eq!(header_value(&response, header::CACHE_CONTROL), "max-age=3600");
    assert_eq!(header_value(&response, header::CONTENT_TYPE), "video/mp4");

    let body = body::to_bytes(response.into_body()).await.unwrap();
    assert_eq!(body.as_ref(), data.as_slice());
}

#[tokio::test]
async fn range_request_returns_the_requested_slice() {
    let (_dir, path, data) = video_fixture(1000);

    let response = serve_video_file(&path, Some("bytes=200-299")).await.unwrap();

    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(
        header_value(&response, header::CONTENT_RANGE),
        "bytes 200-299/1000"
    );
    assert_eq!(header_value(&response, header::CONTENT_LENGTH), "100");
    assert_eq!(header_value(&response, header::ACCEPT_RANGES), "bytes");

    let body = body::to_bytes(response.into_body()).await.unwrap();
    assert_eq!(body.as_ref(), &data[200..=299]);
}

#[tokio::test]
async fn open_ended_range_runs_to_the_end_of_the_file() {
    let (_dir, path, data) = video_fixture(1000);

    let response = serve_video_file(&path, Some("bytes=950-")).await.unwrap();

    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(
        header_value(&response, header::CONTENT_RANGE),
        "bytes 950-999/1000"
    );

    let body = body::to_bytes(response.into_body()).await.unwrap();
    assert_eq!(body.as_ref(), &data[950..]);
}

#[tokio::test]
async fn out_of_bounds_range_is_unsatisfiable() {
    let (_dir, path, _data) = video_fixture(1000);

    let response = serve_video_file(&path, Some("bytes=999-1000")).await.unwrap();

    assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
    assert_eq!(
        header_value(&response, header::CONTENT_RANGE),
        "bytes */1000"
    );

    let body = body::to_bytes(response.into_body()).await.unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn malformed_range_surfaces_as_a_server_error() {
    let (_dir, path, _data) = video_fixture(1000);

    let error = serve_video_file(&path, Some("bytes=abc-"))
        .await
        .expect_err("malformed ranges must not be served");

    assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn concurrent_range_reads_do_not_interfere() {
    let (_dir, path, data) = video_fixture(1000);

    let (first, second) = tokio::join!(
        serve_video_file(&path, Some("bytes=0-499")),
        serve_video_file(&path, Some("bytes=500-999")),
    );

    let first_body = body::to_bytes(first.unwrap().into_body()).await.unwrap();
    let second_body = body::to_bytes(second.unwrap().into_body()).await.unwrap();

    assert_eq!(first_body.as_ref(), &data[..500]);
    assert_eq!(second_body.as_ref(), &data[500..]);
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();

    let error = serve_video_file(&dir.path().join("absent.mp4"), None)
        .await
        .expect_err("a missing file must not be served");

    assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
}
