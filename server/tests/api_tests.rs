//! In-process tests of the HTTP surface.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use printshop::{
    MemoryJobStore, NewPrintJob, PrintJob, PrintJobRepository, ServerConfig, StoreError,
    MAX_BATCH_BYTES,
};
use printshop_server::{router, AppState};

const BOUNDARY: &str = "printshop-test-boundary";

/// One multipart part: field name, optional filename, optional content type, bytes.
struct Part {
    field: &'static str,
    filename: Option<&'static str>,
    content_type: Option<&'static str>,
    data: Vec<u8>,
}

impl Part {
    fn file(filename: &'static str, content_type: &'static str, size: usize) -> Self {
        Self {
            field: "files",
            filename: Some(filename),
            content_type: Some(content_type),
            data: vec![b'x'; size],
        }
    }
}

fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.field);
        if let Some(filename) = part.filename {
            disposition.push_str(&format!("; filename=\"{}\"", filename));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(parts: &[Part]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/print")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

fn get_request(id: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/api/print/{}", id))
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn test_app() -> (Router, Arc<MemoryJobStore>) {
    let store = Arc::new(MemoryJobStore::new());
    let state = AppState::with_store(ServerConfig::default(), store.clone());
    (router(state), store)
}

struct FailingStore;

impl PrintJobRepository for FailingStore {
    fn create_with(
        &self,
        _fields: &mut dyn FnMut(DateTime<Utc>) -> NewPrintJob,
    ) -> Result<PrintJob, StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }

    fn get_by_id(&self, _id: &str) -> Result<Option<PrintJob>, StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(0)
    }
}

#[tokio::test]
async fn test_upload_two_files() {
    let (app, store) = test_app();

    let (status, body) = send(
        &app,
        upload_request(&[
            Part::file("a.pdf", "application/pdf", 1024),
            Part::file("b.png", "image/png", 2048),
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["fileCount"], 2);
    assert_eq!(body["printJob"]["fileName"], "a.pdf, b.png");
    assert_eq!(body["printJob"]["fileSize"], 3072);

    let price = body["printJob"]["price"].as_u64().unwrap();
    assert_eq!(price % 2, 0);
    assert!((20..=400).contains(&price));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_upload_then_fetch() {
    let (app, _) = test_app();

    let (_, created) = send(
        &app,
        upload_request(&[Part::file("cv.docx", "application/msword", 10)]),
    )
    .await;
    let id = created["printJob"]["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(&app, get_request(&id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created["printJob"]);
}

#[tokio::test]
async fn test_fetch_unknown_job() {
    let (app, _) = test_app();

    let (status, body) = send(&app, get_request("no-such-job")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Print job not found");
}

#[tokio::test]
async fn test_upload_without_files() {
    let (app, store) = test_app();

    let (status, body) = send(
        &app,
        upload_request(&[Part {
            field: "note",
            filename: None,
            content_type: None,
            data: b"hello".to_vec(),
        }]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No files uploaded");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_disallowed_type_rejects_batch() {
    let (app, store) = test_app();

    let (status, body) = send(
        &app,
        upload_request(&[
            Part::file("a.pdf", "application/pdf", 10),
            Part::file("notes.txt", "text/plain", 10),
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Invalid file type"));
    assert!(message.contains("text/plain"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_missing_part_type_guessed_from_name() {
    let (app, _) = test_app();

    let (status, body) = send(
        &app,
        upload_request(&[Part {
            field: "files",
            filename: Some("scan.jpg"),
            content_type: None,
            data: vec![0; 16],
        }]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fileCount"], 1);
}

#[tokio::test]
async fn test_oversized_batch_rejected() {
    let (app, store) = test_app();
    let half = (MAX_BATCH_BYTES / 2) as usize;

    let (status, body) = send(
        &app,
        upload_request(&[
            Part::file("big-1.pdf", "application/pdf", half),
            Part::file("big-2.pdf", "application/pdf", half + 1),
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["message"].as_str().unwrap().contains("byte limit"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_body_over_transport_limit_rejected() {
    let (app, store) = test_app();

    let (status, _) = send(
        &app,
        upload_request(&[Part::file(
            "huge.pdf",
            "application/pdf",
            (MAX_BATCH_BYTES as usize) + 512 * 1024,
        )]),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_store_failure_on_upload() {
    let state = AppState::with_store(ServerConfig::default(), Arc::new(FailingStore));
    let app = router(state);

    let (status, body) = send(
        &app,
        upload_request(&[Part::file("a.pdf", "application/pdf", 10)]),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].as_str().unwrap().contains("backend offline"));
}

#[tokio::test]
async fn test_store_failure_on_fetch() {
    let state = AppState::with_store(ServerConfig::default(), Arc::new(FailingStore));
    let app = router(state);

    let (status, body) = send(&app, get_request("anything")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to fetch print job");
}

#[tokio::test]
async fn test_json_body_is_treated_as_no_files() {
    let (app, store) = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/print")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No files uploaded");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_missing_content_type_is_treated_as_no_files() {
    let (app, store) = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/print")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No files uploaded");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_truncated_multipart_body_is_malformed() {
    let (app, store) = test_app();
    // A files part that never reaches its closing delimiter.
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"a.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\nxxxxxxxx",
        b = BOUNDARY
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/print")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Malformed upload"), "{message}");
    assert!(store.is_empty());
}
