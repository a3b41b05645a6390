//! Tests for the upload conversion handler.

use salvo::http::StatusCode;
use salvo::prelude::*;
use salvo::test::{ResponseExt, TestClient};
use serde_json::{Value, json};

use std::path::{Path, PathBuf};

use calconv_rfc::rfc::ical::ParseOptions;
use salvo::http::mime::Mime;

use super::upload::{StoredUpload, convert_stored, remove_upload};
use crate::app::api::app_router;
use crate::config::Settings;
use crate::error::AppError;

const BOUNDARY: &str = "calconv-test-boundary";

const CALENDAR: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:upload-1@example.com\r\n\
DTSTART:20260123T140000Z\r\n\
ATTENDEE:mailto:a@example.com\r\n\
ATTENDEE:mailto:b@example.com\r\n\
SUMMARY:Upload\\, test\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

fn service_with(settings: Settings) -> Service {
    Service::new(app_router(settings))
}

fn service() -> Service {
    service_with(Settings::defaults().unwrap())
}

fn multipart(field: &str, content_type: &str, body: &str) -> String {
    format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"calendar.ics\"\r\n\
         Content-Type: {content_type}\r\n\
         \r\n\
         {body}\r\n\
         --{BOUNDARY}--\r\n"
    )
}

async fn upload(service: &Service, payload: String) -> salvo::Response {
    TestClient::post("http://127.0.0.1:5800/convert")
        .add_header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
            true,
        )
        .body(payload)
        .send(service)
        .await
}

#[tokio::test]
async fn test_upload_converts_calendar() {
    let service = service();

    let mut resp = upload(&service, multipart("file", "text/calendar", CALENDAR)).await;

    assert_eq!(resp.status_code, Some(StatusCode::OK));
    let body: Value = resp.take_json().await.unwrap();
    assert_eq!(body["type"], "VCALENDAR");
    assert_eq!(body["VERSION"], "2.0");

    let event = &body["components"]["VEVENT"][0];
    assert_eq!(event["DTSTART"], "20260123T140000Z");
    assert_eq!(
        event["ATTENDEE"],
        json!(["mailto:a@example.com", "mailto:b@example.com"])
    );
    assert_eq!(event["SUMMARY"], "Upload, test");
}

#[tokio::test]
async fn test_upload_accepts_media_type_parameters() {
    let service = service();

    let resp = upload(
        &service,
        multipart("file", "text/calendar; charset=utf-8", CALENDAR),
    )
    .await;

    assert_eq!(resp.status_code, Some(StatusCode::OK));
}

#[test_log::test(tokio::test)]
async fn test_upload_rejects_wrong_media_type() {
    let service = service();

    let mut resp = upload(&service, multipart("file", "text/plain", CALENDAR)).await;

    assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
    let body: Value = resp.take_json().await.unwrap();
    assert_eq!(body, json!({ "error": "Please upload a valid .ics file" }));
}

#[tokio::test]
async fn test_upload_rejects_missing_file_field() {
    let service = service();

    let mut resp = upload(&service, multipart("attachment", "text/calendar", CALENDAR)).await;

    assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
    let body: Value = resp.take_json().await.unwrap();
    assert_eq!(body["error"], "Please upload a valid .ics file");
}

#[tokio::test]
async fn test_upload_rejects_non_multipart_body() {
    let service = service();

    let resp = TestClient::post("http://127.0.0.1:5800/convert")
        .json(&json!({ "file": CALENDAR }))
        .send(&service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
}

#[test_log::test(tokio::test)]
async fn test_upload_rejects_invalid_calendar() {
    let service = service();

    let mut resp = upload(
        &service,
        multipart("file", "text/calendar", "BEGIN:VEVENT\r\nSUMMARY:X\r\n"),
    )
    .await;

    assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
    let body: Value = resp.take_json().await.unwrap();
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Invalid iCal data: "), "{error}");
    assert!(error.contains("VEVENT"), "{error}");
}

#[tokio::test]
async fn test_upload_rejects_deeply_nested_calendar() {
    let service = service();
    let depth = 10_000;
    let deep = format!("{}{}", "BEGIN:X\r\n".repeat(depth), "END:X\r\n".repeat(depth));

    let mut resp = upload(&service, multipart("file", "text/calendar", &deep)).await;

    assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
    let body: Value = resp.take_json().await.unwrap();
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Invalid iCal data: "), "{error}");
    assert!(error.contains("nested deeper than 64 levels"), "{error}");
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    let mut settings = Settings::defaults().unwrap();
    settings.limits.max_upload_bytes = 64;
    let service = service_with(settings);

    let mut resp = upload(&service, multipart("file", "text/calendar", CALENDAR)).await;

    assert_eq!(resp.status_code, Some(StatusCode::PAYLOAD_TOO_LARGE));
    let body: Value = resp.take_json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("64"));
}

#[tokio::test]
async fn test_upload_rejects_declared_oversized_body() {
    let mut settings = Settings::defaults().unwrap();
    settings.limits.max_upload_bytes = 64;
    let service = service_with(settings);

    let resp = TestClient::post("http://127.0.0.1:5800/convert")
        .add_header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
            true,
        )
        .add_header("content-length", "1048576", true)
        .send(&service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::PAYLOAD_TOO_LARGE));
}

#[tokio::test]
async fn test_remove_upload_deletes_file() {
    let path = std::env::temp_dir().join(format!("calconv-upload-{}.ics", std::process::id()));
    tokio::fs::write(&path, CALENDAR).await.unwrap();

    remove_upload(&path).await;
    assert!(!path.exists());

    // Already gone: nothing to report.
    remove_upload(&path).await;
}

async fn store(tag: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "calconv-stored-{tag}-{}.ics",
        std::process::id()
    ));
    tokio::fs::write(&path, body).await.unwrap();
    path
}

async fn convert_at(path: &Path, content_type: &str, limit: u64) -> Result<Value, AppError> {
    let mime: Mime = content_type.parse().unwrap();
    let size = tokio::fs::metadata(path).await.unwrap().len();
    let upload = StoredUpload {
        path,
        content_type: Some(mime),
        size,
    };
    convert_stored(&upload, limit, &ParseOptions::default()).await
}

#[tokio::test]
async fn test_stored_upload_removed_after_success() {
    let path = store("ok", CALENDAR).await;

    let document = convert_at(&path, "text/calendar", 1024).await.unwrap();

    assert_eq!(document["type"], "VCALENDAR");
    assert!(!path.exists());
}

#[tokio::test]
async fn test_stored_upload_removed_after_wrong_media_type() {
    let path = store("mime", CALENDAR).await;

    let err = convert_at(&path, "text/plain", 1024).await.unwrap_err();

    assert!(matches!(err, AppError::InvalidUpload));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_stored_upload_removed_after_parse_failure() {
    let path = store("invalid", "BEGIN:VEVENT\r\nSUMMARY:X\r\n").await;

    let err = convert_at(&path, "text/calendar", 1024).await.unwrap_err();

    assert!(matches!(err, AppError::RfcError(_)));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_stored_upload_removed_when_too_large() {
    let path = store("large", CALENDAR).await;

    let err = convert_at(&path, "text/calendar", 16).await.unwrap_err();

    assert!(matches!(err, AppError::PayloadTooLarge { limit: 16 }));
    assert!(!path.exists());
}
