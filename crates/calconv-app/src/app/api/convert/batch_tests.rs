//! Tests for the base64 batch conversion handler.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use salvo::http::StatusCode;
use salvo::prelude::*;
use salvo::test::{ResponseExt, TestClient};
use serde_json::{Value, json};

use crate::app::api::app_router;
use crate::config::Settings;

const URL: &str = "http://127.0.0.1:5800/convert/base64";

fn service_with(settings: Settings) -> Service {
    Service::new(app_router(settings))
}

fn service() -> Service {
    service_with(Settings::defaults().unwrap())
}

fn encode(text: &str) -> String {
    STANDARD.encode(text)
}

fn calendar(uid: &str) -> String {
    format!(
        "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nUID:{uid}\r\nCATEGORIES:Work,Team\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n"
    )
}

#[tokio::test]
async fn test_batch_converts_in_order() {
    let service = service();

    let mut resp = TestClient::post(URL)
        .json(&json!({ "calendars": [encode(&calendar("one")), encode(&calendar("two"))] }))
        .send(&service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::OK));
    let body: Value = resp.take_json().await.unwrap();
    let documents = body.as_array().unwrap();
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0]["components"]["VEVENT"][0]["UID"], "one");
    assert_eq!(documents[1]["components"]["VEVENT"][0]["UID"], "two");
    assert_eq!(
        documents[0]["components"]["VEVENT"][0]["CATEGORIES"],
        json!(["Work", "Team"])
    );
}

#[tokio::test]
async fn test_batch_empty_list() {
    let service = service();

    let mut resp = TestClient::post(URL)
        .json(&json!({ "calendars": [] }))
        .send(&service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::OK));
    let body: Value = resp.take_json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[test_log::test(tokio::test)]
async fn test_batch_fails_fast_on_invalid_calendar() {
    let service = service();

    let mut resp = TestClient::post(URL)
        .json(&json!({
            "calendars": [
                encode(&calendar("ok")),
                encode("BEGIN:VEVENT\nSUMMARY:X"),
                encode(&calendar("never reached")),
            ]
        }))
        .send(&service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
    let body: Value = resp.take_json().await.unwrap();
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("calendars[1]: Invalid iCal data: "), "{error}");
}

#[tokio::test]
async fn test_batch_rejects_deeply_nested_calendar() {
    let service = service();
    let depth = 10_000;
    let deep = format!("{}{}", "BEGIN:X\r\n".repeat(depth), "END:X\r\n".repeat(depth));

    let mut resp = TestClient::post(URL)
        .json(&json!({ "calendars": [encode(&calendar("ok")), encode(&deep)] }))
        .send(&service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
    let body: Value = resp.take_json().await.unwrap();
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("calendars[1]: "), "{error}");
    assert!(error.contains("nested deeper than"), "{error}");
}

#[tokio::test]
async fn test_batch_rejects_invalid_base64() {
    let service = service();

    let mut resp = TestClient::post(URL)
        .json(&json!({ "calendars": ["%%%not-base64%%%"] }))
        .send(&service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
    let body: Value = resp.take_json().await.unwrap();
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("calendars[0]: invalid base64"), "{error}");
}

#[tokio::test]
async fn test_batch_rejects_bad_shapes() {
    let service = service();

    for payload in [
        json!({}),
        json!({ "calendars": "not a list" }),
        json!({ "calendars": [1, 2] }),
        json!(["no wrapper"]),
    ] {
        let resp = TestClient::post(URL).json(&payload).send(&service).await;
        assert_eq!(
            resp.status_code,
            Some(StatusCode::BAD_REQUEST),
            "payload: {payload}"
        );
    }

    let resp = TestClient::post(URL)
        .raw_json("{ not json")
        .send(&service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn test_batch_rejects_too_many_items() {
    let mut settings = Settings::defaults().unwrap();
    settings.limits.max_batch_items = 1;
    let service = service_with(settings);

    let mut resp = TestClient::post(URL)
        .json(&json!({ "calendars": [encode(&calendar("a")), encode(&calendar("b"))] }))
        .send(&service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
    let body: Value = resp.take_json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("at most 1"));
}
