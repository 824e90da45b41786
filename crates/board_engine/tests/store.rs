use std::time::Duration;

use board_engine::{FailureKind, PostgrestStore, RemoteStore, StoreSettings};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer) -> StoreSettings {
    StoreSettings::new(server.uri(), "test-key")
}

fn store(server: &MockServer) -> PostgrestStore {
    PostgrestStore::new(settings(server)).expect("store")
}

#[tokio::test]
async fn fetch_all_requests_rows_newest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/items"))
        .and(query_param("select", "id,text,created_at"))
        .and(query_param("order", "created_at.desc"))
        .and(header("apikey", "test-key"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 2, "text": "Walk dog", "created_at": "2026-08-01T12:05:00Z" },
            { "id": 1, "text": "Buy milk", "created_at": "2026-08-01T12:00:00Z" },
        ])))
        .mount(&server)
        .await;

    let records = store(&server).fetch_all().await.expect("fetch ok");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, 2);
    assert_eq!(records[0].text, "Walk dog");
    assert_eq!(
        records[0].created_at,
        Utc.with_ymd_and_hms(2026, 8, 1, 12, 5, 0).unwrap()
    );
    assert_eq!(records[1].id, 1);
    assert!(records[0].created_at > records[1].created_at);
}

#[tokio::test]
async fn fetch_all_accepts_an_empty_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let records = store(&server).fetch_all().await.expect("fetch ok");
    assert!(records.is_empty());
}

#[tokio::test]
async fn insert_posts_text_and_parses_the_created_row() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/items"))
        .and(header("prefer", "return=representation"))
        .and(header("accept", "application/vnd.pgrst.object+json"))
        .and(body_json(json!({ "text": "Buy milk" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!(
            { "id": 1, "text": "Buy milk", "created_at": "2026-08-01T12:00:00Z" }
        )))
        .mount(&server)
        .await;

    let record = store(&server).insert("Buy milk").await.expect("insert ok");
    assert_eq!(record.id, 1);
    assert_eq!(record.text, "Buy milk");
}

#[tokio::test]
async fn insert_surfaces_the_service_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/items"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!(
            { "code": "23505", "message": "duplicate key value" }
        )))
        .mount(&server)
        .await;

    let err = store(&server).insert("x").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(409));
    assert_eq!(err.message, "duplicate key value");
    assert_eq!(err.to_string(), "duplicate key value");
}

#[tokio::test]
async fn error_without_json_body_falls_back_to_the_status_line() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/items"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = store(&server).fetch_all().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert!(err.message.starts_with("404"));
}

#[tokio::test]
async fn delete_targets_the_matching_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/items"))
        .and(query_param("id", "eq.7"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    store(&server).delete(7).await.expect("delete ok");
}

#[tokio::test]
async fn slow_response_maps_to_a_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/items"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let mut settings = settings(&server);
    settings.request_timeout = Duration::from_millis(50);
    let store = PostgrestStore::new(settings).expect("store");

    let err = store.fetch_all().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn malformed_payload_maps_to_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = store(&server).fetch_all().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn table_name_is_settable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/chores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut settings = settings(&server);
    settings.table = "chores".to_string();
    let store = PostgrestStore::new(settings).expect("store");

    store.fetch_all().await.expect("fetch ok");
}
