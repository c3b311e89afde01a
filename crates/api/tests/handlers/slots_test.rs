use std::future::IntoFuture;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use slotbook_api::ApiState;
use slotbook_core::models::{
    day_slots::{slot_labels, DaySlots},
    slots::SetSlotResponse,
};
use slotbook_db::{memory::MemorySlotStore, mock::MockSlotStore};
use std::sync::Arc;

use crate::test_utils::{mock_server, open_server, server_with_state};

#[test_log::test(tokio::test)]
async fn test_unseen_date_returns_full_template() {
    let server = open_server();

    let response = server
        .get("/api/slots")
        .add_query_param("date", "2025-03-10")
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    let slots = body.as_object().unwrap();
    let labels: Vec<&str> = slots.keys().map(String::as_str).collect();
    assert_eq!(labels, slot_labels().collect::<Vec<_>>());
    assert!(slots.values().all(|available| available == &json!(true)));
}

#[rstest]
#[case::missing(None)]
#[case::empty(Some(""))]
#[tokio::test]
async fn test_get_without_date_is_rejected(#[case] date: Option<&str>) {
    let server = open_server();

    let mut request = server.get("/api/slots");
    if let Some(date) = date {
        request = request.add_query_param("date", date);
    }
    let response = request.await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "validation_error");
    assert!(body["error"].as_str().unwrap().contains("Missing date"));
}

#[tokio::test]
async fn test_write_then_read_back() {
    let server = open_server();

    let response = server
        .post("/api/slots")
        .json(&json!({ "date": "2025-03-10", "time": "11:30", "available": false }))
        .await;
    response.assert_status_ok();

    let response = server
        .get("/api/slots")
        .add_query_param("date", "2025-03-10")
        .await;
    let slots = response.json::<DaySlots>();

    let mut expected = DaySlots::default_template();
    expected.set("11:30", false);
    assert_eq!(slots, expected);
}

#[tokio::test]
async fn test_end_to_end_example() {
    let server = open_server();

    let initial = server
        .get("/api/slots")
        .add_query_param("date", "2025-03-10")
        .await
        .json::<Value>();
    assert_eq!(initial.as_object().unwrap().len(), 32);

    let response = server
        .post("/api/slots")
        .json(&json!({ "date": "2025-03-10", "time": "11:30", "available": false }))
        .await;
    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["slots"]["11:30"], json!(false));
    assert_eq!(body["slots"]["11:15"], json!(true));
    assert_eq!(body["slots"].as_object().unwrap().len(), 32);

    let after = server
        .get("/api/slots")
        .add_query_param("date", "2025-03-10")
        .await
        .json::<Value>();
    assert_eq!(after["11:30"], json!(false));
    assert_eq!(after, body["slots"]);
}

#[tokio::test]
async fn test_repeated_write_is_idempotent() {
    let server = open_server();
    let request = json!({ "date": "2025-03-10", "time": "14:00", "available": false });

    let first = server.post("/api/slots").json(&request).await.json::<SetSlotResponse>();
    let second = server.post("/api/slots").json(&request).await.json::<SetSlotResponse>();

    assert_eq!(first, second);
    assert_eq!(second.slots.unavailable().collect::<Vec<_>>(), ["14:00"]);
}

#[tokio::test]
async fn test_write_can_restore_availability() {
    let server = open_server();

    server
        .post("/api/slots")
        .json(&json!({ "date": "2025-03-10", "time": "10:00", "available": false }))
        .await;
    let response = server
        .post("/api/slots")
        .json(&json!({ "date": "2025-03-10", "time": "10:00", "available": true }))
        .await
        .json::<SetSlotResponse>();

    assert_eq!(response.slots, DaySlots::default_template());
}

#[rstest]
#[case::string_available(json!({ "date": "2025-03-10", "time": "11:30", "available": "true" }))]
#[case::numeric_available(json!({ "date": "2025-03-10", "time": "11:30", "available": 1 }))]
#[case::missing_available(json!({ "date": "2025-03-10", "time": "11:30" }))]
#[case::missing_date(json!({ "time": "11:30", "available": false }))]
#[case::empty_time(json!({ "date": "2025-03-10", "time": "", "available": false }))]
#[case::not_an_object(json!("2025-03-10"))]
#[tokio::test]
async fn test_invalid_write_is_rejected(#[case] body: Value) {
    let mut store = MockSlotStore::new();
    store.expect_set_slot().never();
    let server = mock_server(store);

    let response = server.post("/api/slots").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "validation_error");
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let server = open_server();

    let response = server
        .post("/api/slots")
        .text("{\"date\": \"2025-03-10\",")
        .content_type("application/json")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/slots")
        .text("date=2025-03-10&time=11:30&available=false")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_writes_to_different_labels() {
    let server = open_server();

    let first = server
        .post("/api/slots")
        .json(&json!({ "date": "2025-03-10", "time": "10:00", "available": false }));
    let second = server
        .post("/api/slots")
        .json(&json!({ "date": "2025-03-10", "time": "10:15", "available": false }));
    let (first, second) = tokio::join!(first.into_future(), second.into_future());
    first.assert_status_ok();
    second.assert_status_ok();

    let slots = server
        .get("/api/slots")
        .add_query_param("date", "2025-03-10")
        .await
        .json::<DaySlots>();
    assert_eq!(slots.unavailable().collect::<Vec<_>>(), ["10:00", "10:15"]);
    assert_eq!(slots.len(), 32);
}

#[tokio::test]
async fn test_non_canonical_label_is_stored_by_default() {
    let server = open_server();

    let response = server
        .post("/api/slots")
        .json(&json!({ "date": "2025-03-10", "time": "18:00", "available": false }))
        .await
        .json::<SetSlotResponse>();

    assert_eq!(response.slots.get("18:00"), Some(false));
    assert_eq!(response.slots.len(), 33);
}

#[tokio::test]
async fn test_strict_labels_reject_non_canonical_label() {
    let state = ApiState::new(Arc::new(MemorySlotStore::new())).with_strict_labels(true);
    let server = server_with_state(state);

    let response = server
        .post("/api/slots")
        .json(&json!({ "date": "2025-03-10", "time": "18:00", "available": false }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/slots")
        .json(&json!({ "date": "2025-03-10", "time": "17:45", "available": false }))
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_write_reaches_store_with_parsed_fields() {
    let mut store = MockSlotStore::new();
    store
        .expect_set_slot()
        .withf(|date, time, available| date == "2025-03-10" && time == "11:30" && !*available)
        .times(1)
        .returning(|_, time, available| {
            let mut slots = DaySlots::default_template();
            slots.set(time, available);
            Ok(slots)
        });
    let server = mock_server(store);

    let response = server
        .post("/api/slots")
        .json(&json!({ "date": "2025-03-10", "time": "11:30", "available": false }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<SetSlotResponse>().slots.get("11:30"), Some(false));
}

#[tokio::test]
async fn test_storage_failure_on_read() {
    let mut store = MockSlotStore::new();
    store
        .expect_get_or_create()
        .withf(|date| date == "2025-03-10")
        .times(1)
        .returning(|_| Err(eyre::eyre!("connection reset by peer")));
    let server = mock_server(store);

    let response = server
        .get("/api/slots")
        .add_query_param("date", "2025-03-10")
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "storage_error");
    assert!(body["error"].as_str().unwrap().contains("connection reset by peer"));
}

#[tokio::test]
async fn test_storage_failure_on_write() {
    let mut store = MockSlotStore::new();
    store
        .expect_set_slot()
        .times(1)
        .returning(|_, _, _| Err(eyre::eyre!("disk full")));
    let server = mock_server(store);

    let response = server
        .post("/api/slots")
        .json(&json!({ "date": "2025-03-10", "time": "11:30", "available": false }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["code"], "storage_error");
}
