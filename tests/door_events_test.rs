mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{TimeZone, Utc};
use common::{body_json, test_config, test_state};
use promo_door::{models::event::EventRow, startup::build_router, store::MemoryStore};
use serde_json::json;
use tower::util::ServiceExt;
use uuid::Uuid;

fn event(name: &str, day: u32) -> EventRow {
    EventRow {
        id: Uuid::new_v4(),
        name: Some(name.to_string()),
        starts_at: Some(Utc.with_ymd_and_hms(2026, 3, day, 23, 0, 0).unwrap()),
        city: Some("Barcelona".to_string()),
        venue: None,
        xceed_event_ref: Some(format!("XC-{}", day)),
        xceed_url: None,
    }
}

fn get_events() -> Request<Body> {
    Request::builder()
        .uri("/api/door-events")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn lists_events_latest_first() {
    let store = Arc::new(MemoryStore::new().with_events(vec![
        event("t1", 1),
        event("t3", 3),
        event("t2", 2),
    ]));
    let app = build_router(test_state(test_config(), store));

    let response = app.oneshot(get_events()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["ok"], json!(true));
    let names: Vec<&str> = body["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["t3", "t2", "t1"]);
}

#[tokio::test]
async fn every_field_is_present() {
    let row = event("Warehouse", 7);
    let id = row.id;
    let store = Arc::new(MemoryStore::new().with_events(vec![row]));
    let app = build_router(test_state(test_config(), store));

    let body = body_json(app.oneshot(get_events()).await.unwrap()).await;

    assert_eq!(
        body["events"][0],
        json!({
            "id": id,
            "name": "Warehouse",
            "starts_at": "2026-03-07T23:00:00Z",
            "city": "Barcelona",
            "venue": "",
            "xceed_event_ref": "XC-7",
            "xceed_url": "",
        })
    );
}

#[tokio::test]
async fn repeated_reads_are_identical() {
    let store = Arc::new(MemoryStore::new().with_events(vec![
        event("a", 4),
        event("b", 9),
        event("c", 4),
    ]));
    let app = build_router(test_state(test_config(), store));

    let first = body_json(app.clone().oneshot(get_events()).await.unwrap()).await;
    let second = body_json(app.oneshot(get_events()).await.unwrap()).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn store_failure_returns_error_envelope() {
    let store = Arc::new(MemoryStore::new().with_events(vec![event("t1", 1)]));
    store.set_unavailable(true);
    let app = build_router(test_state(test_config(), store));

    let response = app.oneshot(get_events()).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["ok"], json!(false));
    assert!(body.get("events").is_none());
    assert_eq!(body["error"], json!("store unavailable"));
}

#[tokio::test]
async fn door_events_are_public_and_cors_enabled() {
    let store = Arc::new(MemoryStore::new());
    let mut config = test_config();
    config.admin_password = None;
    let app = build_router(test_state(config, store));

    let request = Request::builder()
        .uri("/api/door-events")
        .header("origin", "https://door.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(body_json(response).await, json!({ "ok": true, "events": [] }));
}

#[tokio::test]
async fn health_reports_store_state() {
    let store = Arc::new(MemoryStore::new());
    let app = build_router(test_state(test_config(), store.clone()));

    let request = || Request::builder().uri("/health").body(Body::empty()).unwrap();

    let healthy = app.clone().oneshot(request()).await.unwrap();
    assert_eq!(healthy.status(), StatusCode::OK);
    assert_eq!(body_json(healthy).await["status"], json!("healthy"));

    store.set_unavailable(true);
    let down = app.oneshot(request()).await.unwrap();
    assert_eq!(down.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
