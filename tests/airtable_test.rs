mod common;

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query},
    http::{HeaderMap, Request, StatusCode},
    response::IntoResponse,
    routing::get,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use common::{ADMIN_PASSWORD, body_json, http_client, spawn, test_config, test_state};
use promo_door::{
    config::Config, error::AppError, services::airtable::AirtableClient, startup::build_router,
    store::MemoryStore,
};
use serde_json::json;
use tower::util::ServiceExt;

const BASE: &str = "appPromo";
const TOKEN: &str = "pat-test-token";

#[derive(Default, Clone)]
struct Seen {
    formula: Arc<Mutex<Option<String>>>,
    table: Arc<Mutex<Option<String>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", TOKEN);
    headers.get("authorization").and_then(|h| h.to_str().ok()) == Some(expected.as_str())
}

/// Minimal stand-in for the Airtable REST and metadata APIs.
fn fake_airtable(seen: Seen) -> Router {
    let records = move |Path((base, table)): Path<(String, String)>,
                        Query(params): Query<HashMap<String, String>>,
                        headers: HeaderMap| {
        let seen = seen.clone();
        async move {
            if !authorized(&headers) || base != BASE {
                return (StatusCode::UNAUTHORIZED, "AUTHENTICATION_REQUIRED").into_response();
            }
            *seen.table.lock().unwrap() = Some(table);
            *seen.formula.lock().unwrap() = params.get("filterByFormula").cloned();
            Json(json!({
                "records": [
                    {
                        "id": "recA1",
                        "createdTime": "2026-01-01T00:00:00.000Z",
                        "fields": { "Event Name": "Opening", "City": "Madrid", "Location": "Fabrik" }
                    },
                    {
                        "id": "recB2",
                        "fields": { "Name": "Closing", "Start": "2026-06-30" }
                    }
                ]
            }))
            .into_response()
        }
    };

    let tables = |Path(base): Path<String>, headers: HeaderMap| async move {
        if !authorized(&headers) || base != BASE {
            return (StatusCode::FORBIDDEN, "INVALID_PERMISSIONS").into_response();
        }
        Json(json!({
            "tables": [
                {
                    "id": "tblEvents",
                    "name": "Door Events",
                    "fields": [
                        { "id": "fldName", "name": "Event Name", "type": "singleLineText" },
                        {
                            "id": "fldCity",
                            "name": "City",
                            "type": "singleSelect",
                            "options": { "choices": [
                                { "id": "selBcn", "name": "Barcelona", "color": "blueLight2" },
                                { "id": "selMad", "name": "Madrid", "color": "redLight2" }
                            ] }
                        }
                    ]
                }
            ]
        }))
        .into_response()
    };

    Router::new()
        .route("/v0/meta/bases/{base}/tables", get(tables))
        .route("/v0/{base}/{table}", get(records))
}

async fn airtable_config(seen: Seen) -> Config {
    let addr = spawn(fake_airtable(seen)).await;
    let mut config = test_config();
    config.airtable_api_key = Some(TOKEN.to_string());
    config.airtable_base_id = Some(BASE.to_string());
    config.airtable_api_url = format!("http://{}", addr);
    config.airtable_events_table = "Door Events".to_string();
    config
}

fn admin_get(uri: &str) -> Request<Body> {
    let auth = format!(
        "Basic {}",
        STANDARD.encode(format!("admin:{}", ADMIN_PASSWORD))
    );
    Request::builder()
        .uri(uri)
        .header("authorization", auth)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn airtable_events_are_mapped_through_field_candidates() {
    let seen = Seen::default();
    let config = airtable_config(seen.clone()).await;
    let app = build_router(test_state(config, Arc::new(MemoryStore::new())));

    let response = app
        .oneshot(admin_get("/admin/api/airtable/events?filter=%7BCity%7D%3D%27Madrid%27"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(seen.table.lock().unwrap().as_deref(), Some("Door Events"));
    assert_eq!(seen.formula.lock().unwrap().as_deref(), Some("{City}='Madrid'"));

    let body = body_json(response).await;
    assert_eq!(
        body["events"],
        json!([
            {
                "id": "recA1", "name": "Opening", "starts_at": "", "city": "Madrid",
                "venue": "Fabrik", "xceed_event_ref": "", "xceed_url": ""
            },
            {
                "id": "recB2", "name": "Closing", "starts_at": "2026-06-30", "city": "",
                "venue": "", "xceed_event_ref": "", "xceed_url": ""
            }
        ])
    );
}

#[tokio::test]
async fn field_options_become_dropdown_entries() {
    let config = airtable_config(Seen::default()).await;
    let app = build_router(test_state(config, Arc::new(MemoryStore::new())));

    let response = app
        .oneshot(admin_get("/admin/api/airtable/tblEvents/options/City"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "ok": true,
            "options": [
                { "value": "selBcn", "label": "Barcelona" },
                { "value": "selMad", "label": "Madrid" }
            ]
        })
    );
}

#[tokio::test]
async fn text_fields_have_no_options() {
    let config = airtable_config(Seen::default()).await;
    let client = AirtableClient::from_config(http_client(), &config).unwrap();

    let options = client.field_options("Door Events", "fldName").await.unwrap();
    assert!(options.is_empty());
}

#[tokio::test]
async fn unknown_field_is_not_found() {
    let config = airtable_config(Seen::default()).await;
    let app = build_router(test_state(config, Arc::new(MemoryStore::new())));

    let response = app
        .oneshot(admin_get("/admin/api/airtable/Door%20Events/options/Genre"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({ "ok": false, "error": "Unknown Airtable field: Genre" })
    );
}

#[tokio::test]
async fn upstream_rejection_surfaces_as_server_error() {
    let mut config = airtable_config(Seen::default()).await;
    config.airtable_api_key = Some("pat-wrong".to_string());
    let client = AirtableClient::from_config(http_client(), &config).unwrap();

    let err = client.list_records("Door Events", None).await.unwrap_err();
    match err {
        AppError::Upstream(message) => {
            assert_eq!(message, "Airtable 401: AUTHENTICATION_REQUIRED")
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn airtable_routes_need_configuration() {
    let app = build_router(test_state(test_config(), Arc::new(MemoryStore::new())));

    let response = app
        .oneshot(admin_get("/admin/api/airtable/events"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "ok": false, "error": "Airtable is not configured" })
    );
}
