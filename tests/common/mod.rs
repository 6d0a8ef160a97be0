#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc};

use axum::{Router, body::Body, http::Response};
use promo_door::{AppState, config::Config, store::MemoryStore};
use serde_json::Value;

pub const DOOR_SECRET: &str = "door-secret-0f3a";
pub const ADMIN_PASSWORD: &str = "rightpass";

pub fn test_config() -> Config {
    let mut config = Config::for_database("postgres://localhost/promo_test");
    config.door_api_key = Some(DOOR_SECRET.to_string());
    config.admin_password = Some(ADMIN_PASSWORD.to_string());
    config
}

/// Client that ignores proxy environment variables, so loopback calls stay local.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("failed to build reqwest client")
}

pub fn test_state(config: Config, store: Arc<MemoryStore>) -> AppState {
    AppState::new(config, store.clone(), store, http_client())
}

/// Serve `app` on an ephemeral loopback port.
pub async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });
    addr
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body")
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("body is not JSON")
}
