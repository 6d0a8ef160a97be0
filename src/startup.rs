//! Router construction.

use axum::{
    Router,
    http::Method,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    AppState,
    handlers::{admin, door_check, events, health},
    middleware::admin_auth::admin_gate,
};

pub fn build_router(state: AppState) -> Router {
    // Read by door-check apps served from other origins
    let public_routes = Router::new()
        .route("/api/door-events", get(events::list_door_events))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET]),
        );

    let door_check_routes = Router::new()
        .route("/api/door-check", post(door_check::relay))
        .route("/api/door-check/verify", post(door_check::verify_key));

    let admin_routes = Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/admin/api/events", get(events::list_door_events))
        .route("/admin/api/events/{id}", delete(events::delete_event))
        .route("/admin/api/airtable/events", get(admin::airtable_events))
        .route(
            "/admin/api/airtable/{table}/options/{field}",
            get(admin::airtable_field_options),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .merge(public_routes)
        .merge(door_check_routes)
        .merge(admin_routes)
        // Runs for every request (including unmatched ones) and only acts on /admin paths
        .layer(from_fn_with_state(state.clone(), admin_gate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
