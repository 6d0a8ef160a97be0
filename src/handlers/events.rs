//! Event HTTP handlers.
//!
//! - GET /api/door-events - public door-check event list
//! - GET /admin/api/events - same list for the admin area
//! - DELETE /admin/api/events/{id} - delete one event

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    AppState, error::AppError, models::event::DoorEventsResponse, services::event_reader,
};

/// List events for door-check clients.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "ok": true,
///   "events": [
///     {
///       "id": "550e8400-e29b-41d4-a716-446655440000",
///       "name": "Warehouse Night",
///       "starts_at": "2026-11-02T22:00:00Z",
///       "city": "Barcelona",
///       "venue": "Sala Apolo",
///       "xceed_event_ref": "XC-1234",
///       "xceed_url": "https://xceed.me/e/1234"
///     }
///   ]
/// }
/// ```
///
/// # Ordering
///
/// Latest `starts_at` first.
pub async fn list_door_events(
    State(state): State<AppState>,
) -> Result<Json<DoorEventsResponse>, AppError> {
    let events = event_reader::list_door_events(state.events.as_ref()).await?;

    Ok(Json(events.into()))
}

/// Delete an event by id.
///
/// # Response
///
/// - **200**: `{ "ok": true, "deleted": "<id>" }`
/// - **400**: id is not a UUID
/// - **404**: no such event
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::BadRequest("Missing event id".to_string()));
    }

    let id = Uuid::parse_str(id)
        .map_err(|_| AppError::BadRequest(format!("Invalid event id: {}", id)))?;

    if !state.events.delete_event(id).await? {
        return Err(AppError::NotFound("Event not found".to_string()));
    }

    tracing::info!(event_id = %id, "event deleted");

    Ok(Json(json!({ "ok": true, "deleted": id })))
}
