//! Admin HTTP handlers.
//!
//! Everything here sits behind the Basic-auth gate in
//! [`crate::middleware::admin_auth`].

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::{
    AppState,
    error::AppError,
    models::airtable::{EVENT_FIELD_MAP, SelectOption, map_record},
    services::airtable::AirtableClient,
};

/// Admin landing: which optional integrations are configured.
pub async fn dashboard(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "ok": true,
        "app": state.config.app_name,
        "door_relay_configured": state.config.door_secret().is_some(),
        "airtable_configured": state.airtable.is_some(),
    }))
}

fn airtable(state: &AppState) -> Result<&AirtableClient, AppError> {
    state
        .airtable
        .as_ref()
        .ok_or_else(|| AppError::Configuration("Airtable is not configured".to_string()))
}

#[derive(Debug, Deserialize)]
pub struct AirtableEventsQuery {
    /// Airtable formula, passed as `filterByFormula`.
    pub filter: Option<String>,
}

/// Events from the Airtable events table, reshaped to the door-check field names.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "ok": true,
///   "events": [
///     { "id": "recA1", "name": "Opening", "starts_at": "2026-11-02", "city": "", ... }
///   ]
/// }
/// ```
pub async fn airtable_events(
    State(state): State<AppState>,
    Query(query): Query<AirtableEventsQuery>,
) -> Result<Json<Value>, AppError> {
    let client = airtable(&state)?;
    let records = client
        .list_records(&state.config.airtable_events_table, query.filter.as_deref())
        .await?;

    let events: Vec<Map<String, Value>> = records
        .iter()
        .map(|r| map_record(r, EVENT_FIELD_MAP))
        .collect();

    Ok(Json(json!({ "ok": true, "events": events })))
}

/// Dropdown options for a select field, read from the base schema.
///
/// # Response (200 OK)
///
/// ```json
/// { "ok": true, "options": [ { "value": "selA", "label": "Barcelona" } ] }
/// ```
pub async fn airtable_field_options(
    State(state): State<AppState>,
    Path((table, field)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let options: Vec<SelectOption> = airtable(&state)?.field_options(&table, &field).await?;

    Ok(Json(json!({ "ok": true, "options": options })))
}
