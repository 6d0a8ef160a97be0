//! Event models for the door-check view.
//!
//! This module defines:
//! - `EventRow`: the projection read from the `events` table
//! - `DoorEvent`: the normalized record returned to door-check clients
//! - `DoorEventsResponse`: the `{ ok, events }` envelope

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Raw event projection from the database.
///
/// Every column except `id` is nullable in the hosted schema.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub city: Option<String>,
    pub venue: Option<String>,
    pub xceed_event_ref: Option<String>,
    pub xceed_url: Option<String>,
}

/// Event as seen by door-check clients.
///
/// Text fields are always present (empty when unset). `starts_at` is the
/// only field that may be `null`.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "name": "Warehouse Night",
///   "starts_at": "2026-11-02T22:00:00Z",
///   "city": "Barcelona",
///   "venue": "Sala Apolo",
///   "xceed_event_ref": "XC-1234",
///   "xceed_url": ""
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoorEvent {
    pub id: Uuid,
    pub name: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub city: String,
    pub venue: String,
    pub xceed_event_ref: String,
    pub xceed_url: String,
}

impl From<EventRow> for DoorEvent {
    fn from(row: EventRow) -> Self {
        Self {
            id: row.id,
            name: row.name.unwrap_or_default(),
            starts_at: row.starts_at,
            city: row.city.unwrap_or_default(),
            venue: row.venue.unwrap_or_default(),
            xceed_event_ref: row.xceed_event_ref.unwrap_or_default(),
            xceed_url: row.xceed_url.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DoorEventsResponse {
    pub ok: bool,
    pub events: Vec<DoorEvent>,
}

impl From<Vec<DoorEvent>> for DoorEventsResponse {
    fn from(events: Vec<DoorEvent>) -> Self {
        Self { ok: true, events }
    }
}
