//! Public event listing for door-check clients.

use crate::{error::AppError, models::event::DoorEvent, store::EventStore};

/// List every event in the door-check projection.
///
/// Events are ordered by `starts_at`, latest first, with undated events
/// last. A store failure aborts the whole listing.
pub async fn list_door_events(store: &dyn EventStore) -> Result<Vec<DoorEvent>, AppError> {
    let mut events: Vec<DoorEvent> = store
        .list_events()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    // `None < Some(_)`, so reversing the comparison also sinks undated events.
    events.sort_by(|a, b| b.starts_at.cmp(&a.starts_at));

    Ok(events)
}
