//! Door-check API key model.
//!
//! Keys are created and revoked by the admin tooling of the hosted
//! database. This service only reads them.

use uuid::Uuid;

/// Represents an API key record from the database.
///
/// # Database Table
///
/// Maps to the `door_api_keys` table with columns:
/// - `id`: Unique identifier (UUID)
/// - `api_key`: The key as issued to the door-check client
/// - `active`: Whether the key is currently valid
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKey {
    pub id: Uuid,

    pub api_key: String,

    /// Inactive keys are rejected exactly like unknown ones. This is how a
    /// key is revoked without deleting the record.
    pub active: bool,
}

impl ApiKey {
    pub fn new(api_key: impl Into<String>, active: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            api_key: api_key.into(),
            active,
        }
    }
}
