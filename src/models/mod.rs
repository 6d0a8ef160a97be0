//! Data models for stored records and external API payloads.

/// Airtable records, schema metadata and field mapping
pub mod airtable;
/// Door-check API key model
pub mod api_key;
/// Event records (door-check view)
pub mod event;
