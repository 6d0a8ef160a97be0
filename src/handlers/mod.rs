//! HTTP request handlers (route handlers).
//!
//! Each handler extracts request data, calls into a service and shapes the
//! JSON response. Failures return `AppError`.

/// Admin area endpoints (Airtable lookups, status)
pub mod admin;
/// Door-check key verification and relay
pub mod door_check;
/// Event listing and deletion
pub mod events;
/// Health probe
pub mod health;
