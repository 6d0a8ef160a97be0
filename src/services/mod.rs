//! Business logic services.
//!
//! Services hold the request logic separated from HTTP handlers: key
//! validation, the door-check relay, event listing and the Airtable client.

pub mod airtable;
pub mod door_relay;
pub mod event_reader;
pub mod key_validator;
