//! Storage seams for API keys and events.
//!
//! Production uses [`crate::db::PgStore`]. [`MemoryStore`] backs local runs
//! and tests. It records how many key lookups it served so callers can
//! assert that a request never reached the store.

use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{api_key::ApiKey, event::EventRow},
};

#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Look up an active key by exact match, at most one row.
    async fn find_active_key(&self, api_key: &str) -> Result<Option<ApiKey>, AppError>;
}

#[async_trait]
pub trait EventStore: Send + Sync {
    /// All events with the door-check projection, most recent start first.
    async fn list_events(&self) -> Result<Vec<EventRow>, AppError>;

    /// Delete one event. Returns `false` when no row matched.
    async fn delete_event(&self, id: Uuid) -> Result<bool, AppError>;

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    keys: Mutex<Vec<ApiKey>>,
    events: Mutex<Vec<EventRow>>,
    key_lookups: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys(self, keys: Vec<ApiKey>) -> Self {
        *self.keys.lock().unwrap_or_else(|e| e.into_inner()) = keys;
        self
    }

    pub fn with_events(self, events: Vec<EventRow>) -> Self {
        *self.events.lock().unwrap_or_else(|e| e.into_inner()) = events;
        self
    }

    /// Make every subsequent call fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn set_key_active(&self, api_key: &str, active: bool) {
        let mut keys = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        for record in keys.iter_mut().filter(|k| k.api_key == api_key) {
            record.active = active;
        }
    }

    /// Snapshot of the stored events, in insertion order.
    pub fn events(&self) -> Vec<EventRow> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn key_lookups(&self) -> usize {
        self.key_lookups.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Upstream("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyStore for MemoryStore {
    async fn find_active_key(&self, api_key: &str) -> Result<Option<ApiKey>, AppError> {
        self.key_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let keys = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        Ok(keys
            .iter()
            .find(|k| k.api_key == api_key && k.active)
            .cloned())
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn list_events(&self) -> Result<Vec<EventRow>, AppError> {
        self.check_available()?;

        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner()).clone();
        events.sort_by(|a, b| b.starts_at.cmp(&a.starts_at));
        Ok(events)
    }

    async fn delete_event(&self, id: Uuid) -> Result<bool, AppError> {
        self.check_available()?;

        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        let before = events.len();
        events.retain(|e| e.id != id);
        Ok(events.len() != before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_available()
    }
}
