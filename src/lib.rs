//! Promo Door - backend for the event-promotion site.
//!
//! Serves the door-check flow (API key verification, a same-origin relay
//! that holds the door key server-side, and the public event list) plus a
//! Basic-auth protected admin area backed by PostgreSQL and Airtable.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
pub mod store;

use std::sync::Arc;

use config::Config;
use services::airtable::AirtableClient;
use store::{EventStore, KeyStore};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub keys: Arc<dyn KeyStore>,
    pub events: Arc<dyn EventStore>,
    pub http: reqwest::Client,
    pub airtable: Option<AirtableClient>,
}

impl AppState {
    pub fn new(
        config: Config,
        keys: Arc<dyn KeyStore>,
        events: Arc<dyn EventStore>,
        http: reqwest::Client,
    ) -> Self {
        let airtable = AirtableClient::from_config(http.clone(), &config);

        Self {
            config: Arc::new(config),
            keys,
            events,
            http,
            airtable,
        }
    }
}
