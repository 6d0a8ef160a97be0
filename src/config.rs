//! Application configuration management.
//!
//! Configuration is read once at startup with `envy` and handed to every
//! component through `AppState`. Handlers never look at the process
//! environment themselves.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL (Supabase) connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `ADMIN_PASSWORD` (optional): shared secret for the `/admin` Basic gate
/// - `DOOR_API_KEY` (optional): secret the door-check relay injects as `x-api-key`
/// - `DOOR_RELAY_HOSTS` (optional): comma-separated `host[:port]` values the
///   door-check relay may forward to; when empty the relay forwards nowhere
/// - `APP_NAME` (optional): realm label advertised by the admin gate
/// - `AIRTABLE_API_KEY`, `AIRTABLE_BASE_ID` (optional): enable the Airtable routes
/// - `AIRTABLE_API_URL` (optional): Airtable API root, defaults to the public API
/// - `AIRTABLE_EVENTS_TABLE` (optional): table read by the admin event import, defaults to `Events`
///
/// Secrets that are absent do not stop the server from starting. The
/// routes that need them answer with a configuration error instead.
#[derive(Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default)]
    pub admin_password: Option<String>,

    #[serde(default)]
    pub door_api_key: Option<String>,

    #[serde(default)]
    pub door_relay_hosts: Vec<String>,

    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default)]
    pub airtable_api_key: Option<String>,

    #[serde(default)]
    pub airtable_base_id: Option<String>,

    #[serde(default = "default_airtable_api_url")]
    pub airtable_api_url: String,

    #[serde(default = "default_airtable_events_table")]
    pub airtable_events_table: String,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_app_name() -> String {
    "Promo Admin".to_string()
}

fn default_airtable_api_url() -> String {
    "https://api.airtable.com".to_string()
}

fn default_airtable_events_table() -> String {
    "Events".to_string()
}

/// Treats empty values (`ADMIN_PASSWORD=`) the same as unset ones.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// An optional `.env` file is loaded first, then the environment is
    /// deserialized into `Config` (`door_api_key` <- `DOOR_API_KEY`).
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a value cannot be
    /// parsed into its field type.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        envy::from_env::<Config>()
    }

    /// Configuration with no secrets set, used as a base by tests.
    pub fn for_database(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            server_port: default_port(),
            admin_password: None,
            door_api_key: None,
            door_relay_hosts: Vec::new(),
            app_name: default_app_name(),
            airtable_api_key: None,
            airtable_base_id: None,
            airtable_api_url: default_airtable_api_url(),
            airtable_events_table: default_airtable_events_table(),
        }
    }

    pub fn admin_secret(&self) -> Option<&str> {
        non_empty(&self.admin_password)
    }

    pub fn door_secret(&self) -> Option<&str> {
        non_empty(&self.door_api_key)
    }

    /// Airtable credentials, present only when both key and base are set.
    pub fn airtable_credentials(&self) -> Option<(&str, &str)> {
        Some((
            non_empty(&self.airtable_api_key)?,
            non_empty(&self.airtable_base_id)?,
        ))
    }
}

// Hand-written so secrets never end up in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_port", &self.server_port)
            .field("admin_password", &self.admin_secret().map(|_| "<set>"))
            .field("door_api_key", &self.door_secret().map(|_| "<set>"))
            .field("door_relay_hosts", &self.door_relay_hosts)
            .field("app_name", &self.app_name)
            .field("airtable_base_id", &self.airtable_base_id)
            .field("airtable_api_url", &self.airtable_api_url)
            .field("airtable_events_table", &self.airtable_events_table)
            .finish_non_exhaustive()
    }
}
