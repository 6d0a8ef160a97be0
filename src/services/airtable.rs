//! Airtable API client.
//!
//! Each method makes exactly one request. Results are not paged, cached or
//! retried.

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    config::Config,
    error::AppError,
    models::airtable::{AirtableRecord, BaseSchema, RecordList, SelectOption},
};

#[derive(Clone)]
pub struct AirtableClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    base_id: String,
}

impl AirtableClient {
    pub fn new(
        http: reqwest::Client,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        base_id: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            api_key: api_key.into(),
            base_id: base_id.into(),
        }
    }

    /// Client for the configured base, or `None` when Airtable is not set up.
    pub fn from_config(http: reqwest::Client, config: &Config) -> Option<Self> {
        let (api_key, base_id) = config.airtable_credentials()?;
        Some(Self::new(http, &config.airtable_api_url, api_key, base_id))
    }

    /// Build `{api_url}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| AppError::Configuration(format!("Invalid AIRTABLE_API_URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| AppError::Configuration("Invalid AIRTABLE_API_URL".to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Airtable request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Airtable {}: {}",
                status.as_u16(),
                body
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Upstream(format!("Airtable response unreadable: {}", e)))
    }

    /// Records of `table`, optionally narrowed by an Airtable formula.
    pub async fn list_records(
        &self,
        table: &str,
        filter_formula: Option<&str>,
    ) -> Result<Vec<AirtableRecord>, AppError> {
        let mut url = self.endpoint(&["v0", &self.base_id, table])?;
        if let Some(formula) = filter_formula.filter(|f| !f.trim().is_empty()) {
            url.query_pairs_mut().append_pair("filterByFormula", formula);
        }

        let list: RecordList = self.get_json(url).await?;
        Ok(list.records)
    }

    /// Choices of a select field as dropdown options.
    ///
    /// `table` and `field` match either the display name or the Airtable id.
    /// Fields without choices yield an empty list.
    pub async fn field_options(&self, table: &str, field: &str) -> Result<Vec<SelectOption>, AppError> {
        let url = self.endpoint(&["v0", "meta", "bases", &self.base_id, "tables"])?;
        let schema: BaseSchema = self.get_json(url).await?;

        let table_schema = schema
            .tables
            .into_iter()
            .find(|t| t.name == table || t.id == table)
            .ok_or_else(|| AppError::NotFound(format!("Unknown Airtable table: {}", table)))?;

        let field_schema = table_schema
            .fields
            .into_iter()
            .find(|f| f.name == field || f.id == field)
            .ok_or_else(|| AppError::NotFound(format!("Unknown Airtable field: {}", field)))?;

        tracing::debug!(field = %field_schema.name, kind = %field_schema.field_type, "resolved airtable field");

        Ok(field_schema
            .options
            .map(|o| o.choices.into_iter().map(Into::into).collect())
            .unwrap_or_default())
    }
}
