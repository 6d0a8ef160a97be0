//! Airtable wire types and the field-name mapping for event records.
//!
//! Airtable column names drift between bases ("Event Name" in one, "Name"
//! in another). Each output field lists its candidate column names in
//! priority order and the first present, non-null one wins.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record from `GET /v0/{base}/{table}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AirtableRecord {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(rename = "createdTime", default)]
    pub created_time: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordList {
    #[serde(default)]
    pub records: Vec<AirtableRecord>,
}

/// Response of `GET /v0/meta/bases/{base}/tables`.
#[derive(Debug, Deserialize)]
pub struct BaseSchema {
    #[serde(default)]
    pub tables: Vec<TableSchema>,
}

#[derive(Debug, Deserialize)]
pub struct TableSchema {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

#[derive(Debug, Deserialize)]
pub struct FieldSchema {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub options: Option<FieldOptions>,
}

#[derive(Debug, Deserialize)]
pub struct FieldOptions {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub id: String,
    pub name: String,
}

/// One entry of an admin dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl From<Choice> for SelectOption {
    fn from(choice: Choice) -> Self {
        Self {
            value: choice.id,
            label: choice.name,
        }
    }
}

/// Output field and the Airtable column names it may come from.
pub struct FieldMapping {
    pub field: &'static str,
    pub candidates: &'static [&'static str],
}

pub const EVENT_FIELD_MAP: &[FieldMapping] = &[
    FieldMapping {
        field: "name",
        candidates: &["Event Name", "Name"],
    },
    FieldMapping {
        field: "starts_at",
        candidates: &["Start", "Starts At", "Date"],
    },
    FieldMapping {
        field: "city",
        candidates: &["City"],
    },
    FieldMapping {
        field: "venue",
        candidates: &["Venue", "Location"],
    },
    FieldMapping {
        field: "xceed_event_ref",
        candidates: &["Xceed Event Ref", "Xceed Ref"],
    },
    FieldMapping {
        field: "xceed_url",
        candidates: &["Xceed URL", "Ticket URL"],
    },
];

/// First candidate column present with a non-null value.
pub fn resolve_field<'a>(fields: &'a Map<String, Value>, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|name| fields.get(*name))
        .find(|value| !value.is_null())
}

/// Reshape an Airtable record through a field map.
///
/// The result always carries `id` plus every mapped field; unresolved
/// fields become empty strings.
pub fn map_record(record: &AirtableRecord, mapping: &[FieldMapping]) -> Map<String, Value> {
    let mut out = Map::with_capacity(mapping.len() + 1);
    out.insert("id".to_string(), Value::String(record.id.clone()));

    for entry in mapping {
        let value = resolve_field(&record.fields, entry.candidates)
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));
        out.insert(entry.field.to_string(), value);
    }

    out
}
