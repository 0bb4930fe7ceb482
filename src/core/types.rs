//! Record and update types shared by the fetcher, writer and stores

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier of a record inside a table
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Image or file reference stored in an attachment cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl Attachment {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: None,
        }
    }
}

/// Value held by a single cell.
///
/// Variants are tried in order, so anything that is not text, a scalar or an
/// attachment list lands in `Other` instead of failing the whole base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Attachments(Vec<Attachment>),
    Null,
    Other(serde_json::Value),
}

impl CellValue {
    /// Render the cell the way a grid would display it
    pub fn as_display_string(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Number(number) => number.to_string(),
            CellValue::Bool(flag) => flag.to_string(),
            CellValue::Attachments(attachments) => attachments
                .iter()
                .map(|a| a.filename.as_deref().unwrap_or(&a.url))
                .collect::<Vec<_>>()
                .join(", "),
            CellValue::Null => String::new(),
            CellValue::Other(value) => render_json(value),
        }
    }
}

fn render_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(render_json)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// One row of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default)]
    pub fields: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: CellValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn with_text(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.with_field(name, CellValue::Text(text.into()))
    }

    /// Display string for `field`; a missing cell renders as ""
    pub fn cell_value_as_string(&self, field: &str) -> String {
        self.fields
            .get(field)
            .map(CellValue::as_display_string)
            .unwrap_or_default()
    }
}

/// Field writes for one record, as accepted by a store write call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub id: RecordId,
    pub fields: BTreeMap<String, CellValue>,
}

/// Names of the two fields the pipeline writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFields {
    pub extract: String,
    pub image: String,
}

impl TargetFields {
    pub fn new(extract: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            extract: extract.into(),
            image: image.into(),
        }
    }

    pub fn names(&self) -> [&str; 2] {
        [self.extract.as_str(), self.image.as_str()]
    }
}

/// Staged enrichment for one record, produced by the fetcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingUpdate {
    pub id: RecordId,
    pub extract: Option<String>,
    pub image: Option<Vec<Attachment>>,
}

impl PendingUpdate {
    /// Convert into a store write. Absent values are left out of the map so
    /// the store keeps whatever the cell held before.
    pub fn to_record_update(&self, targets: &TargetFields) -> RecordUpdate {
        let mut fields = BTreeMap::new();
        if let Some(extract) = &self.extract {
            fields.insert(targets.extract.clone(), CellValue::Text(extract.clone()));
        }
        if let Some(image) = &self.image {
            fields.insert(targets.image.clone(), CellValue::Attachments(image.clone()));
        }
        RecordUpdate {
            id: self.id.clone(),
            fields,
        }
    }
}

/// Outcome of a permission check against the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionCheck {
    pub allowed: bool,
    /// Human-readable explanation when `allowed` is false
    pub reason: Option<String>,
}

impl PermissionCheck {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}
