//! Table and field selection

use crate::core::types::TargetFields;
use serde::{Deserialize, Serialize};

/// Which base, table and fields the pipeline works on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// JSON base file used by the command line front end
    pub base_path: String,
    pub name: String,
    /// Field holding the article title
    pub key_field: String,
    pub extract_field: String,
    pub image_field: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            base_path: "data/base.json".to_string(),
            name: "Articles".to_string(),
            key_field: "Title".to_string(),
            extract_field: "Extract".to_string(),
            image_field: "Image".to_string(),
        }
    }
}

impl TableConfig {
    pub fn target_fields(&self) -> TargetFields {
        TargetFields::new(self.extract_field.clone(), self.image_field.clone())
    }
}
