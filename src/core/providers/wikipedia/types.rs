//! Response types of the `page/summary` endpoint

use crate::core::types::Attachment;
use serde::{Deserialize, Serialize};

/// Page summary as returned by the REST API.
///
/// Only `extract` and `originalimage` drive the enrichment; the remaining
/// fields are kept for logging. Error documents (e.g. a 404 for an unknown
/// title) also deserialize into this shape, with both payload fields absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSummary {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub extract: Option<String>,
    #[serde(default)]
    pub originalimage: Option<PageImage>,
}

/// Representative image of a page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageImage {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl PageSummary {
    /// One-element attachment list for the original image, if there is one
    pub fn image_attachments(&self) -> Option<Vec<Attachment>> {
        self.originalimage
            .as_ref()
            .and_then(|image| image.source.as_deref())
            .map(|source| vec![Attachment::from_url(source)])
    }
}
