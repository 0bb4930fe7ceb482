//! Enrichment fetcher
//!
//! Turns a snapshot of records into pending updates, one per record and in
//! the same order, by looking up each record's key value with a
//! [`SummaryApi`]. Lookups run strictly one after another with the throttle
//! delay after each, and the first failure aborts the whole fetch.

use std::sync::Arc;
use tracing::{debug, info};

use crate::core::providers::{PageSummary, SummaryApi};
use crate::core::rate_limiter::RequestThrottle;
use crate::core::types::{PendingUpdate, Record, RecordId};
use crate::utils::error::{EnrichError, Result};

/// Map a summary onto the staged update for `id`
pub fn pending_update_from_summary(id: RecordId, summary: &PageSummary) -> PendingUpdate {
    PendingUpdate {
        id,
        extract: summary.extract.clone(),
        image: summary.image_attachments(),
    }
}

/// Sequential summary fetcher
#[derive(Clone)]
pub struct EnrichmentFetcher {
    api: Arc<dyn SummaryApi>,
    throttle: RequestThrottle,
}

impl EnrichmentFetcher {
    pub fn new(api: Arc<dyn SummaryApi>, throttle: RequestThrottle) -> Self {
        Self { api, throttle }
    }

    /// Fetch one pending update per record, preserving order
    pub async fn fetch_updates(
        &self,
        records: &[Record],
        key_field: &str,
    ) -> Result<Vec<PendingUpdate>> {
        info!(
            "Fetching summaries for {} records (key field '{}')",
            records.len(),
            key_field
        );

        let mut updates = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let title = record.cell_value_as_string(key_field);
            debug!(record = %record.id, title = %title, "Looking up summary");

            let summary = self
                .api
                .page_summary(&title)
                .await
                .map_err(|source| EnrichError::Fetch {
                    index,
                    record_id: record.id.clone(),
                    fetched: updates.len(),
                    source,
                })?;

            updates.push(pending_update_from_summary(record.id.clone(), &summary));
            self.throttle.pause().await;
        }

        debug!("Fetched {} pending updates", updates.len());
        Ok(updates)
    }
}
