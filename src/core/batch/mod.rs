//! Batch writer
//!
//! Persists pending updates in consecutive chunks, awaiting each store call
//! before issuing the next. Writes are not transactional across chunks: when
//! chunk k fails, chunks before it stay applied and nothing after it is sent.


use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::store::{MAX_RECORDS_PER_WRITE, RecordStore};
use crate::core::types::{PendingUpdate, RecordUpdate, TargetFields};
use crate::utils::error::{EnrichError, Result};

/// How much of an update set has been written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    pub batches_written: usize,
    pub records_written: usize,
}

/// Sequential, size-bounded writer
#[derive(Clone)]
pub struct BatchWriter {
    store: Arc<dyn RecordStore>,
    max_records_per_update: usize,
}

impl BatchWriter {
    /// `max_records_per_update` is clamped to `1..=MAX_RECORDS_PER_WRITE`
    pub fn new(store: Arc<dyn RecordStore>, max_records_per_update: usize) -> Self {
        Self {
            store,
            max_records_per_update: max_records_per_update.clamp(1, MAX_RECORDS_PER_WRITE),
        }
    }

    pub fn max_records_per_update(&self) -> usize {
        self.max_records_per_update
    }

    /// Number of store calls needed for `len` updates
    pub fn batch_count(&self, len: usize) -> usize {
        len.div_ceil(self.max_records_per_update)
    }

    /// Write all updates to `table`, one chunk at a time, in order
    pub async fn update_records_in_batches(
        &self,
        table: &str,
        targets: &TargetFields,
        updates: &[PendingUpdate],
    ) -> Result<BatchProgress> {
        let total_batches = self.batch_count(updates.len());
        info!(
            "Writing {} updates to '{}' in {} batches",
            updates.len(),
            table,
            total_batches
        );

        let mut progress = BatchProgress::default();
        for (index, chunk) in updates.chunks(self.max_records_per_update).enumerate() {
            let batch = index + 1;
            let writes: Vec<RecordUpdate> = chunk
                .iter()
                .map(|update| update.to_record_update(targets))
                .collect();

            self.store
                .update_records(table, &writes)
                .await
                .map_err(|source| EnrichError::BatchWrite {
                    batch,
                    applied_batches: progress.batches_written,
                    applied_records: progress.records_written,
                    source,
                })?;

            progress.batches_written += 1;
            progress.records_written += writes.len();
            debug!(batch, total_batches, records = writes.len(), "Batch written");
        }

        Ok(progress)
    }
}
