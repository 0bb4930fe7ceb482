//! Error types for the enrichment pipeline

use crate::core::providers::ProviderError;
use crate::core::store::StoreError;
use crate::core::types::RecordId;
use thiserror::Error;

/// Result type alias for the enrichment pipeline
pub type Result<T> = std::result::Result<T, EnrichError>;

/// Main error type for the enrichment pipeline
#[derive(Error, Debug)]
pub enum EnrichError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The caller may not update the target fields
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// A run is already in flight on this controller
    #[error("An update is already in progress")]
    RunInProgress,

    /// Summary lookup failed; nothing has been written
    #[error("Fetch failed for record {record_id} (row {index}, {fetched} rows fetched before it): {source}")]
    Fetch {
        index: usize,
        record_id: RecordId,
        fetched: usize,
        #[source]
        source: ProviderError,
    },

    /// A batch write failed; earlier batches stay applied
    #[error(
        "Batch {batch} failed to write ({applied_batches} batches / {applied_records} records applied before it): {source}"
    )]
    BatchWrite {
        batch: usize,
        applied_batches: usize,
        applied_records: usize,
        #[source]
        source: StoreError,
    },

    /// Store errors outside the write phase
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
