//! Record store errors

use crate::core::types::RecordId;
use thiserror::Error;

/// Failure reported by a record store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No table named '{0}'")]
    TableNotFound(String),

    #[error("Record '{id}' not found in table '{table}'")]
    RecordNotFound { table: String, id: RecordId },

    #[error("Field '{field}' in table '{table}' is not writable: {reason}")]
    FieldNotWritable {
        table: String,
        field: String,
        reason: String,
    },

    #[error("Write of {actual} records exceeds the limit of {max} per call")]
    BatchTooLarge { max: usize, actual: usize },

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
