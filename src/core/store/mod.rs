//! Record stores
//!
//! A store owns the records: the pipeline reads a snapshot of the key field,
//! asks whether it may write the target fields, and writes updates back in
//! calls of at most [`MAX_RECORDS_PER_WRITE`] records.

mod base;
mod error;
mod json_file;
mod memory;

pub use base::{Base, FieldSchema, Table};
pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;

use crate::core::types::{PermissionCheck, Record, RecordUpdate};
use async_trait::async_trait;

/// Upper bound on records accepted by a single write call
pub const MAX_RECORDS_PER_WRITE: usize = 50;

/// Host-side record storage
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Snapshot of the table's records in table order, loading only `fields`
    async fn select_records(&self, table: &str, fields: &[&str])
    -> Result<Vec<Record>, StoreError>;

    /// Whether the caller may update `fields` of `table`
    fn check_permissions_for_update(&self, table: &str, fields: &[&str]) -> PermissionCheck;

    /// Apply one write call of at most [`MAX_RECORDS_PER_WRITE`] updates
    async fn update_records(&self, table: &str, updates: &[RecordUpdate])
    -> Result<(), StoreError>;
}
