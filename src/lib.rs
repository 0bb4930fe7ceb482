//! # wiki-enrich
//!
//! Enrich table records with Wikipedia page summaries.
//!
//! For every record in a table the title field is looked up against the
//! Wikipedia REST `page/summary` endpoint, one request at a time with a fixed
//! pause between requests. The extract and the page's original image are then
//! written back to two target fields in batches of at most 50 records.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wiki_enrich::{Config, JsonFileStore, RunController, WikipediaClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/enrich.yaml").await?;
//!     let store = Arc::new(JsonFileStore::open(&config.table().base_path).await?);
//!     let api = Arc::new(WikipediaClient::new(config.summary_api())?);
//!
//!     let controller = RunController::from_config(&config, store, api);
//!     let report = controller.run().await?;
//!     println!("{} records written", report.records_written);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{EnrichError, Result};

pub use crate::core::batch::{BatchProgress, BatchWriter};
pub use crate::core::controller::{RunController, RunReport, RunState, TriggerView};
pub use crate::core::enrichment::EnrichmentFetcher;
pub use crate::core::providers::{PageSummary, ProviderError, SummaryApi, WikipediaClient};
pub use crate::core::rate_limiter::RequestThrottle;
pub use crate::core::store::{InMemoryStore, JsonFileStore, RecordStore, StoreError};
pub use crate::core::types::{
    Attachment, CellValue, PendingUpdate, PermissionCheck, Record, RecordId, RecordUpdate,
    TargetFields,
};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
