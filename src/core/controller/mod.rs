//! Run controller
//!
//! Gates the fetch-and-write pipeline behind the store's permission check
//! and a single in-flight flag, and exposes the trigger state a front end
//! renders. `Idle -> Running -> Idle`; a running pipeline cannot be
//! cancelled, the flag only keeps a second run from starting.


use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};

use crate::config::Config;
use crate::core::batch::BatchWriter;
use crate::core::enrichment::EnrichmentFetcher;
use crate::core::providers::SummaryApi;
use crate::core::rate_limiter::RequestThrottle;
use crate::core::store::RecordStore;
use crate::core::types::{PendingUpdate, PermissionCheck, Record, TargetFields};
use crate::utils::error::{EnrichError, Result};

/// Pipeline state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Running,
}

/// What the trigger control should show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerView {
    /// Permitted and idle
    pub enabled: bool,
    /// A run is in flight
    pub busy: bool,
    /// Why the trigger is disabled, when permission is missing
    pub disabled_reason: Option<String>,
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub table: String,
    pub records_read: usize,
    pub updates_prepared: usize,
    pub batches_written: usize,
    pub records_written: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Resets the in-flight flag on every exit path
struct RunGuard<'a> {
    running: &'a AtomicBool,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Owns one pipeline instance for one table
pub struct RunController {
    store: Arc<dyn RecordStore>,
    fetcher: EnrichmentFetcher,
    writer: BatchWriter,
    table: String,
    key_field: String,
    targets: TargetFields,
    running: AtomicBool,
}

impl RunController {
    pub fn new(
        store: Arc<dyn RecordStore>,
        api: Arc<dyn SummaryApi>,
        table: impl Into<String>,
        key_field: impl Into<String>,
        targets: TargetFields,
        throttle: RequestThrottle,
        max_records_per_update: usize,
    ) -> Self {
        Self {
            fetcher: EnrichmentFetcher::new(api, throttle),
            writer: BatchWriter::new(store.clone(), max_records_per_update),
            store,
            table: table.into(),
            key_field: key_field.into(),
            targets,
            running: AtomicBool::new(false),
        }
    }

    /// Build a controller for the configured table
    pub fn from_config(
        config: &Config,
        store: Arc<dyn RecordStore>,
        api: Arc<dyn SummaryApi>,
    ) -> Self {
        let table = config.table();
        Self::new(
            store,
            api,
            table.name.clone(),
            table.key_field.clone(),
            table.target_fields(),
            RequestThrottle::from(config.throttle()),
            config.throttle().max_records_per_update,
        )
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn state(&self) -> RunState {
        if self.running.load(Ordering::SeqCst) {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    /// May the caller write both target fields?
    pub fn permission_check(&self) -> PermissionCheck {
        self.store
            .check_permissions_for_update(&self.table, &self.targets.names())
    }

    pub fn trigger_view(&self) -> TriggerView {
        let permission = self.permission_check();
        let busy = self.state() == RunState::Running;
        TriggerView {
            enabled: permission.allowed && !busy,
            busy,
            disabled_reason: if permission.allowed {
                None
            } else {
                permission.reason
            },
        }
    }

    fn acquire(&self) -> Result<RunGuard<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| EnrichError::RunInProgress)?;
        Ok(RunGuard {
            running: &self.running,
        })
    }

    fn ensure_permitted(&self) -> Result<()> {
        let permission = self.permission_check();
        if permission.allowed {
            Ok(())
        } else {
            Err(EnrichError::permission_denied(permission.reason.unwrap_or_else(
                || format!("Cannot update records in table '{}'", self.table),
            )))
        }
    }

    async fn snapshot(&self) -> Result<Vec<Record>> {
        Ok(self
            .store
            .select_records(&self.table, &[self.key_field.as_str()])
            .await?)
    }

    /// Fetch summaries for every record and write them back
    pub async fn run(&self) -> Result<RunReport> {
        self.ensure_permitted()?;
        let _guard = self.acquire()?;
        let started_at = Utc::now();
        info!("Starting enrichment run on table '{}'", self.table);

        let result = self.run_pipeline(started_at).await;
        match &result {
            Ok(report) => info!(
                "Enrichment run finished: {} records read, {} written in {} batches",
                report.records_read, report.records_written, report.batches_written
            ),
            Err(e) => error!(kind = e.kind(), "Enrichment run failed: {}", e),
        }
        result
    }

    async fn run_pipeline(&self, started_at: DateTime<Utc>) -> Result<RunReport> {
        let records = self.snapshot().await?;
        let updates = self.fetcher.fetch_updates(&records, &self.key_field).await?;
        let progress = self
            .writer
            .update_records_in_batches(&self.table, &self.targets, &updates)
            .await?;

        Ok(RunReport {
            table: self.table.clone(),
            records_read: records.len(),
            updates_prepared: updates.len(),
            batches_written: progress.batches_written,
            records_written: progress.records_written,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Fetch phase only; nothing is written. Needs no write permission but
    /// still occupies the in-flight slot.
    pub async fn preview(&self) -> Result<Vec<PendingUpdate>> {
        let _guard = self.acquire()?;
        info!("Previewing enrichment for table '{}'", self.table);
        let records = self.snapshot().await?;
        self.fetcher.fetch_updates(&records, &self.key_field).await
    }
}
