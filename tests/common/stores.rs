//! Stores that wrap [`InMemoryStore`] to observe or break write calls

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use wiki_enrich::core::store::Base;
use wiki_enrich::{
    InMemoryStore, PermissionCheck, Record, RecordStore, RecordUpdate, StoreError,
};

/// Records every write call and fails the `fail_on`-th one (1-based)
pub struct FlakyStore {
    inner: InMemoryStore,
    fail_on: Option<usize>,
    write_delay: Duration,
    calls: Mutex<Vec<Vec<RecordUpdate>>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FlakyStore {
    pub fn new(base: Base) -> Self {
        Self {
            inner: InMemoryStore::new(base),
            fail_on: None,
            write_delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn failing_on(mut self, call: usize) -> Self {
        self.fail_on = Some(call);
        self
    }

    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<Vec<RecordUpdate>> {
        self.calls.lock().clone()
    }

    pub fn call_sizes(&self) -> Vec<usize> {
        self.calls.lock().iter().map(Vec::len).collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Base {
        self.inner.snapshot()
    }
}

#[async_trait]
impl RecordStore for FlakyStore {
    async fn select_records(
        &self,
        table: &str,
        fields: &[&str],
    ) -> Result<Vec<Record>, StoreError> {
        self.inner.select_records(table, fields).await
    }

    fn check_permissions_for_update(&self, table: &str, fields: &[&str]) -> PermissionCheck {
        self.inner.check_permissions_for_update(table, fields)
    }

    async fn update_records(
        &self,
        table: &str,
        updates: &[RecordUpdate],
    ) -> Result<(), StoreError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let call = {
            let mut calls = self.calls.lock();
            calls.push(updates.to_vec());
            calls.len()
        };
        if !self.write_delay.is_zero() {
            tokio::time::sleep(self.write_delay).await;
        }

        let result = if self.fail_on == Some(call) {
            Err(StoreError::Unavailable(format!("write call {} rejected", call)))
        } else {
            self.inner.update_records(table, updates).await
        };
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
