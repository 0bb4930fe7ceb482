//! In-memory record store

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{Base, RecordStore, StoreError};
use crate::core::types::{PermissionCheck, Record, RecordUpdate};

/// Store holding a [`Base`] in memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    base: RwLock<Base>,
}

impl InMemoryStore {
    pub fn new(base: Base) -> Self {
        Self {
            base: RwLock::new(base),
        }
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> Base {
        self.base.read().clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn select_records(
        &self,
        table: &str,
        fields: &[&str],
    ) -> Result<Vec<Record>, StoreError> {
        Ok(self.base.read().table(table)?.select(fields))
    }

    fn check_permissions_for_update(&self, table: &str, fields: &[&str]) -> PermissionCheck {
        self.base.read().check_permissions_for_update(table, fields)
    }

    async fn update_records(
        &self,
        table: &str,
        updates: &[RecordUpdate],
    ) -> Result<(), StoreError> {
        self.base.write().table_mut(table)?.apply_updates(updates)
    }
}
