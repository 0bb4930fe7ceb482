//! Record store persisted as a single JSON document

use async_trait::async_trait;
use parking_lot::RwLock;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{Base, RecordStore, StoreError};
use crate::core::types::{PermissionCheck, Record, RecordUpdate};

/// Store backed by a JSON file holding a whole [`Base`].
///
/// Every successful write call rewrites the file through a uniquely named
/// temporary sibling and a rename, so a crash mid-run leaves either the
/// previous or the next batch on disk, never half of one. Write calls are
/// serialized: memory and disk always hold the same sequence of batches.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    base: RwLock<Base>,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Load a base from `path`
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path).await?;
        let base: Base = serde_json::from_str(&content)?;
        info!(
            "Loaded base from {} ({} tables)",
            path.display(),
            base.tables.len()
        );
        Ok(Self {
            path,
            base: RwLock::new(base),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> Base {
        self.base.read().clone()
    }

    async fn persist(&self, base: &Base) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(base)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, &json))
            .await
            .map_err(|e| StoreError::Unavailable(format!("persist task failed: {}", e)))??;
        debug!("Persisted base to {}", self.path.display());
        Ok(())
    }
}

fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}

#[async_trait]
impl RecordStore for JsonFileStore {
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
        let _write = self.write_lock.lock().await;
        let next = {
            let mut next = self.base.read().clone();
            next.table_mut(table)?.apply_updates(updates)?;
            next
        };
        self.persist(&next).await?;
        *self.base.write() = next;
        Ok(())
    }
}
