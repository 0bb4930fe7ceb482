//! Table model shared by the in-memory and file-backed stores

use serde::{Deserialize, Serialize};

use super::{MAX_RECORDS_PER_WRITE, StoreError};
use crate::core::types::{PermissionCheck, Record, RecordUpdate};

/// A named collection of tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Base {
    #[serde(default)]
    pub tables: Vec<Table>,
}

/// Field definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(default)]
    pub read_only: bool,
}

impl FieldSchema {
    pub fn writable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            read_only: false,
        }
    }

    pub fn read_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            read_only: true,
        }
    }
}

/// Ordered records plus the field schema that governs writes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
    #[serde(default)]
    pub records: Vec<Record>,
}

impl Base {
    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    pub fn table(&self, name: &str) -> Result<&Table, StoreError> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table, StoreError> {
        self.tables
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    pub fn check_permissions_for_update(&self, table: &str, fields: &[&str]) -> PermissionCheck {
        match self.table(table) {
            Ok(table) => table.check_permissions_for_update(fields),
            Err(e) => PermissionCheck::denied(e.to_string()),
        }
    }
}

impl Table {
    pub fn new(name: impl Into<String>, fields: Vec<FieldSchema>) -> Self {
        Self {
            name: name.into(),
            fields,
            records: Vec::new(),
        }
    }

    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    fn writable_reason(&self, field: &str) -> Option<String> {
        match self.fields.iter().find(|f| f.name == field) {
            None => Some(format!("No field named '{}' in table '{}'", field, self.name)),
            Some(schema) if schema.read_only => Some(format!("Field '{}' is read-only", field)),
            Some(_) => None,
        }
    }

    /// First failing field decides the reason
    pub fn check_permissions_for_update(&self, fields: &[&str]) -> PermissionCheck {
        fields
            .iter()
            .find_map(|field| self.writable_reason(field))
            .map(PermissionCheck::denied)
            .unwrap_or_else(PermissionCheck::allowed)
    }

    /// Records in table order, carrying only `fields` (all fields when empty)
    pub fn select(&self, fields: &[&str]) -> Vec<Record> {
        self.records
            .iter()
            .map(|record| {
                if fields.is_empty() {
                    return record.clone();
                }
                let mut projected = Record::new(record.id.clone());
                for field in fields {
                    if let Some(value) = record.fields.get(*field) {
                        projected.fields.insert(field.to_string(), value.clone());
                    }
                }
                projected
            })
            .collect()
    }

    /// Apply one write call. Every update is validated before anything is
    /// changed, so a rejected call leaves the table untouched.
    pub fn apply_updates(&mut self, updates: &[RecordUpdate]) -> Result<(), StoreError> {
        if updates.len() > MAX_RECORDS_PER_WRITE {
            return Err(StoreError::BatchTooLarge {
                max: MAX_RECORDS_PER_WRITE,
                actual: updates.len(),
            });
        }

        let mut positions = Vec::with_capacity(updates.len());
        for update in updates {
            let position = self
                .records
                .iter()
                .position(|r| r.id == update.id)
                .ok_or_else(|| StoreError::RecordNotFound {
                    table: self.name.clone(),
                    id: update.id.clone(),
                })?;
            for field in update.fields.keys() {
                if let Some(reason) = self.writable_reason(field) {
                    return Err(StoreError::FieldNotWritable {
                        table: self.name.clone(),
                        field: field.clone(),
                        reason,
                    });
                }
            }
            positions.push(position);
        }

        for (position, update) in positions.into_iter().zip(updates) {
            let record = &mut self.records[position];
            for (field, value) in &update.fields {
                record.fields.insert(field.clone(), value.clone());
            }
        }
        Ok(())
    }
}
