use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use clinica_core::tables::column;

use crate::backend::Backend;
use crate::error::StorageError;
use crate::query::Query;

/// In-process row store with the same observable behaviour as the hosted
/// backend: ids and creation timestamps are assigned on insert, filters
/// and ordering follow [`Query`].
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: RwLock<HashMap<String, Vec<Value>>>,
    offline: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every call fails with [`StorageError::Network`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Every row of `table`, in insertion order.
    pub async fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .read()
            .await
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    fn check_online(&self) -> Result<(), StorageError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StorageError::Network("backend unreachable".to_string()));
        }
        Ok(())
    }
}

impl Backend for MemoryBackend {
    async fn select(&self, query: &Query) -> Result<Vec<Value>, StorageError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        let mut rows: Vec<Value> = tables
            .get(query.table_name())
            .map(|rows| rows.iter().filter(|r| query.matches(r)).cloned().collect())
            .unwrap_or_default();
        query.sort(&mut rows);
        if let Some(limit) = query.max_rows() {
            rows.truncate(limit);
        }
        debug!(table = query.table_name(), count = rows.len(), "memory select");
        Ok(rows)
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, StorageError> {
        self.check_online()?;
        let Value::Object(mut fields) = row else {
            return Err(StorageError::InvalidRow(format!(
                "insert into {table} expects an object"
            )));
        };
        if !fields.get(column::ID).is_some_and(|id| !id.is_null()) {
            fields.insert(column::ID.to_string(), Value::String(Uuid::new_v4().to_string()));
        }
        if !fields.get(column::CREATED_AT).is_some_and(|at| !at.is_null()) {
            fields.insert(
                column::CREATED_AT.to_string(),
                Value::String(jiff::Timestamp::now().to_string()),
            );
        }

        let stored = Value::Object(fields);
        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .push(stored.clone());
        debug!(table, "memory insert");
        Ok(stored)
    }

    async fn update(&self, query: &Query, patch: Value) -> Result<Vec<Value>, StorageError> {
        self.check_online()?;
        let Value::Object(patch) = patch else {
            return Err(StorageError::InvalidRow(format!(
                "update of {} expects an object",
                query.table_name()
            )));
        };
        let mut tables = self.tables.write().await;
        let mut updated = Vec::new();
        if let Some(rows) = tables.get_mut(query.table_name()) {
            for row in rows.iter_mut().filter(|r| query.matches(r)) {
                if let Value::Object(fields) = row {
                    for (key, value) in &patch {
                        fields.insert(key.clone(), value.clone());
                    }
                }
                updated.push(row.clone());
            }
        }
        debug!(table = query.table_name(), count = updated.len(), "memory update");
        Ok(updated)
    }

    async fn delete(&self, query: &Query) -> Result<usize, StorageError> {
        self.check_online()?;
        let mut tables = self.tables.write().await;
        let removed = match tables.get_mut(query.table_name()) {
            Some(rows) => {
                let before = rows.len();
                rows.retain(|r| !query.matches(r));
                before - rows.len()
            }
            None => 0,
        };
        debug!(table = query.table_name(), removed, "memory delete");
        Ok(removed)
    }
}
