//! Process-local memory store backed by `DashMap`.
//!
//! Records live only as long as the process. Each owner maps to a `Vec` of
//! records in insertion order. `DashMap` shards its locks, so operations on
//! different owners proceed independently, and the cross-owner scans in
//! `find_by_id` / `replace_in_place` lock one shard at a time. Records are
//! cloned on read so no guard outlives a call.

use std::sync::Arc;

use dashmap::DashMap;

use mnemo_types::error::RepositoryError;
use mnemo_types::memory::{MemoryId, MemoryRecord};

use super::store::MemoryStore;

/// Concurrent in-memory implementation of [`MemoryStore`].
///
/// Cloning produces a shared view of the same records (backed by `Arc`).
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemoryStore {
    records: Arc<DashMap<String, Vec<MemoryRecord>>>,
}

impl InMemoryMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of owners with at least one record.
    pub fn owner_count(&self) -> usize {
        self.records.len()
    }
}

impl MemoryStore for InMemoryMemoryStore {
    async fn append_all(
        &self,
        owner_id: &str,
        entries: Vec<(String, Vec<f32>)>,
    ) -> Result<Vec<MemoryId>, RepositoryError> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<MemoryRecord> = entries
            .into_iter()
            .map(|(text, embedding)| MemoryRecord::new(owner_id, text, embedding))
            .collect();
        let ids = records.iter().map(|r| r.id).collect();

        // One entry guard for the whole batch.
        self.records
            .entry(owner_id.to_string())
            .or_default()
            .extend(records);
        Ok(ids)
    }

    async fn get(&self, owner_id: &str) -> Result<Vec<MemoryRecord>, RepositoryError> {
        Ok(self
            .records
            .get(owner_id)
            .map(|r| r.value().clone())
            .unwrap_or_default())
    }

    async fn find_by_id(&self, id: &MemoryId) -> Result<Option<MemoryRecord>, RepositoryError> {
        Ok(self
            .records
            .iter()
            .find_map(|entry| entry.value().iter().find(|r| r.id == *id).cloned()))
    }

    async fn replace_in_place(
        &self,
        id: &MemoryId,
        text: &str,
        embedding: Vec<f32>,
    ) -> Result<bool, RepositoryError> {
        for mut entry in self.records.iter_mut() {
            if let Some(record) = entry.value_mut().iter_mut().find(|r| r.id == *id) {
                record.text = text.to_string();
                record.embedding = embedding;
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn delete_all(&self, owner_id: &str) -> Result<usize, RepositoryError> {
        Ok(self
            .records
            .remove(owner_id)
            .map(|(_, records)| records.len())
            .unwrap_or(0))
    }
}
