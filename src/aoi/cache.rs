//! In-memory entity cache for AOI records
//!
//! The cache is the single source of truth for the UI layer. Records keep
//! insertion order; the rendering layer only ever reads snapshots, all
//! mutation goes through the methods here.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use super::types::{AoiKey, AoiRecord, RecordStatus};

#[derive(Debug, Default)]
struct CacheInner {
    records: Vec<AoiRecord>,
    /// Confirmed ids removed locally since the last wholesale replace. A
    /// reconciliation refresh filters these out of the incoming snapshot so
    /// it cannot resurrect a record the user just deleted.
    tombstones: HashSet<i64>,
}

/// Ordered, shared collection of AOI records
#[derive(Debug, Clone, Default)]
pub struct AoiCache {
    inner: Arc<Mutex<CacheInner>>,
}

impl AoiCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the cache contents, in display order
    pub fn list(&self) -> Vec<AoiRecord> {
        self.inner.lock().unwrap().records.clone()
    }

    /// Number of cached records
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch a record by key
    pub fn get(&self, key: AoiKey) -> Option<AoiRecord> {
        self.inner
            .lock()
            .unwrap()
            .records
            .iter()
            .find(|record| record.key == key)
            .cloned()
    }

    /// Insert a record, or replace the record with the same key in place
    pub fn upsert(&self, record: AoiRecord) {
        let mut inner = self.inner.lock().unwrap();
        match inner.records.iter_mut().find(|r| r.key == record.key) {
            Some(existing) => *existing = record,
            None => inner.records.push(record),
        }
    }

    /// Remove a record by key. Confirmed ids are tombstoned so a pending
    /// reconciliation cannot bring them back.
    pub fn remove(&self, key: AoiKey) {
        let mut inner = self.inner.lock().unwrap();
        inner.records.retain(|record| record.key != key);
        if let AoiKey::Confirmed(id) = key {
            inner.tombstones.insert(id);
        }
    }

    /// Update the transient status of a record; no-op when the key is absent
    pub fn patch_status(&self, key: AoiKey, status: RecordStatus) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner.records.iter_mut().find(|r| r.key == key) {
            record.status = status;
        }
    }

    /// Wholesale replace with an authoritative snapshot. Used by
    /// user-initiated refreshes; clears any pending tombstones.
    pub fn replace_all(&self, records: Vec<AoiRecord>) {
        let mut inner = self.inner.lock().unwrap();
        inner.records = records;
        inner.tombstones.clear();
    }

    /// Replace with an authoritative snapshot fetched by a scheduled
    /// reconciliation, dropping ids removed locally since the last replace.
    pub fn reconcile(&self, records: Vec<AoiRecord>) {
        let mut inner = self.inner.lock().unwrap();
        let tombstones = std::mem::take(&mut inner.tombstones);
        inner.records = records
            .into_iter()
            .filter(|record| match record.key {
                AoiKey::Confirmed(id) => !tombstones.contains(&id),
                AoiKey::Pending(_) => true,
            })
            .collect();
    }

    /// Drop everything. A failed refresh degrades to an empty cache rather
    /// than keeping stale data that could hide confirmed deletions.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.records.clear();
        inner.tombstones.clear();
    }
}
