//! In-memory snapshot store using DashMap.

use aisle_core::WarehouseSnapshot;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cache::{prune_cache, CacheEntry};
use crate::config::Config;

/// A warehouse snapshot as uploaded by the data provider.
#[derive(Debug, Clone)]
pub struct StoredSnapshot {
    pub snapshot: Arc<WarehouseSnapshot>,
    pub loaded_at: DateTime<Utc>,
    stored_at: Instant,
}

impl CacheEntry for StoredSnapshot {
    fn stored_at(&self) -> Instant {
        self.stored_at
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSummary {
    pub warehouse_id: i64,
    pub warehouse_name: Option<String>,
    pub loaded_at: DateTime<Utc>,
    pub racks: usize,
    pub pallets: usize,
    pub zones: usize,
}

impl SnapshotSummary {
    pub fn describe(warehouse_id: i64, snapshot: &WarehouseSnapshot, loaded_at: DateTime<Utc>) -> Self {
        Self {
            warehouse_id,
            warehouse_name: snapshot.warehouse_name.clone(),
            loaded_at,
            racks: snapshot.racks.len(),
            pallets: snapshot.pallets.len(),
            zones: snapshot.zones.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Created,
    Replaced,
}

/// Application state - thread-safe store of warehouse snapshots.
pub struct AppState {
    snapshots: DashMap<i64, StoredSnapshot>,
    config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            snapshots: DashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Store or replace the snapshot for a warehouse.
    ///
    /// In-flight searches keep the `Arc` they already cloned.
    pub fn store_snapshot(&self, warehouse_id: i64, snapshot: WarehouseSnapshot) -> StoreOutcome {
        let entry = StoredSnapshot {
            snapshot: Arc::new(snapshot),
            loaded_at: Utc::now(),
            stored_at: Instant::now(),
        };
        let outcome = match self.snapshots.insert(warehouse_id, entry) {
            Some(_) => StoreOutcome::Replaced,
            None => StoreOutcome::Created,
        };

        let evicted = prune_cache(
            &self.snapshots,
            self.config.max_snapshots.max(1),
            Duration::from_secs(self.config.snapshot_ttl_s),
        );
        if evicted > 0 {
            tracing::info!("Evicted {} stale warehouse snapshots", evicted);
        }
        outcome
    }

    pub fn get_snapshot(&self, warehouse_id: i64) -> Option<Arc<WarehouseSnapshot>> {
        self.snapshots
            .get(&warehouse_id)
            .map(|entry| entry.snapshot.clone())
    }

    pub fn remove_snapshot(&self, warehouse_id: i64) -> bool {
        self.snapshots.remove(&warehouse_id).is_some()
    }

    pub fn list_snapshots(&self) -> Vec<SnapshotSummary> {
        let mut summaries: Vec<SnapshotSummary> = self
            .snapshots
            .iter()
            .map(|entry| SnapshotSummary::describe(*entry.key(), &entry.snapshot, entry.loaded_at))
            .collect();
        summaries.sort_by_key(|summary| summary.warehouse_id);
        summaries
    }
}
