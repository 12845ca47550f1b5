//! Warehouse snapshot endpoints.
//!
//! The data provider pushes layout snapshots here; planning endpoints read
//! whatever snapshot is current when the request arrives.

use aisle_core::WarehouseSnapshot;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::ApiError;
use crate::state::{AppState, SnapshotSummary, StoreOutcome};

/// Store or replace a warehouse snapshot.
pub async fn put_snapshot(
    State(state): State<Arc<AppState>>,
    Path(warehouse_id): Path<i64>,
    Json(snapshot): Json<WarehouseSnapshot>,
) -> (StatusCode, Json<SnapshotSummary>) {
    let summary = SnapshotSummary::describe(warehouse_id, &snapshot, chrono::Utc::now());
    let status = match state.store_snapshot(warehouse_id, snapshot) {
        StoreOutcome::Created => StatusCode::CREATED,
        StoreOutcome::Replaced => StatusCode::OK,
    };
    tracing::info!(
        "Stored snapshot for warehouse {} ({} racks, {} pallets)",
        warehouse_id,
        summary.racks,
        summary.pallets
    );
    (status, Json(summary))
}

/// Get the current snapshot for a warehouse.
pub async fn get_snapshot(
    State(state): State<Arc<AppState>>,
    Path(warehouse_id): Path<i64>,
) -> Result<Json<WarehouseSnapshot>, ApiError> {
    state
        .get_snapshot(warehouse_id)
        .map(|snapshot| Json(snapshot.as_ref().clone()))
        .ok_or(ApiError::WarehouseNotFound(warehouse_id))
}

/// Delete a warehouse snapshot.
pub async fn delete_snapshot(
    State(state): State<Arc<AppState>>,
    Path(warehouse_id): Path<i64>,
) -> StatusCode {
    if state.remove_snapshot(warehouse_id) {
        tracing::info!("Deleted snapshot for warehouse {}", warehouse_id);
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// List stored snapshots.
pub async fn list_snapshots(State(state): State<Arc<AppState>>) -> Json<Vec<SnapshotSummary>> {
    Json(state.list_snapshots())
}
