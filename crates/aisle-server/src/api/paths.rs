//! Path planning endpoints.
//!
//! An unreachable goal is not an HTTP error: the planner's `PathResult`
//! comes back with `success: false` and a 200.

use aisle_core::PathResult;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::ApiError;
use crate::planner::{self, PalletPathRequest, PointPathRequest};
use crate::state::AppState;

pub async fn plan_path(
    State(state): State<Arc<AppState>>,
    Path(warehouse_id): Path<i64>,
    Json(request): Json<PointPathRequest>,
) -> Result<Json<PathResult>, ApiError> {
    let snapshot = state
        .get_snapshot(warehouse_id)
        .ok_or(ApiError::WarehouseNotFound(warehouse_id))?;
    let result = planner::plan_between_points(snapshot, state.config(), request).await?;
    Ok(Json(result))
}

/// Plan to a stand-off point in front of a pallet. The body may be empty.
pub async fn plan_pallet_path(
    State(state): State<Arc<AppState>>,
    Path((warehouse_id, pallet_id)): Path<(i64, i64)>,
    request: Option<Json<PalletPathRequest>>,
) -> Result<Json<PathResult>, ApiError> {
    let snapshot = state
        .get_snapshot(warehouse_id)
        .ok_or(ApiError::WarehouseNotFound(warehouse_id))?;
    let request = request.map(|Json(request)| request).unwrap_or_default();
    let result = planner::plan_to_pallet(snapshot, state.config(), pallet_id, request).await?;
    Ok(Json(result))
}
