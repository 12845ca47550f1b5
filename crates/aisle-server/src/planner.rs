//! Runs planner calls off the async runtime.
//!
//! Searches are synchronous and bounded only by their iteration cap, so each
//! one goes to the blocking pool with its own clone of the snapshot.

use aisle_core::{
    find_path_between_points, find_path_to_pallet, PathResult, PathfindingOptions,
    WarehouseSnapshot, WorldPoint,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("planner task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointPathRequest {
    pub start: WorldPoint,
    pub goal: WorldPoint,
    #[serde(default)]
    pub options: Option<PathfindingOptions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PalletPathRequest {
    #[serde(default)]
    pub start: Option<WorldPoint>,
    #[serde(default)]
    pub options: Option<PathfindingOptions>,
}

fn effective_options(config: &Config, requested: Option<PathfindingOptions>) -> PathfindingOptions {
    requested
        .unwrap_or_default()
        .or(&config.default_options)
}

pub async fn plan_between_points(
    snapshot: Arc<WarehouseSnapshot>,
    config: &Config,
    request: PointPathRequest,
) -> Result<PathResult, PlannerError> {
    let options = effective_options(config, request.options);
    let started = Instant::now();
    let result = tokio::task::spawn_blocking(move || {
        find_path_between_points(&snapshot, request.start, request.goal, &options)
    })
    .await?;

    tracing::info!(
        success = result.success,
        explored = result.explored_nodes,
        distance = result.distance,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "point-to-point plan"
    );
    Ok(result)
}

pub async fn plan_to_pallet(
    snapshot: Arc<WarehouseSnapshot>,
    config: &Config,
    pallet_id: i64,
    request: PalletPathRequest,
) -> Result<PathResult, PlannerError> {
    let options = effective_options(config, request.options);
    let started = Instant::now();
    let result = tokio::task::spawn_blocking(move || {
        find_path_to_pallet(&snapshot, pallet_id, request.start, &options)
    })
    .await?;

    tracing::info!(
        pallet_id,
        success = result.success,
        explored = result.explored_nodes,
        distance = result.distance,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "pallet plan"
    );
    Ok(result)
}
