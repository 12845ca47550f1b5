//! Planner entry points: point-to-point and point-to-pallet.
//!
//! Pallet targets are turned into one or more standing points next to the
//! rack (or the pallet itself, for ground pallets) and the shortest successful
//! search among them wins.

use crate::config::{
    PathfindingOptions, SearchSettings, CANDIDATE_DEDUP_EPSILON, INTERIOR_INSET, SIDE_MARGIN,
    STAND_OFF_DISTANCE,
};
use crate::grid::{GridCell, GridConfig};
use crate::models::{PathResult, Rack, Rect, SearchDiagnostic, WarehouseSnapshot, WorldPoint, Zone};
use crate::obstacles::{build_obstacle_mask, OccupancyMask};
use crate::path::{compress_path, path_distance};
use crate::search::{search_grid, SearchOutcome};

/// Clamp without panicking on an inverted range: values below `min` take
/// `min`, otherwise values above `max` take `max`.
fn clamp_range(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Plan between two world points.
pub fn find_path_between_points(
    snapshot: &WarehouseSnapshot,
    start: WorldPoint,
    goal: WorldPoint,
    options: &PathfindingOptions,
) -> PathResult {
    let settings = options.resolve();
    let cfg = match GridConfig::for_footprint(snapshot.length, snapshot.width, settings.cell_size) {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::warn!(
                length = snapshot.length,
                width = snapshot.width,
                "refusing to plan: {}",
                err
            );
            return PathResult::failure(0);
        }
    };

    let start_cell = cfg.world_to_grid(start.x, start.z);
    let goal_cell = cfg.world_to_grid(goal.x, goal.z);
    let mask = build_obstacle_mask(snapshot, &cfg, &settings, start_cell.index, goal_cell.index);

    match search_grid(&cfg, &mask, start_cell.index, goal_cell.index, &settings) {
        SearchOutcome::Reached { path, explored } => {
            let points = compress_path(&path);
            let distance = path_distance(&points);
            PathResult {
                success: true,
                points,
                distance,
                explored_nodes: explored,
                diagnostic: None,
            }
        }
        SearchOutcome::Failed { reason, explored } => {
            let diagnostic = failure_diagnostic(
                start, goal, &cfg, &settings, &mask, start_cell, goal_cell,
            );
            tracing::warn!(
                ?reason,
                start_x = start.x,
                start_z = start.z,
                goal_x = goal.x,
                goal_z = goal.z,
                cols = cfg.cols,
                rows = cfg.rows,
                cell_size = cfg.cell_size,
                safety_margin = settings.safety_margin,
                explored,
                blocked_cells = mask.blocked_count(),
                start_blocked = ?diagnostic.start_blocked,
                goal_blocked = ?diagnostic.goal_blocked,
                "failed to find path"
            );
            PathResult::failure(explored).with_diagnostic(Some(diagnostic))
        }
    }
}

fn failure_diagnostic(
    start: WorldPoint,
    goal: WorldPoint,
    cfg: &GridConfig,
    settings: &SearchSettings,
    mask: &OccupancyMask,
    start_cell: GridCell,
    goal_cell: GridCell,
) -> SearchDiagnostic {
    SearchDiagnostic {
        start,
        goal,
        cols: cfg.cols,
        rows: cfg.rows,
        cell_size: cfg.cell_size,
        safety_margin: settings.safety_margin,
        start_cell: (start_cell.col, start_cell.row),
        goal_cell: (goal_cell.col, goal_cell.row),
        start_blocked: mask.neighborhood(start_cell.index),
        goal_blocked: mask.neighborhood(goal_cell.index),
    }
}

/// Where a pallet trip starts when the caller gives no explicit start: the
/// check-in point if configured, otherwise the warehouse origin.
pub fn resolve_start(snapshot: &WarehouseSnapshot, start: Option<WorldPoint>) -> WorldPoint {
    start
        .or_else(|| snapshot.checkin_point())
        .unwrap_or_default()
}

/// Standing point in front of or behind a rack, on the Z side facing `source`.
///
/// X follows the pallet center along the rack face, kept `SIDE_MARGIN` away
/// from the rack ends, then the point is pulled inside the rack's zone (or the
/// warehouse when the zone is unknown).
pub fn rack_standing_point(
    source: WorldPoint,
    rack: &Rack,
    pallet_center_x: f64,
    warehouse_length: f64,
    warehouse_width: f64,
    zone: Option<&Zone>,
) -> WorldPoint {
    let rect = rack.footprint();

    let z = if source.z <= rect.center().z {
        rect.min_z - STAND_OFF_DISTANCE
    } else {
        rect.max_z + STAND_OFF_DISTANCE
    };
    let x = clamp_range(
        pallet_center_x,
        rect.min_x + SIDE_MARGIN,
        rect.max_x - SIDE_MARGIN,
    );

    let bounds = match zone {
        Some(zone) => zone.footprint().expand(-INTERIOR_INSET),
        None => Rect::from_footprint(0.0, 0.0, warehouse_length, warehouse_width)
            .expand(-INTERIOR_INSET),
    };
    WorldPoint {
        x: clamp_range(x, bounds.min_x, bounds.max_x),
        z: clamp_range(z, bounds.min_z, bounds.max_z),
    }
}

/// Up to four standing points around a ground pallet: left, right, front
/// (smaller Z) and back (larger Z), with near-duplicates removed.
pub fn ground_standing_candidates(
    source: WorldPoint,
    footprint: &Rect,
    warehouse_length: f64,
    warehouse_width: f64,
) -> Vec<WorldPoint> {
    let x_limit = warehouse_length - INTERIOR_INSET;
    let z_limit = warehouse_width - INTERIOR_INSET;
    let along_z = clamp_range(
        source.z,
        footprint.min_z + SIDE_MARGIN,
        footprint.max_z - SIDE_MARGIN,
    );
    let along_x = clamp_range(
        source.x,
        footprint.min_x + SIDE_MARGIN,
        footprint.max_x - SIDE_MARGIN,
    );

    let candidates = [
        WorldPoint::new(
            clamp_range(footprint.min_x - STAND_OFF_DISTANCE, INTERIOR_INSET, x_limit),
            along_z,
        ),
        WorldPoint::new(
            clamp_range(footprint.max_x + STAND_OFF_DISTANCE, INTERIOR_INSET, x_limit),
            along_z,
        ),
        WorldPoint::new(
            along_x,
            clamp_range(footprint.min_z - STAND_OFF_DISTANCE, INTERIOR_INSET, z_limit),
        ),
        WorldPoint::new(
            along_x,
            clamp_range(footprint.max_z + STAND_OFF_DISTANCE, INTERIOR_INSET, z_limit),
        ),
    ];

    let mut unique: Vec<WorldPoint> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let duplicate = unique.iter().any(|existing| {
            (existing.x - candidate.x).abs() < CANDIDATE_DEDUP_EPSILON
                && (existing.z - candidate.z).abs() < CANDIDATE_DEDUP_EPSILON
        });
        if !duplicate {
            unique.push(candidate);
        }
    }
    unique
}

/// Plan from `start` (or the default start) to the best place to stand when
/// picking up `pallet_id`.
///
/// Pallet approaches always travel cardinally and may cross zones.
pub fn find_path_to_pallet(
    snapshot: &WarehouseSnapshot,
    pallet_id: i64,
    start: Option<WorldPoint>,
    options: &PathfindingOptions,
) -> PathResult {
    let Some(pallet) = snapshot.find_pallet(pallet_id) else {
        tracing::debug!(pallet_id, "pallet not found in snapshot");
        return PathResult::failure(0);
    };

    let source = resolve_start(snapshot, start);
    let approach = options.for_pallet_approach();
    let pallet_center_x = pallet.position_x + pallet.pallet_length / 2.0;

    let rack = pallet
        .shelf_id
        .and_then(|shelf_id| snapshot.rack_for_shelf(shelf_id));

    if let Some(rack) = rack {
        let zone = rack.zone_id.and_then(|zone_id| snapshot.find_zone(zone_id));
        let goal = rack_standing_point(
            source,
            rack,
            pallet_center_x,
            snapshot.length,
            snapshot.width,
            zone,
        );
        tracing::debug!(
            pallet_id,
            rack_id = rack.rack_id,
            goal_x = goal.x,
            goal_z = goal.z,
            "planning to rack standing point"
        );
        return find_path_between_points(snapshot, source, goal, &approach);
    }

    let candidates =
        ground_standing_candidates(source, &pallet.footprint(), snapshot.length, snapshot.width);

    let mut best: Option<PathResult> = None;
    let mut last_diagnostic = None;
    let mut explored_total = 0usize;

    for goal in candidates {
        let result = find_path_between_points(snapshot, source, goal, &approach);
        explored_total += result.explored_nodes;
        tracing::debug!(
            pallet_id,
            goal_x = goal.x,
            goal_z = goal.z,
            success = result.success,
            distance = result.distance,
            "ground pallet candidate"
        );

        if !result.success || result.points.len() < 2 {
            if result.diagnostic.is_some() {
                last_diagnostic = result.diagnostic;
            }
            continue;
        }

        let better = best
            .as_ref()
            .map_or(true, |current| result.distance < current.distance);
        if better {
            best = Some(result);
        }
    }

    match best {
        Some(best) => PathResult {
            explored_nodes: explored_total,
            ..best
        },
        None => PathResult::failure(explored_total).with_diagnostic(last_diagnostic),
    }
}
