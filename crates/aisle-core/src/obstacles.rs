//! Stamps static warehouse geometry onto a per-call occupancy mask.

use crate::config::SearchSettings;
use crate::grid::GridConfig;
use crate::models::{NeighborhoodBlocked, Rect, WarehouseSnapshot};

/// One blocked flag per grid cell, indexed by flat cell index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyMask {
    cols: usize,
    rows: usize,
    blocked: Vec<bool>,
}

impl OccupancyMask {
    pub fn clear(cfg: &GridConfig) -> Self {
        Self {
            cols: cfg.cols,
            rows: cfg.rows,
            blocked: vec![false; cfg.total_cells()],
        }
    }

    pub fn is_blocked(&self, index: usize) -> bool {
        self.blocked.get(index).copied().unwrap_or(true)
    }

    pub fn set_blocked(&mut self, index: usize, blocked: bool) {
        if let Some(cell) = self.blocked.get_mut(index) {
            *cell = blocked;
        }
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|cell| **cell).count()
    }

    /// Mark every cell the rectangle touches.
    pub fn stamp_rect(&mut self, cfg: &GridConfig, rect: &Rect) {
        let (from_col, to_col) = cfg.col_span(rect.min_x, rect.max_x);
        let (from_row, to_row) = cfg.row_span(rect.min_z, rect.max_z);
        for row in from_row..=to_row {
            let row_offset = row * self.cols;
            for col in from_col..=to_col {
                self.blocked[row_offset + col] = true;
            }
        }
    }

    /// Clear a `(2 * radius + 1)` square around the cell, clipped to the grid.
    pub fn clear_neighborhood(&mut self, center: usize, radius: usize) {
        let row = center / self.cols;
        let col = center - row * self.cols;
        let radius = radius as i64;
        for dz in -radius..=radius {
            let nz = row as i64 + dz;
            if nz < 0 || nz >= self.rows as i64 {
                continue;
            }
            for dx in -radius..=radius {
                let nx = col as i64 + dx;
                if nx < 0 || nx >= self.cols as i64 {
                    continue;
                }
                self.blocked[nz as usize * self.cols + nx as usize] = false;
            }
        }
    }

    /// Blocked flags around a cell; "up" is towards smaller row.
    pub fn neighborhood(&self, center: usize) -> NeighborhoodBlocked {
        let row = (center / self.cols) as i64;
        let col = (center % self.cols) as i64;
        let get = |dx: i64, dz: i64| {
            let nx = col + dx;
            let nz = row + dz;
            if nx < 0 || nz < 0 || nx >= self.cols as i64 || nz >= self.rows as i64 {
                return true;
            }
            self.blocked[nz as usize * self.cols + nx as usize]
        };
        NeighborhoodBlocked {
            self_cell: self.is_blocked(center),
            left: get(-1, 0),
            right: get(1, 0),
            up: get(0, -1),
            down: get(0, 1),
        }
    }
}

/// Build the blocked-cell mask for one search.
///
/// Zones are stamped only when zone avoidance is on (skipping the allowed
/// zone); racks and pallets only when the safety margin is positive. Start and
/// goal plus their 8 neighbors are always left clear.
pub fn build_obstacle_mask(
    snapshot: &WarehouseSnapshot,
    cfg: &GridConfig,
    settings: &SearchSettings,
    start_index: usize,
    goal_index: usize,
) -> OccupancyMask {
    let mut mask = OccupancyMask::clear(cfg);
    let margin = settings.safety_margin.max(0.0);

    if settings.avoid_zones {
        for zone in &snapshot.zones {
            if settings.allowed_zone_id == Some(zone.zone_id) {
                continue;
            }
            mask.stamp_rect(cfg, &zone.footprint().expand(margin));
        }
    }

    if margin > 0.0 {
        for rack in &snapshot.racks {
            mask.stamp_rect(cfg, &rack.footprint().expand(margin));
        }
        for pallet in &snapshot.pallets {
            mask.stamp_rect(cfg, &pallet.footprint().expand(margin));
        }
    }

    mask.clear_neighborhood(start_index, 1);
    mask.clear_neighborhood(goal_index, 1);

    mask
}
