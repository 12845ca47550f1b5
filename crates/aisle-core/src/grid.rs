//! Occupancy grid geometry: world coordinates <-> flat cell indices.
//!
//! Cells are addressed by a single row-major index (`row * cols + col`); the
//! conversions in this module are the only place that arithmetic happens.

use crate::config::{DEFAULT_CELL_SIZE, MAX_GRID_CELLS};
use crate::models::WorldPoint;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    pub cols: usize,
    pub rows: usize,
    pub cell_size: f64,
    pub origin_x: f64,
    pub origin_z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("grid of {cols} x {rows} cells at {cell_size} m exceeds the {} cell limit", MAX_GRID_CELLS)]
pub struct GridTooLarge {
    pub cols: usize,
    pub rows: usize,
    pub cell_size: f64,
}

/// A cell addressed both by column/row and by flat index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub col: usize,
    pub row: usize,
    pub index: usize,
}

impl GridConfig {
    /// Grid covering a `length x width` warehouse anchored at the origin.
    ///
    /// Degenerate footprints still produce at least one column and row, and a
    /// non-positive cell size falls back to the default. Grids above
    /// `MAX_GRID_CELLS` are refused, so every index arithmetic on an accepted
    /// grid stays in range.
    pub fn for_footprint(length: f64, width: f64, cell_size: f64) -> Result<Self, GridTooLarge> {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            DEFAULT_CELL_SIZE
        };
        let cols = cells_along(length, cell_size);
        let rows = cells_along(width, cell_size);
        match cols.checked_mul(rows) {
            Some(total) if total <= MAX_GRID_CELLS => Ok(Self {
                cols,
                rows,
                cell_size,
                origin_x: 0.0,
                origin_z: 0.0,
            }),
            _ => Err(GridTooLarge {
                cols,
                rows,
                cell_size,
            }),
        }
    }

    pub fn total_cells(&self) -> usize {
        self.cols * self.rows
    }

    pub fn in_bounds(&self, col: i64, row: i64) -> bool {
        col >= 0 && row >= 0 && (col as usize) < self.cols && (row as usize) < self.rows
    }

    pub fn coord_to_index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    pub fn index_to_coord(&self, index: usize) -> (usize, usize) {
        let row = index / self.cols;
        (index - row * self.cols, row)
    }

    /// Cell containing a world point, clamped per axis into the grid.
    pub fn world_to_grid(&self, x: f64, z: f64) -> GridCell {
        let col = clamp_axis((x - self.origin_x) / self.cell_size, self.cols);
        let row = clamp_axis((z - self.origin_z) / self.cell_size, self.rows);
        GridCell {
            col,
            row,
            index: self.coord_to_index(col, row),
        }
    }

    /// Center of the given cell.
    pub fn grid_to_world(&self, col: usize, row: usize) -> WorldPoint {
        WorldPoint {
            x: self.origin_x + (col as f64 + 0.5) * self.cell_size,
            z: self.origin_z + (row as f64 + 0.5) * self.cell_size,
        }
    }

    pub fn index_to_world(&self, index: usize) -> WorldPoint {
        let (col, row) = self.index_to_coord(index);
        self.grid_to_world(col, row)
    }

    /// Inclusive column range covered (fully or partially) by `[min_x, max_x]`.
    pub fn col_span(&self, min_x: f64, max_x: f64) -> (usize, usize) {
        (
            clamp_axis((min_x - self.origin_x) / self.cell_size, self.cols),
            clamp_upper_edge((max_x - self.origin_x) / self.cell_size, self.cols),
        )
    }

    /// Inclusive row range covered (fully or partially) by `[min_z, max_z]`.
    pub fn row_span(&self, min_z: f64, max_z: f64) -> (usize, usize) {
        (
            clamp_axis((min_z - self.origin_z) / self.cell_size, self.rows),
            clamp_upper_edge((max_z - self.origin_z) / self.cell_size, self.rows),
        )
    }
}

fn cells_along(extent: f64, cell_size: f64) -> usize {
    if !extent.is_finite() || extent <= 0.0 {
        return 1;
    }
    ((extent / cell_size).ceil() as usize).max(1)
}

fn clamp_axis(scaled: f64, count: usize) -> usize {
    // NaN casts to 0.
    scaled.floor().clamp(0.0, (count - 1) as f64) as usize
}

fn clamp_upper_edge(scaled: f64, count: usize) -> usize {
    (scaled.ceil() - 1.0).clamp(0.0, (count - 1) as f64) as usize
}
