//! A* search over the occupancy grid.
//!
//! Octile heuristic, 8- or 4-connected moves, and a turn penalty that favors
//! long straight runs over zig-zags of equal length.

use crate::config::{SearchSettings, TURN_PENALTY_FACTOR};
use crate::grid::GridConfig;
use crate::heap::MinHeap;
use crate::models::WorldPoint;
use crate::obstacles::OccupancyMask;
use crate::path::reconstruct_path;
use std::f64::consts::SQRT_2;

#[derive(Debug, Clone, Copy)]
struct Move {
    dx: i64,
    dz: i64,
    cost: f64,
}

const CARDINAL_MOVES: [Move; 4] = [
    Move { dx: 1, dz: 0, cost: 1.0 },
    Move { dx: -1, dz: 0, cost: 1.0 },
    Move { dx: 0, dz: 1, cost: 1.0 },
    Move { dx: 0, dz: -1, cost: 1.0 },
];

const ALL_MOVES: [Move; 8] = [
    Move { dx: 1, dz: 0, cost: 1.0 },
    Move { dx: -1, dz: 0, cost: 1.0 },
    Move { dx: 0, dz: 1, cost: 1.0 },
    Move { dx: 0, dz: -1, cost: 1.0 },
    Move { dx: 1, dz: 1, cost: SQRT_2 },
    Move { dx: -1, dz: 1, cost: SQRT_2 },
    Move { dx: 1, dz: -1, cost: SQRT_2 },
    Move { dx: -1, dz: -1, cost: SQRT_2 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFailure {
    /// Every reachable cell was expanded without finding the goal.
    Unreachable,
    /// The expansion budget ran out while unexpanded cells were still queued.
    IterationLimit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Reached {
        /// Cell centers from start to goal, uncompressed.
        path: Vec<WorldPoint>,
        explored: usize,
    },
    Failed {
        reason: SearchFailure,
        explored: usize,
    },
}

impl SearchOutcome {
    pub fn explored(&self) -> usize {
        match self {
            SearchOutcome::Reached { explored, .. } | SearchOutcome::Failed { explored, .. } => {
                *explored
            }
        }
    }
}

/// Octile distance between two cells, in world units.
pub fn octile_heuristic(cfg: &GridConfig, a: usize, b: usize) -> f64 {
    let (a_col, a_row) = cfg.index_to_coord(a);
    let (b_col, b_row) = cfg.index_to_coord(b);
    let dx = a_col.abs_diff(b_col) as f64;
    let dz = a_row.abs_diff(b_row) as f64;
    let (min_d, max_d) = if dx < dz { (dx, dz) } else { (dz, dx) };
    (SQRT_2 * min_d + (max_d - min_d)) * cfg.cell_size
}

/// Run A* from `start` to `goal` over an already rasterized mask.
///
/// All scratch state lives for the duration of this call.
pub fn search_grid(
    cfg: &GridConfig,
    mask: &OccupancyMask,
    start: usize,
    goal: usize,
    settings: &SearchSettings,
) -> SearchOutcome {
    let total_cells = cfg.total_cells();
    let cell_size = cfg.cell_size;
    let turn_penalty = cell_size * TURN_PENALTY_FACTOR;
    let moves: &[Move] = if settings.allow_diagonals {
        &ALL_MOVES
    } else {
        &CARDINAL_MOVES
    };

    let mut g_score = vec![f64::INFINITY; total_cells];
    let mut f_score = vec![f64::INFINITY; total_cells];
    let mut came_from: Vec<Option<usize>> = vec![None; total_cells];
    let mut closed = vec![false; total_cells];
    let mut open_set = MinHeap::new();

    g_score[start] = 0.0;
    f_score[start] = octile_heuristic(cfg, start, goal);
    open_set.push(start, f_score[start]);

    let mut explored = 0usize;

    while explored < settings.max_iterations {
        let Some(current) = open_set.pop() else {
            break;
        };
        let current_index = current.index;
        if closed[current_index] {
            continue;
        }

        if current_index == goal {
            let path = reconstruct_path(&came_from, current_index, cfg);
            tracing::debug!(
                explored,
                cells = path.len(),
                cost = g_score[current_index],
                "grid search reached goal"
            );
            return SearchOutcome::Reached { path, explored };
        }

        closed[current_index] = true;
        explored += 1;

        let (col, row) = cfg.index_to_coord(current_index);
        let (col, row) = (col as i64, row as i64);

        let incoming = came_from[current_index].map(|parent| {
            let (parent_col, parent_row) = cfg.index_to_coord(parent);
            (
                (col - parent_col as i64).signum(),
                (row - parent_row as i64).signum(),
            )
        });

        for step in moves {
            let nx = col + step.dx;
            let nz = row + step.dz;
            if !cfg.in_bounds(nx, nz) {
                continue;
            }
            let neighbor = cfg.coord_to_index(nx as usize, nz as usize);
            if mask.is_blocked(neighbor) || closed[neighbor] {
                continue;
            }

            let turning = match incoming {
                Some(direction) => direction != (0, 0) && direction != (step.dx, step.dz),
                None => false,
            };
            let tentative_g = g_score[current_index]
                + step.cost * cell_size
                + if turning { turn_penalty } else { 0.0 };
            if tentative_g >= g_score[neighbor] {
                continue;
            }

            came_from[neighbor] = Some(current_index);
            g_score[neighbor] = tentative_g;
            f_score[neighbor] = tentative_g + octile_heuristic(cfg, neighbor, goal);
            open_set.push(neighbor, f_score[neighbor]);
        }
    }

    let reason = if frontier_has_open_cells(&mut open_set, &closed) {
        SearchFailure::IterationLimit
    } else {
        SearchFailure::Unreachable
    };
    tracing::debug!(explored, ?reason, "grid search failed");
    SearchOutcome::Failed { reason, explored }
}

/// Drains the heap until an entry for a cell that was never closed shows up.
fn frontier_has_open_cells(open_set: &mut MinHeap, closed: &[bool]) -> bool {
    std::iter::from_fn(|| open_set.pop()).any(|cell| !closed[cell.index])
}
