//! Aisle core - grid path planning across a warehouse floor.
//!
//! Every planning call is a pure function of a warehouse snapshot and a set
//! of options: the grid, obstacle mask and search state are rebuilt per call
//! and nothing is shared between calls.

pub mod config;
pub mod grid;
pub mod heap;
pub mod models;
pub mod obstacles;
pub mod path;
pub mod search;
pub mod targeting;

pub use config::{PathfindingOptions, SearchSettings};
pub use grid::{GridCell, GridConfig, GridTooLarge};
pub use models::{
    NeighborhoodBlocked, PalletLocation, PathResult, Rack, Rect, SearchDiagnostic, Shelf,
    SnapshotError, WarehouseSnapshot, WorldPoint, Zone,
};
pub use obstacles::{build_obstacle_mask, OccupancyMask};
pub use path::{compress_path, path_distance};
pub use search::{octile_heuristic, search_grid, SearchFailure, SearchOutcome};
pub use targeting::{find_path_between_points, find_path_to_pallet};
