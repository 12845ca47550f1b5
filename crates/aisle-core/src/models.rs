//! Warehouse snapshot models and planner results.
//!
//! Snapshots arrive from the warehouse data provider in camelCase JSON and are
//! consumed read-only; fields the planner has no use for are ignored.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A continuous floor coordinate in warehouse units (meters).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub z: f64,
}

impl WorldPoint {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn distance_to(&self, other: &WorldPoint) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Axis-aligned rectangle on the warehouse floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Rect {
    /// Footprint spanning `position .. position + size` on each axis.
    pub fn from_footprint(position_x: f64, position_z: f64, length: f64, width: f64) -> Self {
        Self {
            min_x: position_x,
            max_x: position_x + length,
            min_z: position_z,
            max_z: position_z + width,
        }
    }

    /// Grow (or shrink, for negative margins) the rectangle on all four sides.
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            max_x: self.max_x + margin,
            min_z: self.min_z - margin,
            max_z: self.max_z + margin,
        }
    }

    pub fn center(&self) -> WorldPoint {
        WorldPoint::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub zone_id: i64,
    #[serde(default)]
    pub zone_name: Option<String>,
    pub position_x: f64,
    pub position_z: f64,
    pub length: f64,
    pub width: f64,
}

impl Zone {
    pub fn footprint(&self) -> Rect {
        Rect::from_footprint(self.position_x, self.position_z, self.length, self.width)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shelf {
    pub shelf_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rack {
    pub rack_id: i64,
    /// Zone the rack stands in, when the provider reports it
    #[serde(default)]
    pub zone_id: Option<i64>,
    #[serde(default)]
    pub rack_name: Option<String>,
    pub position_x: f64,
    pub position_z: f64,
    pub length: f64,
    pub width: f64,
    #[serde(default)]
    pub shelves: Vec<Shelf>,
}

impl Rack {
    pub fn footprint(&self) -> Rect {
        Rect::from_footprint(self.position_x, self.position_z, self.length, self.width)
    }

    pub fn has_shelf(&self, shelf_id: i64) -> bool {
        self.shelves.iter().any(|shelf| shelf.shelf_id == shelf_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PalletLocation {
    pub pallet_id: i64,
    #[serde(default)]
    pub zone_id: Option<i64>,
    /// Set when the pallet sits on a rack shelf rather than on the ground
    #[serde(default)]
    pub shelf_id: Option<i64>,
    pub position_x: f64,
    pub position_z: f64,
    pub pallet_length: f64,
    pub pallet_width: f64,
}

impl PalletLocation {
    pub fn footprint(&self) -> Rect {
        Rect::from_footprint(
            self.position_x,
            self.position_z,
            self.pallet_length,
            self.pallet_width,
        )
    }
}

/// Read-only view of a warehouse layout for one planning call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseSnapshot {
    #[serde(default)]
    pub warehouse_id: Option<i64>,
    #[serde(default)]
    pub warehouse_name: Option<String>,
    pub length: f64,
    pub width: f64,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub racks: Vec<Rack>,
    #[serde(default)]
    pub pallets: Vec<PalletLocation>,
    #[serde(default)]
    pub checkin_position_x: Option<f64>,
    #[serde(default)]
    pub checkin_position_z: Option<f64>,
    #[serde(default)]
    pub checkin_length: Option<f64>,
    #[serde(default)]
    pub checkin_width: Option<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl WarehouseSnapshot {
    /// Empty warehouse with the given footprint.
    pub fn new(length: f64, width: f64) -> Self {
        Self {
            warehouse_id: None,
            warehouse_name: None,
            length,
            width,
            zones: Vec::new(),
            racks: Vec::new(),
            pallets: Vec::new(),
            checkin_position_x: None,
            checkin_position_z: None,
            checkin_length: None,
            checkin_width: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn find_pallet(&self, pallet_id: i64) -> Option<&PalletLocation> {
        self.pallets.iter().find(|pallet| pallet.pallet_id == pallet_id)
    }

    /// Rack owning the given shelf, if any.
    pub fn rack_for_shelf(&self, shelf_id: i64) -> Option<&Rack> {
        self.racks.iter().find(|rack| rack.has_shelf(shelf_id))
    }

    pub fn find_zone(&self, zone_id: i64) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.zone_id == zone_id)
    }

    /// Configured check-in point: the center of the check-in area when it has
    /// a positive size, otherwise its anchor position.
    pub fn checkin_point(&self) -> Option<WorldPoint> {
        let x = self.checkin_position_x?;
        let z = self.checkin_position_z?;
        match (self.checkin_length, self.checkin_width) {
            (Some(length), Some(width)) if length > 0.0 && width > 0.0 => {
                Some(WorldPoint::new(x + length / 2.0, z + width / 2.0))
            }
            _ => Some(WorldPoint::new(x, z)),
        }
    }
}

/// Blocked flags of a cell and its four cardinal neighbors.
///
/// Neighbors outside the grid count as blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodBlocked {
    pub self_cell: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Advisory snapshot of the grid around start and goal after a failed search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDiagnostic {
    pub start: WorldPoint,
    pub goal: WorldPoint,
    pub cols: usize,
    pub rows: usize,
    pub cell_size: f64,
    pub safety_margin: f64,
    pub start_cell: (usize, usize),
    pub goal_cell: (usize, usize),
    pub start_blocked: NeighborhoodBlocked,
    pub goal_blocked: NeighborhoodBlocked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResult {
    pub success: bool,
    pub points: Vec<WorldPoint>,
    pub distance: f64,
    pub explored_nodes: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<SearchDiagnostic>,
}

impl PathResult {
    pub fn failure(explored_nodes: usize) -> Self {
        Self {
            success: false,
            points: Vec::new(),
            distance: 0.0,
            explored_nodes,
            diagnostic: None,
        }
    }

    pub fn with_diagnostic(mut self, diagnostic: Option<SearchDiagnostic>) -> Self {
        self.diagnostic = diagnostic;
        self
    }
}
