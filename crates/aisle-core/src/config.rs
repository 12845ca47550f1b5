//! Per-call planner options and tuning constants.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CELL_SIZE: f64 = 0.5;
pub const DEFAULT_SAFETY_MARGIN: f64 = 0.25;
pub const DEFAULT_MAX_ITERATIONS: usize = 200_000;
/// Largest grid a single search may allocate, in cells.
pub const MAX_GRID_CELLS: usize = 4_000_000;

/// Extra cost, in cells, for changing direction while expanding a neighbor.
pub const TURN_PENALTY_FACTOR: f64 = 1.5;
/// Distance between a rack/pallet edge and the agent's standing point.
pub const STAND_OFF_DISTANCE: f64 = 0.9;
/// Keeps standing points away from rack/pallet corners.
pub const SIDE_MARGIN: f64 = 0.4;
/// Inset applied when clamping standing points into a zone or the warehouse.
pub const INTERIOR_INSET: f64 = 0.1;
/// Candidate standing points closer than this on both axes are duplicates.
pub const CANDIDATE_DEDUP_EPSILON: f64 = 1e-3;

/// Options a caller may supply for one planning call.
///
/// Every field is optional; missing or unusable values fall back to the
/// defaults when resolved into [`SearchSettings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathfindingOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_margin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avoid_zones: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_zone_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_diagonals: Option<bool>,
}

impl PathfindingOptions {
    /// Fill fields missing here from `defaults`.
    pub fn or(&self, defaults: &PathfindingOptions) -> PathfindingOptions {
        PathfindingOptions {
            cell_size: self.cell_size.or(defaults.cell_size),
            safety_margin: self.safety_margin.or(defaults.safety_margin),
            max_iterations: self.max_iterations.or(defaults.max_iterations),
            avoid_zones: self.avoid_zones.or(defaults.avoid_zones),
            allowed_zone_id: self.allowed_zone_id.or(defaults.allowed_zone_id),
            allow_diagonals: self.allow_diagonals.or(defaults.allow_diagonals),
        }
    }

    /// Options used when walking up to a pallet: cardinal moves only, and the
    /// destination zone may be crossed.
    pub fn for_pallet_approach(&self) -> PathfindingOptions {
        PathfindingOptions {
            allow_diagonals: Some(false),
            avoid_zones: Some(false),
            allowed_zone_id: None,
            ..self.clone()
        }
    }

    pub fn resolve(&self) -> SearchSettings {
        let cell_size = self
            .cell_size
            .filter(|value| value.is_finite() && *value > 0.0)
            .unwrap_or(DEFAULT_CELL_SIZE);
        let safety_margin = self
            .safety_margin
            .filter(|value| value.is_finite() && *value >= 0.0)
            .unwrap_or(DEFAULT_SAFETY_MARGIN);
        let max_iterations = self
            .max_iterations
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_MAX_ITERATIONS);

        SearchSettings {
            cell_size,
            safety_margin,
            max_iterations,
            avoid_zones: self.avoid_zones.unwrap_or(false),
            allowed_zone_id: self.allowed_zone_id,
            allow_diagonals: self.allow_diagonals.unwrap_or(true),
        }
    }
}

/// Fully resolved settings for one search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSettings {
    pub cell_size: f64,
    /// Zero disables rack and pallet stamping.
    pub safety_margin: f64,
    pub max_iterations: usize,
    pub avoid_zones: bool,
    pub allowed_zone_id: Option<i64>,
    pub allow_diagonals: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        PathfindingOptions::default().resolve()
    }
}
