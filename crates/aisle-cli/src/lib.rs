//! Aisle CLI - command line tools for the warehouse path planner.
//!
//! Binaries:
//! - plan_path: route between two floor points
//! - plan_pallet: route to the standing point in front of a pallet

use aisle_core::{PathResult, PathfindingOptions, WarehouseSnapshot, WorldPoint};
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

/// Flags shared by every planning binary.
#[derive(Args, Debug, Clone)]
pub struct PlannerArgs {
    /// Warehouse snapshot JSON file
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Grid cell size in meters
    #[arg(long)]
    pub cell_size: Option<f64>,

    /// Clearance kept around racks and pallets, in meters
    #[arg(long)]
    pub safety_margin: Option<f64>,

    /// Maximum number of expanded cells before giving up
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Treat zones as obstacles (true/false)
    #[arg(long)]
    pub avoid_zones: Option<bool>,

    /// Zone that stays passable while zones are avoided
    #[arg(long)]
    pub allowed_zone: Option<i64>,

    /// Restrict moves to the four cardinal directions
    #[arg(long)]
    pub no_diagonals: bool,

    /// Pretty-print the JSON result
    #[arg(long)]
    pub pretty: bool,
}

impl PlannerArgs {
    pub fn options(&self) -> PathfindingOptions {
        PathfindingOptions {
            cell_size: self.cell_size,
            safety_margin: self.safety_margin,
            max_iterations: self.max_iterations,
            avoid_zones: self.avoid_zones,
            allowed_zone_id: self.allowed_zone,
            allow_diagonals: self.no_diagonals.then_some(false),
        }
    }

    pub fn load_snapshot(&self) -> Result<WarehouseSnapshot> {
        load_snapshot(&self.snapshot)
    }
}

pub fn load_snapshot(path: &Path) -> Result<WarehouseSnapshot> {
    let snapshot = WarehouseSnapshot::from_path(path)
        .with_context(|| format!("failed to load snapshot {}", path.display()))?;
    tracing::debug!(
        racks = snapshot.racks.len(),
        pallets = snapshot.pallets.len(),
        zones = snapshot.zones.len(),
        "loaded snapshot {}",
        path.display()
    );
    Ok(snapshot)
}

/// Both coordinates or neither.
pub fn optional_point(x: Option<f64>, z: Option<f64>) -> Result<Option<WorldPoint>> {
    match (x, z) {
        (Some(x), Some(z)) => Ok(Some(WorldPoint::new(x, z))),
        (None, None) => Ok(None),
        _ => anyhow::bail!("--start-x and --start-z must be given together"),
    }
}

pub fn render_result(result: &PathResult, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(result)
    } else {
        serde_json::to_string(result)
    };
    rendered.context("failed to serialize path result")
}

/// Logs go to stderr so stdout carries only the JSON result.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}
