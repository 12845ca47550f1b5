//! Server configuration from environment.

use aisle_core::PathfindingOptions;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// Stored snapshots beyond this count are evicted oldest-first
    pub max_snapshots: usize,
    /// Snapshots older than this are evicted on the next store
    pub snapshot_ttl_s: u64,
    /// Options applied when a planning request leaves a field unset
    pub default_options: PathfindingOptions,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: parse_env("AISLE_PORT").unwrap_or(3000),
            max_snapshots: parse_env("AISLE_MAX_SNAPSHOTS").unwrap_or(256),
            snapshot_ttl_s: parse_env("AISLE_SNAPSHOT_TTL_S").unwrap_or(86_400),
            default_options: PathfindingOptions {
                cell_size: parse_env("AISLE_DEFAULT_CELL_SIZE"),
                safety_margin: parse_env("AISLE_DEFAULT_SAFETY_MARGIN"),
                max_iterations: parse_env("AISLE_DEFAULT_MAX_ITERATIONS"),
                ..Default::default()
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            max_snapshots: 256,
            snapshot_ttl_s: 86_400,
            default_options: PathfindingOptions::default(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
