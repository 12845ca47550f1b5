//! Plan a route between two points on a warehouse floor.

use aisle_cli::{init_tracing, render_result, PlannerArgs};
use aisle_core::{find_path_between_points, WorldPoint};
use clap::Parser;

/// Plan a path between two floor points of a warehouse snapshot
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Start X in meters
    #[arg(long, allow_negative_numbers = true)]
    start_x: f64,

    /// Start Z in meters
    #[arg(long, allow_negative_numbers = true)]
    start_z: f64,

    /// Goal X in meters
    #[arg(long, allow_negative_numbers = true)]
    goal_x: f64,

    /// Goal Z in meters
    #[arg(long, allow_negative_numbers = true)]
    goal_z: f64,

    #[command(flatten)]
    planner: PlannerArgs,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let snapshot = args.planner.load_snapshot()?;
    let result = find_path_between_points(
        &snapshot,
        WorldPoint::new(args.start_x, args.start_z),
        WorldPoint::new(args.goal_x, args.goal_z),
        &args.planner.options(),
    );
    if !result.success {
        tracing::info!(explored = result.explored_nodes, "no path found");
    }

    println!("{}", render_result(&result, args.planner.pretty)?);
    Ok(())
}
