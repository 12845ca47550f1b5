//! Plan a route to the standing point in front of a pallet.

use aisle_cli::{init_tracing, optional_point, render_result, PlannerArgs};
use aisle_core::find_path_to_pallet;
use clap::Parser;

/// Plan a path to a pallet of a warehouse snapshot
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Pallet id
    #[arg(long)]
    pallet: i64,

    /// Start X in meters (defaults to the check-in area, then the origin)
    #[arg(long, allow_negative_numbers = true)]
    start_x: Option<f64>,

    /// Start Z in meters
    #[arg(long, allow_negative_numbers = true)]
    start_z: Option<f64>,

    #[command(flatten)]
    planner: PlannerArgs,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let start = optional_point(args.start_x, args.start_z)?;
    let snapshot = args.planner.load_snapshot()?;
    let result = find_path_to_pallet(&snapshot, args.pallet, start, &args.planner.options());
    if !result.success {
        tracing::info!(
            pallet_id = args.pallet,
            explored = result.explored_nodes,
            "no path to pallet"
        );
    }

    println!("{}", render_result(&result, args.planner.pretty)?);
    Ok(())
}
