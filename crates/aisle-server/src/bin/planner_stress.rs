//! Times planner calls on synthetic rack-row warehouses of increasing size.

use aisle_core::{PalletLocation, PathResult, Rack, Shelf, WarehouseSnapshot, WorldPoint};
use aisle_server::config::Config;
use aisle_server::planner::{plan_between_points, plan_to_pallet, PalletPathRequest, PointPathRequest};
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
struct StressLayout {
    name: &'static str,
    length: f64,
    width: f64,
    rack_rows: usize,
    racks_per_row: usize,
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    let layouts = vec![
        StressLayout {
            name: "Small store room",
            length: 20.0,
            width: 15.0,
            rack_rows: 3,
            racks_per_row: 3,
        },
        StressLayout {
            name: "Distribution hall",
            length: 80.0,
            width: 60.0,
            rack_rows: 10,
            racks_per_row: 12,
        },
        StressLayout {
            name: "Mega warehouse",
            length: 200.0,
            width: 120.0,
            rack_rows: 24,
            racks_per_row: 30,
        },
    ];

    for layout in layouts {
        println!("\n=== {} ===", layout.name);
        let snapshot = Arc::new(build_layout(&layout));
        println!(
            "Layout: {:.0}m x {:.0}m | racks={} pallets={}",
            snapshot.length,
            snapshot.width,
            snapshot.racks.len(),
            snapshot.pallets.len()
        );

        let request = PointPathRequest {
            start: WorldPoint::new(0.5, 0.5),
            goal: WorldPoint::new(layout.length - 0.5, layout.width - 0.5),
            options: None,
        };
        let started = Instant::now();
        match plan_between_points(snapshot.clone(), &config, request).await {
            Ok(result) => report("Corner to corner", &result, started),
            Err(err) => println!("Corner to corner: ERROR {}", err),
        }

        let far_pallet = snapshot.pallets.last().map(|pallet| pallet.pallet_id);
        if let Some(pallet_id) = far_pallet {
            let started = Instant::now();
            match plan_to_pallet(snapshot.clone(), &config, pallet_id, PalletPathRequest::default()).await {
                Ok(result) => report("Farthest pallet", &result, started),
                Err(err) => println!("Farthest pallet: ERROR {}", err),
            }
        }
    }
}

fn report(label: &str, result: &PathResult, started: Instant) {
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    if result.success {
        println!(
            "{}: OK | explored={} points={} distance={:.1}m time={:.1}ms",
            label,
            result.explored_nodes,
            result.points.len(),
            result.distance,
            elapsed_ms
        );
    } else {
        println!(
            "{}: FAIL | explored={} time={:.1}ms",
            label, result.explored_nodes, elapsed_ms
        );
        if let Some(diagnostic) = &result.diagnostic {
            println!(
                " - start blocked={:?} goal blocked={:?}",
                diagnostic.start_blocked, diagnostic.goal_blocked
            );
        }
    }
}

/// Rows of racks separated by 3m aisles, one shelf pallet per rack.
fn build_layout(layout: &StressLayout) -> WarehouseSnapshot {
    let mut snapshot = WarehouseSnapshot::new(layout.length, layout.width);
    let rack_length = (layout.length - 4.0) / layout.racks_per_row as f64 - 1.0;
    let row_pitch = (layout.width - 4.0) / layout.rack_rows as f64;
    let rack_width = (row_pitch - 3.0).max(0.8);

    let mut next_id = 1;
    for row in 0..layout.rack_rows {
        for slot in 0..layout.racks_per_row {
            let rack_id = next_id;
            let shelf_id = next_id * 10;
            next_id += 1;

            let position_x = 2.0 + slot as f64 * (rack_length + 1.0);
            let position_z = 3.5 + row as f64 * row_pitch;
            snapshot.racks.push(Rack {
                rack_id,
                zone_id: None,
                rack_name: Some(format!("R{}-{}", row + 1, slot + 1)),
                position_x,
                position_z,
                length: rack_length,
                width: rack_width,
                shelves: vec![Shelf { shelf_id }],
            });
            snapshot.pallets.push(PalletLocation {
                pallet_id: rack_id,
                zone_id: None,
                shelf_id: Some(shelf_id),
                position_x: position_x + rack_length / 2.0 - 0.5,
                position_z,
                pallet_length: 1.0,
                pallet_width: rack_width.min(1.0),
            });
        }
    }
    snapshot
}
