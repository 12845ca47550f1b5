//! End-to-end planner scenarios on small synthetic warehouses.

use aisle_core::{
    build_obstacle_mask, compress_path, find_path_between_points, find_path_to_pallet,
    GridConfig, PalletLocation, PathfindingOptions, Rack, Shelf, WarehouseSnapshot, WorldPoint,
    Zone,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn rack(rack_id: i64, x: f64, z: f64, length: f64, width: f64, shelves: &[i64]) -> Rack {
    Rack {
        rack_id,
        zone_id: None,
        rack_name: None,
        position_x: x,
        position_z: z,
        length,
        width,
        shelves: shelves.iter().map(|shelf_id| Shelf { shelf_id: *shelf_id }).collect(),
    }
}

fn ground_pallet(pallet_id: i64, x: f64, z: f64) -> PalletLocation {
    PalletLocation {
        pallet_id,
        zone_id: None,
        shelf_id: None,
        position_x: x,
        position_z: z,
        pallet_length: 1.0,
        pallet_width: 1.0,
    }
}

fn single_rack_warehouse() -> WarehouseSnapshot {
    let mut snapshot = WarehouseSnapshot::new(20.0, 10.0);
    snapshot.racks.push(rack(1, 5.0, 5.0, 2.0, 2.0, &[]));
    snapshot
}

#[test]
fn detours_around_a_rack() {
    let snapshot = single_rack_warehouse();
    let result = find_path_between_points(
        &snapshot,
        WorldPoint::new(1.0, 1.0),
        WorldPoint::new(9.0, 9.0),
        &PathfindingOptions::default(),
    );

    assert!(result.success);
    assert!(result.explored_nodes > 0);
    assert!(result.diagnostic.is_none());
    assert_eq!(result.points.first(), Some(&WorldPoint::new(1.25, 1.25)));
    assert_eq!(result.points.last(), Some(&WorldPoint::new(9.25, 9.25)));

    let straight = 8.0 * std::f64::consts::SQRT_2;
    assert!(result.distance > straight + 1e-9, "distance {}", result.distance);

    // No vertex of the polyline sits inside the margin-expanded rack.
    for point in &result.points {
        let inside = (4.75..7.25).contains(&point.x) && (4.75..7.25).contains(&point.z);
        assert!(!inside, "{point:?} inside the rack");
    }
}

#[test]
fn iteration_cap_of_one_fails() {
    let snapshot = single_rack_warehouse();
    let options = PathfindingOptions {
        max_iterations: Some(1),
        ..Default::default()
    };
    let result = find_path_between_points(
        &snapshot,
        WorldPoint::new(1.0, 1.0),
        WorldPoint::new(9.0, 9.0),
        &options,
    );

    assert!(!result.success);
    assert!(result.explored_nodes <= 1);
    assert!(result.points.is_empty());
    assert_eq!(result.distance, 0.0);

    let diagnostic = result.diagnostic.expect("diagnostic on failure");
    assert_eq!((diagnostic.cols, diagnostic.rows), (40, 20));
    assert_eq!(diagnostic.start_cell, (2, 2));
    assert_eq!(diagnostic.goal_cell, (18, 18));
    assert!(!diagnostic.start_blocked.self_cell);
    assert!(!diagnostic.goal_blocked.self_cell);
}

#[test]
fn shelf_pallet_ends_in_front_of_its_rack() {
    let mut snapshot = WarehouseSnapshot::new(20.0, 20.0);
    snapshot.racks.push(rack(7, 10.0, 10.0, 4.0, 1.0, &[70, 71]));
    snapshot.pallets.push(PalletLocation {
        pallet_id: 5,
        zone_id: None,
        shelf_id: Some(71),
        position_x: 11.0,
        position_z: 10.0,
        pallet_length: 1.0,
        pallet_width: 1.0,
    });

    let result = find_path_to_pallet(
        &snapshot,
        5,
        Some(WorldPoint::new(1.0, 1.0)),
        &PathfindingOptions::default(),
    );
    assert!(result.success);

    // Standing point: 0.9 in front of the rack's min-Z face, at the pallet center.
    let cfg = GridConfig::for_footprint(20.0, 20.0, 0.5).unwrap();
    let stand = cfg.world_to_grid(11.5, 10.0 - 0.9);
    let end = *result.points.last().unwrap();
    assert_eq!(end, cfg.grid_to_world(stand.col, stand.row));
    assert!(end.x >= 10.4 - 0.25 && end.x <= 13.6 + 0.25);
    assert!(end.z < 10.0);

    // Pallet approaches never move diagonally.
    for pair in result.points.windows(2) {
        assert!(pair[0].x == pair[1].x || pair[0].z == pair[1].z, "{pair:?}");
    }
}

#[test]
fn shelf_pallet_uses_back_face_when_start_is_behind() {
    let mut snapshot = WarehouseSnapshot::new(20.0, 20.0);
    snapshot.racks.push(rack(7, 10.0, 10.0, 4.0, 1.0, &[71]));
    snapshot.pallets.push(PalletLocation {
        pallet_id: 5,
        zone_id: None,
        shelf_id: Some(71),
        position_x: 12.0,
        position_z: 10.0,
        pallet_length: 1.0,
        pallet_width: 1.0,
    });
    snapshot.checkin_position_x = Some(2.0);
    snapshot.checkin_position_z = Some(18.0);

    let result = find_path_to_pallet(&snapshot, 5, None, &PathfindingOptions::default());
    assert!(result.success);

    let cfg = GridConfig::for_footprint(20.0, 20.0, 0.5).unwrap();
    assert_eq!(result.points[0], cfg.grid_to_world(4, 36));
    let stand = cfg.world_to_grid(12.5, 11.0 + 0.9);
    assert_eq!(
        result.points.last().copied(),
        Some(cfg.grid_to_world(stand.col, stand.row))
    );
}

#[test]
fn ground_pallet_picks_the_nearest_side() {
    let mut snapshot = WarehouseSnapshot::new(20.0, 10.0);
    snapshot.pallets.push(ground_pallet(3, 10.0, 5.0));

    let start = WorldPoint::new(18.0, 5.25);
    let result = find_path_to_pallet(&snapshot, 3, Some(start), &PathfindingOptions::default());
    assert!(result.success);

    // Right-hand candidate at (11.9, 5.4) lies in the start's row.
    let cfg = GridConfig::for_footprint(20.0, 10.0, 0.5).unwrap();
    let right = cfg.world_to_grid(11.9, 5.4);
    assert_eq!(
        result.points.last().copied(),
        Some(cfg.grid_to_world(right.col, right.row))
    );
    assert_eq!(result.points.len(), 2);

    let single = find_path_between_points(
        &snapshot,
        start,
        WorldPoint::new(11.9, 5.4),
        &PathfindingOptions::default().for_pallet_approach(),
    );
    assert!(result.explored_nodes > single.explored_nodes);
}

#[test]
fn sealed_start_fails_every_candidate() {
    let mut snapshot = WarehouseSnapshot::new(20.0, 10.0);
    snapshot.racks.push(rack(1, 1.5, 0.0, 0.5, 2.0, &[]));
    snapshot.racks.push(rack(2, 0.0, 1.5, 2.0, 0.5, &[]));
    snapshot.pallets.push(ground_pallet(3, 10.0, 5.0));

    let result = find_path_to_pallet(
        &snapshot,
        3,
        Some(WorldPoint::new(0.25, 0.25)),
        &PathfindingOptions::default(),
    );

    assert!(!result.success);
    assert!(result.points.is_empty());
    assert_eq!(result.distance, 0.0);
    // Four candidates, each expanding the four open cells of the pocket.
    assert_eq!(result.explored_nodes, 16);
    assert!(result.diagnostic.is_some());
}

#[test]
fn avoided_zones_are_routed_around_unless_allowed() {
    let mut snapshot = WarehouseSnapshot::new(20.0, 10.0);
    snapshot.zones.push(Zone {
        zone_id: 1,
        zone_name: Some("cold".to_string()),
        position_x: 8.0,
        position_z: 0.0,
        length: 4.0,
        width: 8.0,
    });
    let start = WorldPoint::new(2.0, 2.0);
    let goal = WorldPoint::new(18.0, 2.0);

    let free = find_path_between_points(&snapshot, start, goal, &PathfindingOptions::default());
    assert!(free.success);
    assert!((free.distance - 16.0).abs() < 1e-9);

    let avoiding = PathfindingOptions {
        avoid_zones: Some(true),
        ..Default::default()
    };
    let detour = find_path_between_points(&snapshot, start, goal, &avoiding);
    assert!(detour.success);
    assert!(detour.distance > free.distance);
    assert!(detour.points.iter().any(|point| point.z > 8.0));

    let allowed = PathfindingOptions {
        allowed_zone_id: Some(1),
        ..avoiding
    };
    let through = find_path_between_points(&snapshot, start, goal, &allowed);
    assert!((through.distance - 16.0).abs() < 1e-9);
}

#[test]
fn identical_queries_give_identical_results() {
    let snapshot = single_rack_warehouse();
    let options = PathfindingOptions::default();
    let first = find_path_between_points(
        &snapshot,
        WorldPoint::new(1.0, 8.0),
        WorldPoint::new(15.0, 2.0),
        &options,
    );
    let second = find_path_between_points(
        &snapshot,
        WorldPoint::new(1.0, 8.0),
        WorldPoint::new(15.0, 2.0),
        &options,
    );
    assert_eq!(first, second);
}

#[test]
fn degenerate_warehouse_still_returns_a_result() {
    let snapshot = WarehouseSnapshot::new(0.0, 0.0);
    let options = PathfindingOptions {
        cell_size: Some(-2.0),
        ..Default::default()
    };
    let result = find_path_between_points(
        &snapshot,
        WorldPoint::new(5.0, 5.0),
        WorldPoint::new(-5.0, 3.0),
        &options,
    );
    assert!(result.success);
    assert_eq!(result.points, vec![WorldPoint::new(0.25, 0.25)]);
    assert_eq!(result.distance, 0.0);
}

#[test]
fn oversized_grids_fail_instead_of_allocating() {
    let tiny_cells = PathfindingOptions {
        cell_size: Some(1e-9),
        ..Default::default()
    };
    let result = find_path_between_points(
        &WarehouseSnapshot::new(20.0, 10.0),
        WorldPoint::new(1.0, 1.0),
        WorldPoint::new(2.0, 2.0),
        &tiny_cells,
    );
    assert!(!result.success);
    assert_eq!(result.explored_nodes, 0);
    assert!(result.points.is_empty());

    let mut huge = WarehouseSnapshot::new(1e30, 1e30);
    huge.pallets.push(ground_pallet(3, 10.0, 10.0));
    let result = find_path_between_points(
        &huge,
        WorldPoint::new(1.0, 1.0),
        WorldPoint::new(2.0, 2.0),
        &PathfindingOptions::default(),
    );
    assert!(!result.success);
    assert_eq!(result.explored_nodes, 0);

    let result = find_path_to_pallet(&huge, 3, None, &PathfindingOptions::default());
    assert!(!result.success);
    assert_eq!(result.explored_nodes, 0);

    // Too fine for this floor, fine for a smaller one.
    let cell_size = PathfindingOptions {
        cell_size: Some(1e-2),
        ..Default::default()
    };
    let result = find_path_between_points(
        &WarehouseSnapshot::new(40.0, 40.0),
        WorldPoint::new(1.0, 1.0),
        WorldPoint::new(2.0, 1.0),
        &cell_size,
    );
    assert!(!result.success);
    let result = find_path_between_points(
        &WarehouseSnapshot::new(4.0, 4.0),
        WorldPoint::new(1.0, 1.0),
        WorldPoint::new(2.0, 1.0),
        &cell_size,
    );
    assert!(result.success);
}

fn random_warehouse(rng: &mut StdRng) -> WarehouseSnapshot {
    let mut snapshot = WarehouseSnapshot::new(20.0, 10.0);
    for rack_id in 0..rng.random_range(1..8) {
        snapshot.racks.push(rack(
            rack_id,
            rng.random_range(0.0..18.0),
            rng.random_range(0.0..8.0),
            rng.random_range(0.5..4.0),
            rng.random_range(0.5..2.0),
            &[],
        ));
    }
    for pallet_id in 0..rng.random_range(0..4) {
        snapshot
            .pallets
            .push(ground_pallet(pallet_id, rng.random_range(0.0..19.0), rng.random_range(0.0..9.0)));
    }
    snapshot
}

fn random_point(rng: &mut StdRng) -> WorldPoint {
    WorldPoint::new(rng.random_range(0.0..20.0), rng.random_range(0.0..10.0))
}

#[test]
fn random_layouts_hold_planner_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let options = PathfindingOptions::default();
    let settings = options.resolve();

    for _ in 0..60 {
        let snapshot = random_warehouse(&mut rng);
        let start = random_point(&mut rng);
        let goal = random_point(&mut rng);

        let cfg = GridConfig::for_footprint(snapshot.length, snapshot.width, settings.cell_size)
            .expect("grid within limits");
        let start_cell = cfg.world_to_grid(start.x, start.z);
        let goal_cell = cfg.world_to_grid(goal.x, goal.z);
        let mask = build_obstacle_mask(&snapshot, &cfg, &settings, start_cell.index, goal_cell.index);

        for center in [start_cell, goal_cell] {
            for dz in -1i64..=1 {
                for dx in -1i64..=1 {
                    let col = center.col as i64 + dx;
                    let row = center.row as i64 + dz;
                    if cfg.in_bounds(col, row) {
                        assert!(!mask.is_blocked(cfg.coord_to_index(col as usize, row as usize)));
                    }
                }
            }
        }

        let result = find_path_between_points(&snapshot, start, goal, &options);
        let again = find_path_between_points(&snapshot, start, goal, &options);
        assert_eq!(result, again);

        let from = cfg.grid_to_world(start_cell.col, start_cell.row);
        let to = cfg.grid_to_world(goal_cell.col, goal_cell.row);

        if result.success {
            assert!(result.distance + 1e-9 >= from.distance_to(&to));
            assert_eq!(compress_path(&result.points), result.points);
        } else {
            assert!(result.points.is_empty());
            assert_eq!(result.distance, 0.0);
        }

        let steps = (from.distance_to(&to) / (cfg.cell_size / 10.0)).ceil().max(1.0) as usize;
        let line_is_clear = (0..=steps).all(|i| {
            let t = i as f64 / steps as f64;
            let x = from.x + t * (to.x - from.x);
            let z = from.z + t * (to.z - from.z);
            !mask.is_blocked(cfg.world_to_grid(x, z).index)
        });
        if line_is_clear {
            assert!(result.success, "clear line from {start:?} to {goal:?} not found");
        }
    }
}

#[test]
fn world_to_grid_stays_in_bounds_for_any_input() {
    let mut rng = StdRng::seed_from_u64(42);
    let cfg = GridConfig::for_footprint(20.0, 10.0, 0.5).unwrap();
    for _ in 0..1_000 {
        let x = rng.random_range(-1e6..1e6);
        let z = rng.random_range(-1e6..1e6);
        assert!(cfg.world_to_grid(x, z).index < cfg.total_cells());
    }
}
