//! Post-processing of raw cell paths into compact polylines.

use crate::grid::GridConfig;
use crate::models::WorldPoint;

/// Walk predecessors back from `goal` and return the cell centers start-first.
pub fn reconstruct_path(came_from: &[Option<usize>], goal: usize, cfg: &GridConfig) -> Vec<WorldPoint> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(index) = current {
        path.push(cfg.index_to_world(index));
        current = came_from.get(index).copied().flatten();
    }
    path.reverse();
    path
}

fn direction_sign(delta: f64) -> i8 {
    if delta > 0.0 {
        1
    } else if delta < 0.0 {
        -1
    } else {
        0
    }
}

fn direction(from: &WorldPoint, to: &WorldPoint) -> (i8, i8) {
    (direction_sign(to.x - from.x), direction_sign(to.z - from.z))
}

/// Drop interior points that continue in the same direction as the point
/// before them. The first and last points are always kept.
pub fn compress_path(points: &[WorldPoint]) -> Vec<WorldPoint> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut result = vec![points[0]];
    let mut prev_direction = direction(&points[0], &points[1]);

    for window in points.windows(2).skip(1) {
        let next_direction = direction(&window[0], &window[1]);
        if next_direction != prev_direction {
            result.push(window[0]);
            prev_direction = next_direction;
        }
    }

    if let Some(last) = points.last() {
        result.push(*last);
    }
    result
}

/// Sum of Euclidean segment lengths.
pub fn path_distance(points: &[WorldPoint]) -> f64 {
    points
        .windows(2)
        .map(|segment| segment[0].distance_to(&segment[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<WorldPoint> {
        raw.iter().map(|(x, z)| WorldPoint::new(*x, *z)).collect()
    }

    #[test]
    fn collinear_runs_collapse_to_corners() {
        let raw = pts(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (3.0, 1.0),
            (4.0, 2.0),
            (4.0, 3.0),
            (4.0, 4.0),
        ]);
        let compressed = compress_path(&raw);
        assert_eq!(
            compressed,
            pts(&[(0.0, 0.0), (2.0, 0.0), (4.0, 2.0), (4.0, 4.0)])
        );
        assert!((path_distance(&compressed) - path_distance(&raw)).abs() < 1e-9);
    }

    #[test]
    fn compression_is_idempotent() {
        let raw = pts(&[
            (0.5, 0.5),
            (1.5, 0.5),
            (1.5, 1.5),
            (1.5, 2.5),
            (2.5, 3.5),
            (3.5, 3.5),
            (4.5, 3.5),
        ]);
        let once = compress_path(&raw);
        assert_eq!(compress_path(&once), once);
    }

    #[test]
    fn short_paths_are_untouched() {
        assert!(compress_path(&[]).is_empty());
        let single = pts(&[(1.0, 1.0)]);
        assert_eq!(compress_path(&single), single);
        assert_eq!(path_distance(&single), 0.0);
        let pair = pts(&[(0.0, 0.0), (3.0, 4.0)]);
        assert_eq!(compress_path(&pair), pair);
        assert_eq!(path_distance(&pair), 5.0);
    }

    #[test]
    fn reconstruct_follows_predecessors_to_the_start() {
        let cfg = GridConfig::for_footprint(3.0, 1.0, 1.0).unwrap();
        let came_from = vec![None, Some(0), Some(1)];
        assert_eq!(
            reconstruct_path(&came_from, 2, &cfg),
            pts(&[(0.5, 0.5), (1.5, 0.5), (2.5, 0.5)])
        );
        assert_eq!(reconstruct_path(&came_from, 0, &cfg), pts(&[(0.5, 0.5)]));
    }
}
