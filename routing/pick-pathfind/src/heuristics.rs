//! Distance functions used by the grid search.

use nalgebra::Point3;
use pick_spatial::GridCell;

/// Manhattan distance between two cells, the A* heuristic.
///
/// Admissible and consistent for 4-connected movement with unit step cost.
///
/// # Example
///
/// ```
/// use pick_pathfind::heuristics::manhattan;
/// use pick_spatial::GridCell;
///
/// assert_eq!(manhattan(GridCell::new(0, 0), GridCell::new(3, -4)), 7);
/// ```
#[must_use]
pub const fn manhattan(from: GridCell, to: GridCell) -> u32 {
    from.manhattan_distance(to)
}

/// Distance between two points measured in the floor plane (ignores height).
#[must_use]
pub fn planar_distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a.x - b.x).hypot(a.z - b.z)
}

/// Length of a polyline measured in the floor plane.
///
/// # Example
///
/// ```
/// use pick_pathfind::heuristics::polyline_length;
/// use nalgebra::Point3;
///
/// let points = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(3.0, 0.0, 0.0),
///     Point3::new(3.0, 2.0, 4.0),
/// ];
/// assert!((polyline_length(&points) - 7.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn polyline_length(points: &[Point3<f64>]) -> f64 {
    points
        .windows(2)
        .map(|w| planar_distance(&w[0], &w[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_planar_distance_ignores_height() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 100.0, 4.0);
        assert_relative_eq!(planar_distance(&a, &b), 5.0);
    }

    #[test]
    fn test_polyline_length_degenerate() {
        assert_relative_eq!(polyline_length(&[]), 0.0);
        assert_relative_eq!(polyline_length(&[Point3::new(1.0, 1.0, 1.0)]), 0.0);
    }

    #[test]
    fn test_manhattan_symmetric() {
        let a = GridCell::new(-3, 8);
        let b = GridCell::new(2, 2);
        assert_eq!(manhattan(a, b), manhattan(b, a));
        assert_eq!(manhattan(a, a), 0);
    }
}
