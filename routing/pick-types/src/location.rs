//! Physical positions in the warehouse.

use nalgebra::Point3;
use pick_spatial::FloorId;

/// A point on a specific floor.
///
/// # Example
///
/// ```
/// use pick_types::Location;
/// use nalgebra::Point3;
///
/// let a = Location::new(Point3::new(0.0, 0.0, 0.0), 1);
/// let b = Location::new(Point3::new(3.0, 0.0, 4.0), 1);
/// assert!((a.straight_line_distance(&b) - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// World position.
    pub point: Point3<f64>,
    /// Floor the position is on.
    pub floor: FloorId,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub const fn new(point: Point3<f64>, floor: FloorId) -> Self {
        Self { point, floor }
    }

    /// Euclidean distance between the two world positions.
    ///
    /// Floors are not taken into account.
    #[must_use]
    pub fn straight_line_distance(&self, other: &Self) -> f64 {
        nalgebra::distance(&self.point, &other.point)
    }

    /// Returns `true` if both locations are on the same floor.
    #[must_use]
    pub const fn same_floor(&self, other: &Self) -> bool {
        self.floor == other.floor
    }
}
