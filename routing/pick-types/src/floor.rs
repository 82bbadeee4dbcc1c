//! Floors and their entry points.

use std::collections::BTreeMap;

use nalgebra::Point3;
use pick_spatial::FloorId;

use crate::location::Location;

/// A warehouse floor.
///
/// The entry point is where a route restarts after changing floors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Floor {
    /// Floor identifier.
    pub id: FloorId,
    /// Where workers arrive on this floor (stairs, lift, door).
    pub entry_point: Point3<f64>,
    /// Display rotation of the floor plan, in radians.
    pub rotation: f64,
}

impl Floor {
    /// Creates a floor with no rotation.
    #[must_use]
    pub const fn new(id: FloorId, entry_point: Point3<f64>) -> Self {
        Self {
            id,
            entry_point,
            rotation: 0.0,
        }
    }

    /// Sets the display rotation.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Entry point as a location.
    #[must_use]
    pub const fn entry(&self) -> Location {
        Location::new(self.entry_point, self.id)
    }
}

/// Floors by id.
///
/// # Example
///
/// ```
/// use pick_types::{Floor, FloorDirectory};
/// use nalgebra::Point3;
///
/// let floors = FloorDirectory::new(vec![
///     Floor::new(1, Point3::new(0.0, 0.0, 0.0)),
///     Floor::new(2, Point3::new(0.0, 4.0, 30.0)),
/// ]);
/// assert_eq!(floors.entry(2).unwrap().point.z, 30.0);
/// assert!(floors.entry(3).is_none());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorDirectory {
    floors: BTreeMap<FloorId, Floor>,
}

impl FloorDirectory {
    /// Builds the directory; later floors with the same id replace earlier.
    #[must_use]
    pub fn new(floors: impl IntoIterator<Item = Floor>) -> Self {
        Self {
            floors: floors.into_iter().map(|f| (f.id, f)).collect(),
        }
    }

    /// Looks up a floor.
    #[must_use]
    pub fn get(&self, id: FloorId) -> Option<&Floor> {
        self.floors.get(&id)
    }

    /// Entry location of a floor.
    #[must_use]
    pub fn entry(&self, id: FloorId) -> Option<Location> {
        self.get(id).map(Floor::entry)
    }

    /// Iterates over floors in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Floor> {
        self.floors.values()
    }

    /// Number of floors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.floors.len()
    }

    /// Returns `true` if there are no floors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }
}
