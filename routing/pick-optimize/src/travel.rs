//! Travel cost between pick locations.
//!
//! Route generation and re-planning rank candidate bins by a
//! [`TravelMetric`]. [`StraightLine`] is the default. [`Walking`] asks the
//! path planner for the real walking distance around racks, at the cost of
//! one grid search per query.

use pick_pathfind::PathPlanner;
use pick_spatial::GeometryIndex;
use pick_types::{FloorDirectory, Location, PickingResult, SearchConfig};
use tracing::trace;

/// Cost of moving between two locations.
pub trait TravelMetric {
    /// Travel distance from `from` to `to`.
    fn distance(&self, from: &Location, to: &Location) -> f64;
}

impl<M: TravelMetric + ?Sized> TravelMetric for &M {
    fn distance(&self, from: &Location, to: &Location) -> f64 {
        (**self).distance(from, to)
    }
}

/// Euclidean distance between the two points, ignoring floors.
///
/// # Example
///
/// ```
/// use pick_optimize::{StraightLine, TravelMetric};
/// use pick_types::Location;
/// use nalgebra::Point3;
///
/// let a = Location::new(Point3::new(0.0, 0.0, 0.0), 1);
/// let b = Location::new(Point3::new(3.0, 0.0, 4.0), 1);
/// assert_eq!(StraightLine.distance(&a, &b), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StraightLine;

impl TravelMetric for StraightLine {
    fn distance(&self, from: &Location, to: &Location) -> f64 {
        from.straight_line_distance(to)
    }
}

/// Walking distance along planned floor paths.
///
/// On one floor this is the length of the planned path. Between floors the
/// worker walks to the entry point of the current floor, then from the entry
/// point of the target floor to the bin. A floor without a known entry point
/// contributes no leg on its side.
#[derive(Debug, Clone)]
pub struct Walking {
    planner: PathPlanner,
    floors: FloorDirectory,
}

impl Walking {
    /// Creates the metric from a prepared planner.
    #[must_use]
    pub const fn new(planner: PathPlanner, floors: FloorDirectory) -> Self {
        Self { planner, floors }
    }

    /// Rasterizes the layout and creates the metric.
    ///
    /// # Errors
    ///
    /// Returns an error if the search configuration is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use pick_optimize::{TravelMetric, Walking};
    /// use pick_spatial::{FloorLayout, GeometryIndex, LayoutConfig, RackUnit};
    /// use pick_types::{Floor, FloorDirectory, Location, SearchConfig};
    /// use nalgebra::Point3;
    ///
    /// let layouts = vec![
    ///     FloorLayout::new(1)
    ///         .with_unit(RackUnit::new(Point3::new(-20.0, 0.0, -20.0), 1.0, 1.0))
    ///         .with_unit(RackUnit::new(Point3::new(0.0, 0.0, 0.0), 1.0, 10.0))
    ///         .with_unit(RackUnit::new(Point3::new(20.0, 0.0, 20.0), 1.0, 1.0)),
    /// ];
    /// let index = GeometryIndex::build(&layouts, LayoutConfig::default()).unwrap();
    /// let floors = FloorDirectory::new(vec![Floor::new(1, Point3::origin())]);
    /// let walking = Walking::from_index(&index, SearchConfig::default(), floors).unwrap();
    ///
    /// let west = Location::new(Point3::new(-3.0, 0.0, 0.0), 1);
    /// let east = Location::new(Point3::new(3.0, 0.0, 0.0), 1);
    /// // Straight across is 6, but the rack is in the way.
    /// assert!(walking.distance(&west, &east) > 6.0);
    /// ```
    pub fn from_index(
        index: &GeometryIndex,
        config: SearchConfig,
        floors: FloorDirectory,
    ) -> PickingResult<Self> {
        Ok(Self::new(PathPlanner::new(index, config)?, floors))
    }

    /// The underlying path planner.
    #[must_use]
    pub const fn planner(&self) -> &PathPlanner {
        &self.planner
    }

    /// Known floors and their entry points.
    #[must_use]
    pub const fn floors(&self) -> &FloorDirectory {
        &self.floors
    }

    fn leg(&self, from: &Location, to: &Location) -> f64 {
        self.planner.distance(&from.point, &to.point, from.floor)
    }
}

impl TravelMetric for Walking {
    fn distance(&self, from: &Location, to: &Location) -> f64 {
        if from.same_floor(to) {
            return self.leg(from, to);
        }

        let exit = self
            .floors
            .entry(from.floor)
            .map_or(0.0, |entry| self.leg(from, &entry));
        let arrive = self
            .floors
            .entry(to.floor)
            .map_or(0.0, |entry| self.leg(&entry, to));
        trace!(
            from_floor = from.floor,
            to_floor = to.floor,
            exit,
            arrive,
            "Floor change"
        );
        exit + arrive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;
    use pick_types::Floor;

    fn loc(x: f64, z: f64, floor: u32) -> Location {
        Location::new(Point3::new(x, 0.0, z), floor)
    }

    fn open_walking() -> Walking {
        let floors = FloorDirectory::new(vec![
            Floor::new(1, Point3::new(0.0, 0.0, 0.0)),
            Floor::new(2, Point3::new(10.0, 0.0, 0.0)),
        ]);
        Walking::new(PathPlanner::open_floor(SearchConfig::default()), floors)
    }

    #[test]
    fn test_straight_line_is_euclidean() {
        let d = StraightLine.distance(&loc(1.0, 1.0, 1), &loc(4.0, 5.0, 2));
        assert_relative_eq!(d, 5.0);
    }

    #[test]
    fn test_walking_on_open_floor_is_manhattan() {
        let walking = open_walking();
        assert_relative_eq!(walking.distance(&loc(0.0, 0.0, 1), &loc(3.0, 4.0, 1)), 7.0);
    }

    #[test]
    fn test_walking_between_floors_goes_through_entries() {
        let walking = open_walking();
        // 2 to the floor 1 entry, then 3 from the floor 2 entry.
        let d = walking.distance(&loc(2.0, 0.0, 1), &loc(10.0, 3.0, 2));
        assert_relative_eq!(d, 5.0);
    }

    #[test]
    fn test_unknown_floor_entry_adds_nothing() {
        let walking = open_walking();
        let d = walking.distance(&loc(2.0, 0.0, 1), &loc(50.0, 50.0, 9));
        assert_relative_eq!(d, 2.0);
    }

    #[test]
    fn test_metric_by_reference() {
        fn measure<M: TravelMetric + ?Sized>(metric: &M) -> f64 {
            metric.distance(&loc(0.0, 0.0, 1), &loc(0.0, 2.0, 1))
        }
        let dynamic: &dyn TravelMetric = &StraightLine;
        assert_relative_eq!(measure(dynamic), 2.0);
        assert_relative_eq!(measure(&&StraightLine), 2.0);
    }
}
