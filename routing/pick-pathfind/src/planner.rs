//! Planning walking paths over a floor's obstacle grid.

use std::collections::BTreeMap;

use nalgebra::Point3;
use pick_spatial::{CellGrid, GeometryIndex, GridCell};
use pick_types::{FloorId, PickingError, PickingResult, SearchConfig};
use tracing::{debug, warn};

use crate::astar::{SearchOutcome, search};
use crate::heuristics::planar_distance;
use crate::path::{FallbackReason, FloorPath, PathKind};
use crate::simplify::collapse_collinear;
use crate::snap::{SnapOutcome, snap_to_free};

/// Path planner holding one rasterized grid per floor.
///
/// Rasterizing a floor is the expensive part of a query. The planner does it
/// once at construction, so ranking many candidate bins against the same
/// layout only pays for the searches.
///
/// # Example
///
/// ```
/// use pick_pathfind::PathPlanner;
/// use pick_spatial::{FloorLayout, GeometryIndex, LayoutConfig, RackUnit};
/// use pick_types::SearchConfig;
/// use nalgebra::Point3;
///
/// let layouts = vec![
///     FloorLayout::new(1)
///         .with_unit(RackUnit::new(Point3::new(5.0, 0.0, 0.0), 10.0, 1.0))
///         .with_unit(RackUnit::new(Point3::new(5.0, 0.0, 6.0), 10.0, 1.0))
///         .with_unit(RackUnit::new(Point3::new(5.0, 0.0, 12.0), 10.0, 1.0)),
/// ];
/// let index = GeometryIndex::build(&layouts, LayoutConfig::default()).unwrap();
/// let planner = PathPlanner::new(&index, SearchConfig::default()).unwrap();
///
/// let path = planner.plan(&Point3::new(2.0, 0.0, 3.0), &Point3::new(8.0, 0.0, 9.0), 1);
/// assert!(path.is_planned());
/// assert!(path.points().len() >= 2);
/// ```
#[derive(Debug, Clone)]
pub struct PathPlanner {
    config: SearchConfig,
    grids: BTreeMap<FloorId, CellGrid>,
    open: CellGrid,
}

impl PathPlanner {
    /// Rasterizes every floor of the index.
    ///
    /// # Errors
    ///
    /// Returns [`PickingError::InvalidConfig`] if the search configuration is
    /// invalid.
    pub fn new(index: &GeometryIndex, config: SearchConfig) -> PickingResult<Self> {
        let issues = config.validate();
        if !issues.is_empty() {
            return Err(PickingError::invalid_config(issues.join("; ")));
        }

        let grids: BTreeMap<FloorId, CellGrid> = index
            .floor_ids()
            .filter_map(|id| {
                index
                    .floor(id)
                    .map(|geometry| (id, CellGrid::from_floor(geometry, config.padding())))
            })
            .collect();

        debug!(floors = grids.len(), "Rasterized floor grids");

        Ok(Self {
            config,
            grids,
            open: CellGrid::open(),
        })
    }

    /// Planner with no obstacles on any floor.
    #[must_use]
    pub fn open_floor(config: SearchConfig) -> Self {
        Self {
            config,
            grids: BTreeMap::new(),
            open: CellGrid::open(),
        }
    }

    /// Search configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Grid used for a floor. Floors without geometry share an open grid.
    #[must_use]
    pub fn grid(&self, floor: FloorId) -> &CellGrid {
        self.grids.get(&floor).unwrap_or(&self.open)
    }

    /// Number of floors with obstacle geometry.
    #[must_use]
    pub fn floor_count(&self) -> usize {
        self.grids.len()
    }

    /// Plans a path between two points on one floor.
    ///
    /// Never fails: when the search cannot finish, an L-shaped fallback is
    /// returned and flagged with [`PathKind::Fallback`].
    #[must_use]
    pub fn plan(&self, start: &Point3<f64>, end: &Point3<f64>, floor: FloorId) -> FloorPath {
        plan_on_grid(self.grid(floor), start, end, floor, &self.config)
    }

    /// Walking distance between two points on one floor.
    #[must_use]
    pub fn distance(&self, start: &Point3<f64>, end: &Point3<f64>, floor: FloorId) -> f64 {
        self.plan(start, end, floor).length()
    }
}

/// Plans a single path without keeping the rasterized grid.
///
/// An unknown floor (or one without rack units) plans over open space.
/// The configuration is used as given; validate it beforehand if it comes
/// from outside.
///
/// # Example
///
/// ```
/// use pick_pathfind::find_path;
/// use pick_spatial::{FloorLayout, GeometryIndex, LayoutConfig, RackUnit};
/// use pick_types::SearchConfig;
/// use nalgebra::Point3;
///
/// let layouts = vec![
///     FloorLayout::new(1)
///         .with_unit(RackUnit::new(Point3::new(0.0, 0.0, -10.0), 2.0, 2.0))
///         .with_unit(RackUnit::new(Point3::new(5.0, 0.0, 0.0), 1.0, 6.0))
///         .with_unit(RackUnit::new(Point3::new(10.0, 0.0, 10.0), 2.0, 2.0)),
/// ];
/// let index = GeometryIndex::build(&layouts, LayoutConfig::default()).unwrap();
///
/// let start = Point3::new(2.0, 0.0, 0.0);
/// let end = Point3::new(8.0, 0.0, 0.0);
/// let path = find_path(&start, &end, 1, &index, &SearchConfig::default());
///
/// assert!(path.is_planned());
/// // The rack at x = 5 forces a detour.
/// assert!(path.length() > 6.0);
/// ```
#[must_use]
pub fn find_path(
    start: &Point3<f64>,
    end: &Point3<f64>,
    floor: FloorId,
    index: &GeometryIndex,
    config: &SearchConfig,
) -> FloorPath {
    let grid = index.floor(floor).map_or_else(CellGrid::open, |geometry| {
        CellGrid::from_floor(geometry, config.padding())
    });
    plan_on_grid(&grid, start, end, floor, config)
}

fn plan_on_grid(
    grid: &CellGrid,
    start: &Point3<f64>,
    end: &Point3<f64>,
    floor: FloorId,
    config: &SearchConfig,
) -> FloorPath {
    let from = snap_to_free(grid, GridCell::from_point(start), config.snap_max_steps());
    let to = snap_to_free(grid, GridCell::from_point(end), config.snap_max_steps());
    if from.outcome == SnapOutcome::Unresolved || to.outcome == SnapOutcome::Unresolved {
        debug!(
            floor,
            start = ?from.cell,
            goal = ?to.cell,
            "No free cell near endpoint, searching from blocked cell"
        );
    }

    match search(grid, from.cell, to.cell, config.max_expansions()) {
        SearchOutcome::Found { cells, expanded } => {
            let corners = collapse_collinear(&cells);
            let points = splice_endpoints(&corners, start, end, config.splice_tolerance());
            debug!(
                floor,
                cells = cells.len(),
                points = points.len(),
                expanded,
                "Planned path"
            );
            FloorPath::new(floor, points, PathKind::Planned, expanded)
        }
        SearchOutcome::LimitReached { expanded } => {
            warn!(
                floor,
                expanded,
                limit = config.max_expansions(),
                "Search limit reached, using L-shaped fallback"
            );
            FloorPath::l_shaped(
                floor,
                *start,
                *end,
                FallbackReason::ExpansionLimit,
                expanded,
            )
        }
        SearchOutcome::Unreachable { expanded } => {
            warn!(
                floor,
                expanded,
                "No route between endpoints, using L-shaped fallback"
            );
            FloorPath::l_shaped(floor, *start, *end, FallbackReason::Unreachable, expanded)
        }
    }
}

/// Converts turning cells to points and reattaches the requested endpoints.
fn splice_endpoints(
    corners: &[GridCell],
    start: &Point3<f64>,
    end: &Point3<f64>,
    tolerance: f64,
) -> Vec<Point3<f64>> {
    let mut points: Vec<Point3<f64>> = corners.iter().map(|c| c.to_point(start.y)).collect();

    if points
        .first()
        .is_some_and(|first| planar_distance(first, start) > tolerance)
    {
        points.insert(0, *start);
    }
    if points
        .last()
        .is_some_and(|last| planar_distance(last, end) > tolerance)
    {
        points.push(*end);
    }

    if points.len() < 2 {
        return vec![*start, *end];
    }
    points
}
