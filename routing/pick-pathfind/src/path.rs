//! Planned walking paths.

use nalgebra::Point3;
use pick_types::FloorId;

use crate::heuristics::polyline_length;

/// Why a path fell back to the straight L-shaped route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FallbackReason {
    /// The search hit its expansion cap.
    ExpansionLimit,
    /// The goal cannot be reached from the start.
    Unreachable,
}

/// How a path was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathKind {
    /// Grid search succeeded; the path avoids obstacles.
    Planned,
    /// Axis-aligned L route that may cross obstacles.
    Fallback(FallbackReason),
}

/// A walking path on one floor.
///
/// Always holds at least two points: the first is the requested start (or
/// its snapped cell) and the last is the requested end (or its snapped
/// cell).
///
/// # Example
///
/// ```
/// use pick_pathfind::{FloorPath, PathKind};
/// use nalgebra::Point3;
///
/// let path = FloorPath::new(
///     1,
///     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 4.0)],
///     PathKind::Planned,
///     12,
/// );
/// assert!((path.length() - 4.0).abs() < 1e-12);
/// assert!(path.is_planned());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorPath {
    floor: FloorId,
    points: Vec<Point3<f64>>,
    kind: PathKind,
    nodes_expanded: usize,
}

impl FloorPath {
    /// Creates a path from its parts.
    #[must_use]
    pub const fn new(
        floor: FloorId,
        points: Vec<Point3<f64>>,
        kind: PathKind,
        nodes_expanded: usize,
    ) -> Self {
        Self {
            floor,
            points,
            kind,
            nodes_expanded,
        }
    }

    /// Builds the axis-aligned fallback route from `start` to `end`.
    ///
    /// The route moves along x first, then z, at the start height. The
    /// corner is omitted when it coincides with either endpoint.
    #[must_use]
    pub fn l_shaped(
        floor: FloorId,
        start: Point3<f64>,
        end: Point3<f64>,
        reason: FallbackReason,
        nodes_expanded: usize,
    ) -> Self {
        let corner = Point3::new(end.x, start.y, start.z);
        let mut points = vec![start];
        let aligned_x = (corner.x - start.x).abs() <= f64::EPSILON;
        let aligned_z = (corner.z - end.z).abs() <= f64::EPSILON;
        if !aligned_x && !aligned_z {
            points.push(corner);
        }
        points.push(end);
        Self::new(floor, points, PathKind::Fallback(reason), nodes_expanded)
    }

    /// Floor the path lies on.
    #[must_use]
    pub const fn floor(&self) -> FloorId {
        self.floor
    }

    /// Path vertices in travel order.
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Consumes the path, returning its vertices.
    #[must_use]
    pub fn into_points(self) -> Vec<Point3<f64>> {
        self.points
    }

    /// How the path was produced.
    #[must_use]
    pub const fn kind(&self) -> PathKind {
        self.kind
    }

    /// Nodes expanded by the grid search.
    #[must_use]
    pub const fn nodes_expanded(&self) -> usize {
        self.nodes_expanded
    }

    /// Returns `true` if the grid search produced this path.
    #[must_use]
    pub const fn is_planned(&self) -> bool {
        matches!(self.kind, PathKind::Planned)
    }

    /// Returns `true` if this is the L-shaped fallback.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.kind, PathKind::Fallback(_))
    }

    /// Walking length measured in the floor plane.
    #[must_use]
    pub fn length(&self) -> f64 {
        polyline_length(&self.points)
    }

    /// First point of the path.
    #[must_use]
    pub fn start(&self) -> Option<&Point3<f64>> {
        self.points.first()
    }

    /// Last point of the path.
    #[must_use]
    pub fn end(&self) -> Option<&Point3<f64>> {
        self.points.last()
    }
}
