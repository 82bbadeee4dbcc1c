//! Walking paths between pick locations on a warehouse floor.
//!
//! Paths are planned over the rasterized obstacle grid of a floor
//! ([`pick_spatial::CellGrid`]) with a bounded, 4-connected A* search.
//!
//! # Overview
//!
//! A query runs in four stages:
//!
//! 1. **Snapping** ([`snap`]): endpoints inside a rack are moved to the
//!    nearest walkable cell.
//! 2. **Search** ([`astar`]): A* with unit step cost and a Manhattan
//!    heuristic, capped at a fixed number of expansions.
//! 3. **Simplification** ([`simplify`]): straight runs collapse to their
//!    turning points and the real endpoints are spliced back on.
//! 4. **Fallback**: if the search gives up, an L-shaped route between the
//!    raw endpoints is returned instead. Planning never fails.
//!
//! # Quick Start
//!
//! ```
//! use pick_pathfind::{PathKind, find_path};
//! use pick_spatial::{FloorLayout, GeometryIndex, LayoutConfig, RackUnit};
//! use pick_types::SearchConfig;
//! use nalgebra::Point3;
//!
//! let layouts = vec![
//!     FloorLayout::new(1)
//!         .with_unit(RackUnit::new(Point3::new(-20.0, 0.0, -20.0), 2.0, 2.0))
//!         .with_unit(RackUnit::new(Point3::new(0.0, 0.0, 0.0), 4.0, 1.0))
//!         .with_unit(RackUnit::new(Point3::new(20.0, 0.0, 20.0), 2.0, 2.0)),
//! ];
//! let index = GeometryIndex::build(&layouts, LayoutConfig::default()).unwrap();
//!
//! // A bin on the rack face: the point itself is inside the footprint.
//! let bin = Point3::new(1.5, 1.0, 0.5);
//! let path = find_path(&Point3::new(0.0, 0.0, 10.0), &bin, 1, &index, &SearchConfig::default());
//!
//! assert_eq!(path.kind(), PathKind::Planned);
//! assert_eq!(path.end(), Some(&bin));
//! ```
//!
//! Use [`PathPlanner`] when many queries run against the same layout; it
//! rasterizes each floor once.
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization of [`FloorPath`] and [`PathKind`]

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod astar;
pub mod heuristics;
pub mod path;
pub mod planner;
pub mod simplify;
pub mod snap;

pub use path::{FallbackReason, FloorPath, PathKind};
pub use planner::{PathPlanner, find_path};
